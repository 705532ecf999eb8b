use crate::ctrl::{ConfigError, ProfileConfig, RuleError, SwitchId, ToggleState};

#[test]
fn builtin_profile_covers_three_switches() {
    let table = ProfileConfig::builtin().build_table().expect("builtin");
    assert_eq!(table.switches(), vec![SwitchId(1), SwitchId(2), SwitchId(3)]);

    let s1 = table.lookup(SwitchId(1)).expect("dpid 1");
    assert_eq!(s1.handshake().len(), 2);
    assert!(s1.alternating().is_some());

    let s2 = table.lookup(SwitchId(2)).expect("dpid 2");
    assert!(s2.alternating().is_none());
    assert!(s2.handshake().iter().all(|r| r.hard_timeout_s().is_none()));

    let s3 = table.lookup(SwitchId(3)).expect("dpid 3");
    let alt = s3.alternating().expect("dpid 3 alternates");
    assert_eq!(alt.for_state(ToggleState::A)[0].in_port(), Some(2));
    assert_eq!(alt.for_state(ToggleState::B)[0].in_port(), Some(3));

    assert!(table.lookup(SwitchId(4)).is_err());
}

#[test]
fn parses_json_profile() {
    let raw = r#"
    {
        "switches": [
            {
                "dpid": 7,
                "handshake": [
                    { "table": 0, "in_port": 1, "priority": 5, "instruction": "write", "output": 2 }
                ],
                "on_flow_removed": {
                    "a": [ { "table": 0, "in_port": 1, "priority": 1, "hard_timeout_s": 3, "instruction": "apply", "output": 2 } ],
                    "b": [ { "table": 0, "in_port": 2, "priority": 1, "hard_timeout_s": 3, "instruction": "apply", "output": 1 } ]
                }
            },
            { "dpid": 8 }
        ]
    }
    "#;
    let cfg = ProfileConfig::from_json(raw).expect("parse");
    let table = cfg.build_table().expect("valid");
    assert_eq!(table.len(), 2);

    let p7 = table.lookup(SwitchId(7)).expect("dpid 7");
    assert_eq!(
        p7.handshake()[0].render(),
        "flow-mod cmd=add,table=0,flags=0x0001,prio=5 in_port=1 write:output=2"
    );
    let alt = p7.alternating().expect("alternating");
    assert_eq!(alt.for_state(ToggleState::A)[0].hard_timeout_s(), Some(3));

    let p8 = table.lookup(SwitchId(8)).expect("dpid 8");
    assert!(p8.handshake().is_empty());
    assert!(p8.alternating().is_none());
}

#[test]
fn missing_rule_field_is_reported_with_switch() {
    let raw = r#"
    { "switches": [ { "dpid": 4, "handshake": [ { "in_port": 1, "priority": 1, "instruction": "apply", "output": 2 } ] } ] }
    "#;
    let err = ProfileConfig::from_json(raw)
        .expect("parse")
        .build_table()
        .expect_err("missing table must fail");
    match err {
        ConfigError::MalformedRule { switch, source } => {
            assert_eq!(switch, SwitchId(4));
            assert_eq!(source, RuleError::MissingField("table"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_switch_is_rejected() {
    let raw = r#"{ "switches": [ { "dpid": 1 }, { "dpid": 1 } ] }"#;
    let err = ProfileConfig::from_json(raw)
        .expect("parse")
        .build_table()
        .expect_err("duplicate");
    assert!(matches!(err, ConfigError::DuplicateSwitch(SwitchId(1))));
}

#[test]
fn invalid_json_is_a_json_error() {
    let err = ProfileConfig::from_json("{ \"switches\": [ { \"dpid\": \"one\" } ] }")
        .expect_err("bad type");
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("ofsim-rs-no-such-profile.json");
    let err = ProfileConfig::load(&path).expect_err("missing file");
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("ofsim-rs-no-such-profile.json"));
}

#[test]
fn builtin_profile_roundtrips_through_json() {
    let raw = serde_json::to_string(&ProfileConfig::builtin()).expect("serialize");
    let table = ProfileConfig::from_json(&raw)
        .expect("parse")
        .build_table()
        .expect("valid");
    let builtin = ProfileConfig::builtin().build_table().expect("builtin");
    for id in builtin.switches() {
        assert_eq!(table.lookup(id), builtin.lookup(id));
    }
}
