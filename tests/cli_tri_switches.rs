use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "ofsim-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

fn done_line(stdout: &str) -> Option<&str> {
    stdout.lines().find(|line| line.starts_with("done @ "))
}

#[test]
fn tri_switches_writes_viz_json_with_meta_first() {
    let dir = unique_temp_dir("tri-viz");
    let out_json = dir.join("viz.json");

    let output = Command::new(env!("CARGO_BIN_EXE_tri_switches"))
        .args([
            "--sim-time",
            "3",
            "--viz-json",
            out_json.to_str().unwrap(),
        ])
        .output()
        .expect("run tri_switches");
    assert!(
        output.status.success(),
        "tri_switches failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let raw = fs::read_to_string(&out_json).expect("read viz.json");
    let v: Value = serde_json::from_str(&raw).expect("parse viz.json");
    let arr = v.as_array().expect("viz.json must be a JSON array");
    assert_eq!(
        arr[0].get("kind").and_then(|k| k.as_str()),
        Some("meta"),
        "expected first viz event to be meta"
    );
    let nodes = arr[0]["nodes"].as_array().expect("meta nodes");
    assert_eq!(nodes.len(), 7);
    assert!(arr.iter().any(|e| e["kind"] == "flow_removed"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let done = done_line(&stdout).expect("summary line");
    assert!(done.contains("handshakes=3"), "{done}");
    assert!(done.contains("flow_mods=14"), "{done}");
    assert!(done.contains("flow_removed=4"), "{done}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn tri_switches_trace_prints_flow_tables() {
    let output = Command::new(env!("CARGO_BIN_EXE_tri_switches"))
        .args(["--sim-time", "1", "--trace"])
        .output()
        .expect("run tri_switches");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l.starts_with("dpid:2 s1 entries=2")));
    assert!(stdout.contains("flow-mod cmd=add,table=0,flags=0x0001,prio=2 in_port=2 write:output=3"));
}

#[test]
fn tri_switches_accepts_custom_profiles() {
    let dir = unique_temp_dir("tri-profiles");
    let profiles = write_file(
        &dir,
        "profiles.json",
        r#"
{
    "switches": [
        {
            "dpid": 2,
            "handshake": [
                { "table": 0, "in_port": 1, "priority": 1, "hard_timeout_s": 1, "instruction": "apply", "output": 2 }
            ],
            "on_flow_removed": {
                "a": [ { "table": 0, "in_port": 1, "priority": 1, "hard_timeout_s": 1, "instruction": "apply", "output": 3 } ],
                "b": [ { "table": 0, "in_port": 1, "priority": 1, "hard_timeout_s": 1, "instruction": "apply", "output": 2 } ]
            }
        }
    ]
}
        "#,
    );

    let output = Command::new(env!("CARGO_BIN_EXE_tri_switches"))
        .args(["--sim-time", "2", "--profiles", profiles.to_str().unwrap()])
        .output()
        .expect("run tri_switches");
    assert!(
        output.status.success(),
        "tri_switches failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    // t=0 握手 1 条，t=1 与 t=2 各 1 条交替规则
    let stdout = String::from_utf8_lossy(&output.stdout);
    let done = done_line(&stdout).expect("summary line");
    assert!(done.contains("flow_mods=3"), "{done}");
    assert!(done.contains("flow_removed=2"), "{done}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn tri_switches_rejects_malformed_profiles() {
    let dir = unique_temp_dir("tri-bad-profiles");
    let profiles = write_file(
        &dir,
        "profiles.json",
        r#"{ "switches": [ { "dpid": 1, "handshake": [ { "table": 0, "priority": 1 } ] } ] }"#,
    );

    let output = Command::new(env!("CARGO_BIN_EXE_tri_switches"))
        .args(["--profiles", profiles.to_str().unwrap()])
        .output()
        .expect("run tri_switches");
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(done_line(&stdout).is_none());

    let _ = fs::remove_dir_all(&dir);
}
