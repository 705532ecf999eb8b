//! 线格式解析
//!
//! 交换机一侧把收到的 flow-mod 文本当作不透明指令，自己解析后再写入流表。

use super::error::RuleError;
use super::rule::{FlowRule, InstructionKind, MatchField, FLAG_SEND_FLOW_REM};
use std::str::FromStr;

fn parse_num<T: FromStr>(line: &str, key: &str, raw: &str) -> Result<T, RuleError> {
    raw.parse::<T>()
        .map_err(|_| RuleError::parse(line, format!("`{key}` expects an integer, got `{raw}`")))
}

fn split_kv<'a>(line: &str, tok: &'a str) -> Result<(&'a str, &'a str), RuleError> {
    tok.split_once('=')
        .ok_or_else(|| RuleError::parse(line, format!("expected key=value, got `{tok}`")))
}

impl FromStr for FlowRule {
    type Err = RuleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("flow-mod") => {}
            Some(other) => return Err(RuleError::parse(line, format!("unknown command `{other}`"))),
            None => return Err(RuleError::parse(line, "empty instruction")),
        }
        let (Some(args), Some(matches), Some(instr), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(RuleError::parse(line, "expected `<args> <match> <instruction>`"));
        };

        let mut b = FlowRule::builder();
        let mut seen: Vec<&str> = Vec::new();

        for tok in args.split(',') {
            let (key, value) = split_kv(line, tok)?;
            if seen.contains(&key) {
                return Err(RuleError::parse(line, format!("duplicate argument `{key}`")));
            }
            seen.push(key);
            b = match key {
                "cmd" if value == "add" => b,
                "cmd" => return Err(RuleError::parse(line, format!("unsupported cmd `{value}`"))),
                "table" => b.table(parse_num(line, key, value)?),
                "hard" => b.hard_timeout_s(Some(parse_num(line, key, value)?)),
                "prio" => b.priority(parse_num(line, key, value)?),
                "flags" => {
                    let flags = value
                        .strip_prefix("0x")
                        .and_then(|hex| u16::from_str_radix(hex, 16).ok())
                        .ok_or_else(|| RuleError::parse(line, format!("bad flags `{value}`")))?;
                    if flags != FLAG_SEND_FLOW_REM {
                        return Err(RuleError::parse(line, format!("unsupported flags `{value}`")));
                    }
                    b
                }
                _ => return Err(RuleError::parse(line, format!("unknown argument `{key}`"))),
            };
        }

        // cmd 与 flags 是固定字段，缺一不可
        for required in ["cmd", "flags"] {
            if !seen.contains(&required) {
                return Err(RuleError::parse(line, format!("missing argument `{required}`")));
            }
        }

        let mut seen_fields = Vec::new();
        for tok in matches.split(',') {
            let (key, value) = split_kv(line, tok)?;
            let field = MatchField::from_name(key)
                .ok_or_else(|| RuleError::parse(line, format!("unsupported match field `{key}`")))?;
            if seen_fields.contains(&field) {
                return Err(RuleError::parse(line, format!("duplicate match field `{key}`")));
            }
            seen_fields.push(field);
            b = b.match_field(field, parse_num(line, key, value)?);
        }

        let (kind, action) = instr
            .split_once(':')
            .ok_or_else(|| RuleError::parse(line, format!("bad instruction `{instr}`")))?;
        let kind = match kind {
            "apply" => InstructionKind::Apply,
            "write" => InstructionKind::Write,
            other => {
                return Err(RuleError::parse(line, format!("unsupported instruction `{other}`")));
            }
        };
        let (act, port) = split_kv(line, action)?;
        if act != "output" {
            return Err(RuleError::parse(line, format!("unsupported action `{act}`")));
        }
        b = b.instruction(kind).output(parse_num(line, act, port)?);

        b.build()
    }
}
