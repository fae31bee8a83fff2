use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::types::Env;

/// Shell lines, optionally prefixed so that sourcing them also exports.
pub fn format_lines(lines: &[String], export: bool) -> String {
    let mut out = String::new();
    for line in lines {
        if export {
            out.push_str("export ");
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Pretty JSON object with keys in sorted order.
pub fn format_json_output(env: &Env) -> String {
    let sorted: BTreeMap<&String, &String> = env.iter().collect();
    let object: Map<String, Value> = sorted
        .into_iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    format!("{:#}", Value::Object(object))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_lines() {
        let lines = vec!["A=1".to_string(), "B='x y'".to_string()];
        assert_eq!(format_lines(&lines, false), "A=1\nB='x y'\n");
        assert_eq!(
            format_lines(&lines, true),
            "export A=1\nexport B='x y'\n"
        );
        assert_eq!(format_lines(&[], true), "");
    }

    #[test]
    fn test_format_json_sorted() {
        let env: Env = [("B", "2"), ("A", "it's \"x\"")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(
            format_json_output(&env),
            "{\n  \"A\": \"it's \\\"x\\\"\",\n  \"B\": \"2\"\n}"
        );
    }
}
