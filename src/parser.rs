use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::FlatRecord;

static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<id>.+?)\s*[,=]\s*(?P<value>[-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)$")
        .unwrap()
});

/// Parse flat records from either supported syntax. Input starting with
/// `[` is a JSON array of `{"id", "value"}` objects; anything else is the
/// line format, one `path = value` (or `path,value`) record per line with
/// `#` comments. A record line without a value gets value 0.
pub fn parse_records(input: &str) -> Result<Vec<FlatRecord>> {
    if input.trim_start().starts_with('[') {
        return serde_json::from_str(input.trim_start()).context("invalid JSON record array");
    }
    parse_record_lines(input)
}

fn parse_record_lines(input: &str) -> Result<Vec<FlatRecord>> {
    let mut records = Vec::new();
    for (number, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match LINE_RE.captures(line) {
            Some(caps) => {
                let id = caps["id"].to_string();
                let value: f64 = caps["value"]
                    .parse()
                    .with_context(|| format!("line {}: invalid value", number + 1))?;
                records.push(FlatRecord { id, value });
            }
            None => {
                if line.ends_with(',') || line.ends_with('=') {
                    bail!("line {}: record is missing a value", number + 1);
                }
                records.push(FlatRecord {
                    id: line.to_string(),
                    value: 0.0,
                });
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_arrays() {
        let records = parse_records(r#"[{"id": "some|path", "value": 1}, {"id": "some", "value": 3}]"#)
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], FlatRecord::new("some|path", 1.0));
        assert_eq!(records[1], FlatRecord::new("some", 3.0));
    }

    #[test]
    fn json_value_defaults_to_zero_when_omitted() {
        let records = parse_records(r#"[{"id": "root"}]"#).unwrap();
        assert_eq!(records[0].value, 0.0);
    }

    #[test]
    fn parses_the_line_format() {
        let input = "\n# sizes per path\nsrc = 0\nsrc|lib.rs = 120\nsrc|main.rs, 30\n";
        let records = parse_records(input).unwrap();
        assert_eq!(
            records,
            vec![
                FlatRecord::new("src", 0.0),
                FlatRecord::new("src|lib.rs", 120.0),
                FlatRecord::new("src|main.rs", 30.0),
            ]
        );
    }

    #[test]
    fn bare_line_is_a_zero_valued_record() {
        let records = parse_records("root\nroot|leaf = 2\n").unwrap();
        assert_eq!(records[0], FlatRecord::new("root", 0.0));
        assert_eq!(records[1], FlatRecord::new("root|leaf", 2.0));
    }

    #[test]
    fn empty_input_parses_to_no_records() {
        assert!(parse_records("").unwrap().is_empty());
        assert!(parse_records("# nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_json() {
        assert!(parse_records("[{\"id\": }]").is_err());
    }

    #[test]
    fn rejects_dangling_separator() {
        assert!(parse_records("root =\n").is_err());
    }
}
