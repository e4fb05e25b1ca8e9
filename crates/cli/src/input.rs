// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Reading prediction rows from files or stdin

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result, bail};
use jaqpot_types::Row;
use serde_json::Value;

/// Read rows from `source`, `-` meaning stdin
///
/// Accepts either a JSON array of flat objects or a single flat object.
pub fn read_rows(source: &str) -> Result<Vec<Row>> {
    let content = if source == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read rows from stdin")?;
        buffer
    } else {
        fs::read_to_string(Path::new(source))
            .with_context(|| format!("failed to read rows from {source}"))?
    };

    parse_rows(&content).with_context(|| format!("invalid rows in {source}"))
}

/// Parse rows from JSON text
pub fn parse_rows(content: &str) -> Result<Vec<Row>> {
    let value: Value = serde_json::from_str(content)?;
    let rows: Vec<Row> = match value {
        Value::Array(_) => serde_json::from_value(value)?,
        Value::Object(_) => vec![serde_json::from_value(value)?],
        other => bail!("expected a JSON object or array of objects, got {other}"),
    };

    if rows.is_empty() {
        bail!("no rows to predict");
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use jaqpot_types::FeatureValue;

    use super::*;

    #[test]
    fn array_of_rows() {
        let rows = parse_rows(r#"[{"X1": "1", "X2": 2}, {"X1": "3", "X2": true}]"#).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("X1"), Some(&FeatureValue::from("1")));
        assert_eq!(rows[0].get("X2"), Some(&FeatureValue::from(2_i64)));
        assert_eq!(rows[1].get("X2"), Some(&FeatureValue::from(true)));
    }

    #[test]
    fn single_object_is_one_row() {
        let rows = parse_rows(r#"{"X1": 0.5}"#).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("X1"), FeatureValue::float(0.5).as_ref());
    }

    #[test]
    fn rejects_nested_and_empty_input() {
        assert!(parse_rows(r#"[{"X1": {"nested": 1}}]"#).is_err());
        assert!(parse_rows("[]").is_err());
        assert!(parse_rows("42").is_err());
        assert!(parse_rows("not json").is_err());
    }

    #[test]
    fn reads_rows_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"[{"X1": "1"}]"#).unwrap();

        let rows = read_rows(file.path().to_str().unwrap()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn missing_file_mentions_path() {
        let error = read_rows("/nonexistent/rows.json").unwrap_err();
        assert!(error.to_string().contains("/nonexistent/rows.json"));
    }
}
