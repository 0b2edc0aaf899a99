//! Level plan schemas
//!
//! A schema is a JSON array of plans, each plan an array of strings (one per
//! grid row). Decoding goes through `serde_json::Value` so a wrongly typed
//! entry is reported with its position instead of a generic serde message.

use std::path::Path;

use serde_json::Value;

use crate::error::{SimError, SimResult};

/// Rows of one level, top to bottom
pub type Plan = Vec<String>;

/// Decode a JSON schema into plans
pub fn parse_plans(json: &str) -> SimResult<Vec<Plan>> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(plans) = &value else {
        return Err(mismatch("array of plans", "schema", &value));
    };

    plans
        .iter()
        .enumerate()
        .map(|(i, plan)| {
            let Value::Array(rows) = plan else {
                return Err(mismatch("array of strings", &format!("plan {i}"), plan));
            };
            rows.iter()
                .enumerate()
                .map(|(j, row)| match row {
                    Value::String(line) => Ok(line.clone()),
                    other => Err(mismatch("string", &format!("plan {i} row {j}"), other)),
                })
                .collect::<SimResult<Plan>>()
        })
        .collect()
}

/// Read and decode a schema file
pub fn load_plans(path: impl AsRef<Path>) -> SimResult<Vec<Plan>> {
    let json = std::fs::read_to_string(path.as_ref())?;
    let plans = parse_plans(&json)?;
    log::info!("Loaded {} plans from {}", plans.len(), path.as_ref().display());
    Ok(plans)
}

fn mismatch(expected: &'static str, at: &str, found: &Value) -> SimError {
    let kind = match found {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    SimError::TypeMismatch {
        expected,
        found: format!("{kind} at {at}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plans() {
        let plans = parse_plans(r#"[["   ", " @ ", "x!x"], ["o", "x"]]"#).unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0], vec!["   ", " @ ", "x!x"]);
        assert_eq!(plans[1], vec!["o", "x"]);
    }

    #[test]
    fn test_empty_schema() {
        assert!(parse_plans("[]").unwrap().is_empty());
    }

    #[test]
    fn test_schema_must_be_array() {
        let err = parse_plans(r#"{"levels": []}"#).unwrap_err();
        match err {
            SimError::TypeMismatch { expected, found } => {
                assert_eq!(expected, "array of plans");
                assert_eq!(found, "object at schema");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_row_type_reports_position() {
        let err = parse_plans(r#"[["ok"], ["ok", 7]]"#).unwrap_err();
        match err {
            SimError::TypeMismatch { found, .. } => assert_eq!(found, "number at plan 1 row 1"),
            other => panic!("unexpected error: {other}"),
        }

        let err = parse_plans(r#"["not a plan"]"#).unwrap_err();
        assert!(matches!(err, SimError::TypeMismatch { expected: "array of strings", .. }));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_plans("[[").unwrap_err(), SimError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_plans("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
