//! JSON parsing for visitor imports.
//!
//! Accepts what the browser app can hand over: the bare visitor array, or a
//! local storage dump where the visitor list sits under its key, either as a
//! nested array or as the JSON string `localStorage` actually holds.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::config::VISITORS_STORAGE_KEY;
use crate::domain::{AppError, Result, Visitor};

/// Shapes an import file may take.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawImport {
    List(Vec<Visitor>),
    Dump(serde_json::Map<String, Value>),
}

/// Parses visitors from an import file.
///
/// # Errors
/// Returns error if the JSON is malformed, the dump has no visitor key, or a
/// record has an empty id.
pub fn parse_visitor_import(data: &[u8]) -> Result<Vec<Visitor>> {
    let raw: RawImport = serde_json::from_slice(data).map_err(AppError::json_parse)?;

    let visitors = match raw {
        RawImport::List(visitors) => visitors,
        RawImport::Dump(mut map) => {
            let value = map
                .remove(VISITORS_STORAGE_KEY)
                .ok_or_else(|| AppError::InvalidData {
                    message: format!("Import has no '{VISITORS_STORAGE_KEY}' entry"),
                })?;
            match value {
                Value::String(inner) => {
                    serde_json::from_str(&inner).map_err(AppError::json_parse)?
                }
                other => serde_json::from_value(other).map_err(AppError::json_parse)?,
            }
        }
    };

    if let Some(pos) = visitors.iter().position(|v| v.id.trim().is_empty()) {
        return Err(AppError::InvalidData {
            message: format!("Record {} has an empty id", pos + 1),
        });
    }

    Ok(visitors)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{"id":"a1","fullName":"Maria Silva","phone":"(11) 98765-4321",
        "city":"São Paulo","serviceDate":"10/03/2024","serviceTime":"19:00",
        "createdAt":"2024-03-10T22:00:00.000Z"}"#;

    #[test]
    fn test_parse_array() {
        let data = format!("[{RECORD}]");
        let visitors = parse_visitor_import(data.as_bytes()).unwrap();
        assert_eq!(visitors.len(), 1);
        assert_eq!(visitors[0].full_name, "Maria Silva");
    }

    #[test]
    fn test_parse_dump_with_string_value() {
        let inner = serde_json::to_string(&format!("[{RECORD}]")).unwrap();
        let data = format!(r#"{{"church-visitors": {inner}, "theme": "dark"}}"#);
        let visitors = parse_visitor_import(data.as_bytes()).unwrap();
        assert_eq!(visitors[0].id, "a1");
    }

    #[test]
    fn test_parse_dump_with_nested_array() {
        let data = format!(r#"{{"church-visitors": [{RECORD}]}}"#);
        assert_eq!(parse_visitor_import(data.as_bytes()).unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_dump_without_key() {
        let err = parse_visitor_import(br#"{"other": []}"#).unwrap_err();
        assert!(matches!(err, AppError::InvalidData { .. }));
    }

    #[test]
    fn test_rejects_empty_id() {
        let data = format!("[{}]", RECORD.replace("\"a1\"", "\"\""));
        assert!(parse_visitor_import(data.as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            parse_visitor_import(b"[{"),
            Err(AppError::JsonParse { .. })
        ));
    }
}
