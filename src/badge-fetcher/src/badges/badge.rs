//! Badge document model and parsing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur while parsing a badge document.
#[derive(Debug, Error)]
pub enum BadgeParseError {
    /// The document is not valid JSON or does not match the badge shape.
    #[error("Invalid badge JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The badge has an empty `code`.
    #[error("Badge code must not be empty")]
    MissingCode,
}

/// Keys that may carry the badge code, in order of precedence.
const CODE_KEYS: [&str; 3] = ["code", "identifier", "id"];

/// A parsed `-badge.json` document.
///
/// `code` is the only required field; `identifier` or `id` stand in for it
/// when it is absent. Fields not listed here, including any unused code
/// keys, are preserved in [`Badge::extra`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BadgeDocument")]
pub struct Badge {
    /// Unique badge identifier.
    pub code: String,

    /// Short text shown on the badge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Badge value: a string, number, boolean or null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Display color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Any other fields present in the document.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Badge document as read, before the code key is picked.
#[derive(Deserialize)]
struct BadgeDocument {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<BadgeDocument> for Badge {
    type Error = String;

    fn try_from(mut document: BadgeDocument) -> Result<Self, Self::Error> {
        let key = CODE_KEYS
            .into_iter()
            .find(|key| document.extra.contains_key(*key))
            .ok_or_else(|| "missing field `code`".to_string())?;
        let code = match document.extra.remove(key) {
            Some(Value::String(code)) => code,
            _ => return Err(format!("badge `{key}` must be a string")),
        };

        if matches!(document.value, Some(Value::Array(_) | Value::Object(_))) {
            return Err("badge `value` must be a string, number, boolean or null".to_string());
        }

        Ok(Self {
            code,
            label: document.label,
            value: document.value,
            color: document.color,
            description: document.description,
            extra: document.extra,
        })
    }
}

/// Parses a badge document.
///
/// A leading UTF-8 byte order mark is ignored.
///
/// # Errors
///
/// Returns [`BadgeParseError::Json`] for malformed documents and
/// [`BadgeParseError::MissingCode`] when `code` is blank.
pub fn parse_badge(content: &str) -> Result<Badge, BadgeParseError> {
    let content = content.trim_start_matches('\u{feff}');
    let badge: Badge = serde_json::from_str(content)?;

    if badge.code.trim().is_empty() {
        return Err(BadgeParseError::MissingCode);
    }

    Ok(badge)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_badge() {
        let badge = parse_badge(
            r#"{
                "code": "ci",
                "label": "build",
                "value": "passing",
                "color": "green",
                "description": "Main branch CI",
                "level": 2
            }"#,
        )
        .unwrap();

        assert_eq!(badge.code, "ci");
        assert_eq!(badge.label.as_deref(), Some("build"));
        assert_eq!(badge.value, Some(Value::from("passing")));
        assert_eq!(badge.color.as_deref(), Some("green"));
        assert_eq!(badge.extra.get("level"), Some(&Value::from(2)));
    }

    #[test]
    fn accepts_identifier_alias_and_numeric_value() {
        let badge = parse_badge(r#"{"identifier":"coverage","value":87.5}"#).unwrap();

        assert_eq!(badge.code, "coverage");
        assert_eq!(badge.value, Some(Value::from(87.5)));
        assert!(badge.extra.is_empty());
    }

    #[test]
    fn code_wins_over_id_and_keeps_it_as_extra() {
        let badge = parse_badge(r#"{"code":"ci","id":"ci-1","identifier":"build"}"#).unwrap();

        assert_eq!(badge.code, "ci");
        assert_eq!(badge.extra.get("id"), Some(&Value::from("ci-1")));
        assert_eq!(badge.extra.get("identifier"), Some(&Value::from("build")));
    }

    #[test]
    fn falls_back_to_id_when_no_code_or_identifier() {
        let badge = parse_badge(r#"{"id":"lint","value":true}"#).unwrap();

        assert_eq!(badge.code, "lint");
        assert_eq!(badge.value, Some(Value::Bool(true)));
        assert!(badge.extra.is_empty());
    }

    #[test]
    fn rejects_non_string_code() {
        let result = parse_badge(r#"{"code":7}"#);
        assert!(matches!(result, Err(BadgeParseError::Json(_))));
    }

    #[test]
    fn rejects_structured_value() {
        let array = parse_badge(r#"{"code":"ci","value":[1,2]}"#);
        let object = parse_badge(r#"{"code":"ci","value":{"pct":90}}"#);

        assert!(matches!(array, Err(BadgeParseError::Json(_))));
        assert!(matches!(object, Err(BadgeParseError::Json(_))));
    }

    #[test]
    fn ignores_byte_order_mark() {
        let badge = parse_badge("\u{feff}{\"code\":\"bom\"}").unwrap();
        assert_eq!(badge.code, "bom");
    }

    #[test]
    fn rejects_blank_code() {
        let result = parse_badge(r#"{"code":"  "}"#);
        assert!(matches!(result, Err(BadgeParseError::MissingCode)));
    }

    #[test]
    fn rejects_missing_code() {
        let result = parse_badge(r#"{"label":"build"}"#);
        assert!(matches!(result, Err(BadgeParseError::Json(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        let result = parse_badge("{ not json");
        assert!(matches!(result, Err(BadgeParseError::Json(_))));
    }

    #[test]
    fn serializes_without_empty_optionals() {
        let badge = parse_badge(r#"{"code":"ci","owner":"qa"}"#).unwrap();

        let json = serde_json::to_value(&badge).unwrap();

        assert_eq!(json, serde_json::json!({"code": "ci", "owner": "qa"}));
    }
}
