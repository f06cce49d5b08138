//! Shape checks for bulk-import documents and settings objects.
//!
//! Both inputs arrive as untyped JSON from the persistence layer, so
//! they are inspected as [`serde_json::Value`] rather than
//! deserialized into fixed structs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const BOOLEAN_SETTINGS: [&str; 3] = ["autoCopy", "showStrength", "saveHistory"];

/// Normalized contents of an import document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportData {
    /// Saved password records.
    pub passwords: Vec<Value>,
    /// Category records.
    pub categories: Vec<Value>,
    /// Raw settings object.
    pub settings: Map<String, Value>,
    /// Generation history records.
    pub history: Vec<Value>,
}

/// Result of [`validate_import_data`].
///
/// `data` is always populated; invalid or missing fields are replaced
/// with empty defaults and reported in `errors`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportValidation {
    /// True when the document shape is valid.
    pub valid: bool,
    /// Shape violations.
    pub errors: Vec<String>,
    /// Normalized contents.
    pub data: ImportData,
}

/// Validates an import document and normalizes its fields.
pub fn validate_import_data(data: &Value) -> ImportValidation {
    let Some(document) = data.as_object() else {
        return ImportValidation {
            valid: false,
            errors: vec!["invalid data format: expected a JSON object".to_string()],
            data: ImportData::default(),
        };
    };

    let mut errors = Vec::new();

    let passwords = array_field(document, "passwords", &mut errors);
    let categories = array_field(document, "categories", &mut errors);
    let history = array_field(document, "history", &mut errors);

    let settings = match present(document, "settings") {
        None => Map::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => {
            errors.push("settings must be an object".to_string());
            Map::new()
        }
    };

    tracing::debug!(
        passwords = passwords.len(),
        categories = categories.len(),
        history = history.len(),
        violations = errors.len(),
        "Validated import data"
    );

    ImportValidation {
        valid: errors.is_empty(),
        errors,
        data: ImportData {
            passwords,
            categories,
            settings,
            history,
        },
    }
}

/// Returns the field unless it is absent or `null`.
fn present<'a>(document: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    document.get(key).filter(|value| !value.is_null())
}

fn array_field(document: &Map<String, Value>, key: &str, errors: &mut Vec<String>) -> Vec<Value> {
    match present(document, key) {
        None => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(_) => {
            errors.push(format!("{} must be an array", key));
            Vec::new()
        }
    }
}

/// UI colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Recognized settings that passed validation.
///
/// Unrecognized fields never appear here; invalid ones are left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedSettings {
    /// UI theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// Copy generated passwords automatically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_copy: Option<bool>,
    /// Show the strength meter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_strength: Option<bool>,
    /// Keep generation history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_history: Option<bool>,
}

/// Result of [`validate_settings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsValidation {
    /// True when every present field is valid.
    pub valid: bool,
    /// Invalid fields.
    pub errors: Vec<String>,
    /// Recognized, valid fields only.
    pub sanitized: SanitizedSettings,
}

/// Whitelist-validates a settings object field by field.
pub fn validate_settings(settings: &Value) -> SettingsValidation {
    let Some(fields) = settings.as_object() else {
        return SettingsValidation {
            valid: false,
            errors: vec!["settings must be an object".to_string()],
            sanitized: SanitizedSettings::default(),
        };
    };

    let mut errors = Vec::new();
    let mut sanitized = SanitizedSettings::default();

    if let Some(theme) = present(fields, "theme") {
        match theme.as_str().and_then(Theme::parse) {
            Some(theme) => sanitized.theme = Some(theme),
            None => errors.push("theme must be \"light\" or \"dark\"".to_string()),
        }
    }

    for field in BOOLEAN_SETTINGS {
        let Some(value) = present(fields, field) else {
            continue;
        };
        let Some(flag) = value.as_bool() else {
            errors.push(format!("{} must be a boolean", field));
            continue;
        };
        match field {
            "autoCopy" => sanitized.auto_copy = Some(flag),
            "showStrength" => sanitized.show_strength = Some(flag),
            _ => sanitized.save_history = Some(flag),
        }
    }

    SettingsValidation {
        valid: errors.is_empty(),
        errors,
        sanitized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_import() {
        let doc = json!({
            "passwords": [{"name": "mail"}],
            "categories": [],
            "settings": {"theme": "dark"},
            "history": [{"password": "x"}]
        });
        let result = validate_import_data(&doc);
        assert!(result.valid);
        assert_eq!(result.data.passwords.len(), 1);
        assert_eq!(result.data.history.len(), 1);
        assert_eq!(result.data.settings["theme"], "dark");
    }

    #[test]
    fn test_missing_fields_default_empty() {
        let result = validate_import_data(&json!({}));
        assert!(result.valid);
        assert_eq!(result.data, ImportData::default());
    }

    #[test]
    fn test_wrong_shapes_normalized_and_reported() {
        let doc = json!({
            "passwords": "oops",
            "categories": {"a": 1},
            "settings": [1, 2]
        });
        let result = validate_import_data(&doc);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 3);
        assert!(result.data.passwords.is_empty());
        assert!(result.data.categories.is_empty());
        assert!(result.data.settings.is_empty());
    }

    #[test]
    fn test_non_object_document() {
        let result = validate_import_data(&json!([1, 2, 3]));
        assert!(!result.valid);
    }

    #[test]
    fn test_settings_whitelist() {
        let settings = json!({
            "theme": "light",
            "autoCopy": true,
            "showStrength": "yes",
            "language": "tr",
            "unknown": 42
        });
        let result = validate_settings(&settings);

        assert!(!result.valid);
        assert_eq!(result.errors, vec!["showStrength must be a boolean".to_string()]);
        assert_eq!(result.sanitized.theme, Some(Theme::Light));
        assert_eq!(result.sanitized.auto_copy, Some(true));
        assert_eq!(result.sanitized.show_strength, None);
        assert_eq!(result.sanitized.save_history, None);
    }

    #[test]
    fn test_invalid_theme() {
        let result = validate_settings(&json!({"theme": "neon"}));
        assert!(!result.valid);
        assert_eq!(result.sanitized.theme, None);
    }

    #[test]
    fn test_sanitized_serializes_only_set_fields() {
        let result = validate_settings(&json!({"saveHistory": false, "bogus": 1}));
        let out = serde_json::to_value(&result.sanitized).unwrap();
        assert_eq!(out, json!({"saveHistory": false}));
    }
}
