//! Saved password entries.
//!
//! Storage belongs to the caller; this module only guarantees that an
//! entry is well-formed before it is handed over for persistence.

use super::{
    validate_category_name, validate_notes, validate_password, validate_password_name,
    PasswordRequirements, ValidationResult,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User-supplied fields for a new or edited entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryDraft {
    /// Display name.
    pub name: String,
    /// The secret itself.
    pub password: String,
    /// Optional category name.
    pub category: Option<String>,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

impl EntryDraft {
    /// Checks name, password, category and notes, aggregating every
    /// violation. A blank category counts as no category.
    ///
    /// Common or patterned passwords are still accepted here; only
    /// presence and length bounds are enforced for the password.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        errors.extend(validate_password_name(&self.name).errors);

        let password = validate_password(&self.password, &PasswordRequirements::default());
        if self.password.is_empty() || !password.checks.length {
            errors.extend(password.errors.into_iter().take(1));
        }

        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            errors.extend(validate_category_name(category).errors);
        }

        errors.extend(validate_notes(self.notes.as_deref()).errors);

        ValidationResult::from_errors(errors)
    }
}

/// A validated entry ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPasswordEntry {
    /// Random v4 identifier.
    pub id: Uuid,
    /// Trimmed display name.
    pub name: String,
    /// The secret itself.
    pub password: String,
    /// Trimmed category, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Trimmed notes, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
}

impl SavedPasswordEntry {
    /// Validates a draft and stamps it with a fresh id and timestamps.
    pub fn new(draft: EntryDraft) -> Result<Self, ValidationResult> {
        let result = draft.validate();
        if !result.valid {
            return Err(result);
        }

        let now = Utc::now();
        let entry = Self {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            password: draft.password,
            category: trimmed(draft.category),
            notes: trimmed(draft.notes),
            created_at: now,
            updated_at: now,
        };

        tracing::debug!(id = %entry.id, "Created saved password entry");
        Ok(entry)
    }

    /// Replaces the editable fields, keeping id and creation time.
    pub fn apply(&mut self, draft: EntryDraft) -> Result<(), ValidationResult> {
        let result = draft.validate();
        if !result.valid {
            return Err(result);
        }

        self.name = draft.name.trim().to_string();
        self.password = draft.password;
        self.category = trimmed(draft.category);
        self.notes = trimmed(draft.notes);
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EntryDraft {
        EntryDraft {
            name: " Mail ".to_string(),
            password: "hG7!kq2Lz".to_string(),
            category: Some("work".to_string()),
            notes: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_new_entry_normalized() {
        let entry = SavedPasswordEntry::new(draft()).unwrap();
        assert_eq!(entry.name, "Mail");
        assert_eq!(entry.category.as_deref(), Some("work"));
        assert_eq!(entry.notes, None);
        assert_eq!(entry.created_at, entry.updated_at);
    }

    #[test]
    fn test_invalid_draft_collects_all_errors() {
        let bad = EntryDraft {
            name: "x".to_string(),
            password: String::new(),
            category: None,
            notes: Some("n".repeat(300)),
        };
        let err = SavedPasswordEntry::new(bad).unwrap_err();
        assert_eq!(err.errors.len(), 3);
    }

    #[test]
    fn test_category_name_checked() {
        let mut bad = draft();
        bad.category = Some("<w>".to_string());
        let err = SavedPasswordEntry::new(bad).unwrap_err();
        assert!(err.errors.iter().any(|e| e.contains("special characters")));

        let mut blank = draft();
        blank.category = Some("   ".to_string());
        assert!(SavedPasswordEntry::new(blank).unwrap().category.is_none());
    }

    #[test]
    fn test_common_password_still_saved() {
        let mut common = draft();
        common.password = "password".to_string();
        assert!(SavedPasswordEntry::new(common).is_ok());
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut entry = SavedPasswordEntry::new(draft()).unwrap();
        let id = entry.id;
        let created = entry.created_at;

        let mut edit = draft();
        edit.name = "Personal mail".to_string();
        entry.apply(edit).unwrap();

        assert_eq!(entry.id, id);
        assert_eq!(entry.created_at, created);
        assert_eq!(entry.name, "Personal mail");
        assert!(entry.updated_at >= created);
    }

    #[test]
    fn test_serialized_field_names() {
        let entry = SavedPasswordEntry::new(draft()).unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("notes").is_none());
    }
}
