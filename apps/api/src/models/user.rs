use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Messenger-assigned user identifier. Stable and externally owned.
pub type UserId = i64;

/// A user's stored profile, including the active-project slot.
///
/// `current_project_id` is non-null iff a project is in progress. Only the
/// project workflow writes the `current_project_*` columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub telegram_id: UserId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    pub profession: Option<String>,
    pub level: Option<String>,
    pub specialization: Option<String>,
    pub current_project_id: Option<Uuid>,
    pub current_project_status: Option<String>,
    pub current_project_title: Option<String>,
    pub current_project_description: Option<String>,
    pub current_project_pdf_name: Option<String>,
    pub current_project_pdf_path: Option<String>,
    pub current_project_profession: Option<String>,
    pub current_project_level: Option<String>,
    pub current_project_specialization: Option<String>,
    pub current_project_created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    #[allow(dead_code)]
    pub fn new(telegram_id: UserId) -> Self {
        Self {
            telegram_id,
            ..Default::default()
        }
    }

    pub fn has_active_project(&self) -> bool {
        self.current_project_id.is_some()
    }
}

/// Upsert payload from the front-end. Absent fields leave stored values alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpsert {
    pub telegram_id: UserId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    pub profession: Option<String>,
    pub level: Option<String>,
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageUpdate {
    pub language_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfessionLevelUpdate {
    pub profession: String,
    pub level: String,
    pub specialization: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_has_no_active_project() {
        let profile = UserProfile::new(42);
        assert_eq!(profile.telegram_id, 42);
        assert!(!profile.has_active_project());
    }

    #[test]
    fn test_upsert_accepts_partial_payload() {
        let json = r#"{"telegram_id": 7, "username": "ada"}"#;
        let upsert: UserUpsert = serde_json::from_str(json).unwrap();
        assert_eq!(upsert.telegram_id, 7);
        assert_eq!(upsert.username.as_deref(), Some("ada"));
        assert!(upsert.profession.is_none());
    }

    #[test]
    fn test_profession_level_specialization_is_optional() {
        let json = r#"{"profession": "programmer", "level": "junior"}"#;
        let update: ProfessionLevelUpdate = serde_json::from_str(json).unwrap();
        assert!(update.specialization.is_none());
    }
}
