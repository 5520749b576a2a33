use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::user::UserId;

/// Status written into the profile when a project is committed.
pub const STATUS_IN_PROGRESS: &str = "in_progress";

/// One project-generation request. Built per call, never stored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRequest {
    #[serde(rename = "telegram_id")]
    pub user_id: UserId,
    pub profession: String,
    pub level: String,
    pub specialization: String,
    #[serde(rename = "language_code")]
    pub language: String,
}

impl ProjectRequest {
    /// Names of required fields that are blank.
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("profession", &self.profession),
            ("level", &self.level),
            ("specialization", &self.specialization),
            ("language_code", &self.language),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Field set written to the profile in the final commit step.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCommit {
    pub project_id: Uuid,
    pub status: String,
    pub title: String,
    pub description: String,
    pub pdf_name: String,
    pub pdf_path: String,
    pub profession: String,
    pub level: String,
    pub specialization: String,
    pub created_at: DateTime<Utc>,
}

/// Workflow output handed back to the caller for immediate delivery.
#[derive(Debug, Clone)]
pub struct GeneratedProject {
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub pdf: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_from_bot_payload() {
        let json = serde_json::json!({
            "telegram_id": 1001,
            "profession": "programmer",
            "level": "beginner",
            "specialization": "Python(FastAPI)",
            "language_code": "en"
        });
        let request: ProjectRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.user_id, 1001);
        assert_eq!(request.language, "en");
        assert!(request.blank_fields().is_empty());
    }

    #[test]
    fn test_blank_fields_reports_whitespace_only_values() {
        let request = ProjectRequest {
            user_id: 1,
            profession: "designer".to_string(),
            level: "  ".to_string(),
            specialization: String::new(),
            language: "ru".to_string(),
        };
        assert_eq!(request.blank_fields(), vec!["level", "specialization"]);
    }
}
