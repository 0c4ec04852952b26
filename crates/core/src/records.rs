//! Canonical records.
//!
//! A canonical record is the normalized, camelCase, default-filled in-memory
//! form of a backend entity. Records serialize with camelCase keys, so a
//! serialized record normalizes back to itself.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{
    NotificationId, NotificationType, ProjectId, ProjectStatus, ServiceId, UserId, UserRole,
};

/// A dashboard user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub role: UserRole,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub is_verified: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// "First Last", falling back to the email when both names are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        match (first.is_empty(), last.is_empty()) {
            (true, true) => self.email.clone(),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (false, false) => format!("{first} {last}"),
        }
    }
}

/// A client project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub service_id: ServiceId,
    pub client_id: UserId,
    pub controller_id: Option<UserId>,
    pub status: ProjectStatus,
    /// Percent complete as sent by the backend. Not clamped.
    pub progress: i64,
    pub amount: Option<Decimal>,
    pub amount_description: Option<String>,
    pub requirements_pdf: Option<String>,
    pub client_name: Option<String>,
    pub controller_name: Option<String>,
    pub service_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProjectRecord {
    /// Progress clamped into `0..=100` for progress bars.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        u8::try_from(self.progress.clamp(0, 100)).unwrap_or(0)
    }

    /// Whether a controller has been assigned.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.controller_id.is_some()
    }
}

/// A catalogue service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: ServiceId,
    pub name: String,
    pub description: String,
    /// Free text, used as a de facto enum by the category filter.
    pub category: String,
    /// `None` means "price on request".
    pub price: Option<Decimal>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An in-app notification addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub id: NotificationId,
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub is_read: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_display_name_fallbacks() {
        let mut user = UserRecord {
            email: "ada@studio.io".to_string(),
            ..UserRecord::default()
        };
        assert_eq!(user.display_name(), "ada@studio.io");

        user.first_name = Some("Ada".to_string());
        assert_eq!(user.display_name(), "Ada");

        user.last_name = Some("Lovelace".to_string());
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_progress_percent_clamps() {
        let mut project = ProjectRecord {
            progress: 140,
            ..ProjectRecord::default()
        };
        assert_eq!(project.progress_percent(), 100);

        project.progress = -5;
        assert_eq!(project.progress_percent(), 0);
    }

    #[test]
    fn test_notification_serializes_type_key() {
        let notification = NotificationRecord {
            kind: NotificationType::Alert,
            ..NotificationRecord::default()
        };
        let value = serde_json::to_value(&notification).unwrap();
        assert_eq!(value["type"], json!("alert"));
        assert_eq!(value["isRead"], json!(false));
    }
}
