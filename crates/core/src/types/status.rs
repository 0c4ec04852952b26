//! Role, status, and type vocabularies for the dashboard entities.
//!
//! The backend treats these as free strings, so every enum here keeps an
//! `Other` variant holding unknown values verbatim. Parsing is exact and
//! case-sensitive: `"Admin"` is not `admin`.

use serde::{Deserialize, Serialize};

/// Account role of a dashboard user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    /// Full access, including user management.
    Admin,
    /// Manages the projects assigned to them.
    Controller,
    /// Customer who owns projects.
    #[default]
    Client,
    /// A value the backend sent that is not part of the vocabulary.
    Other(String),
}

impl UserRole {
    /// All known roles, in display order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Controller, Self::Client];

    /// The stored (wire) spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Controller => "controller",
            Self::Client => "client",
            Self::Other(s) => s,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Admin => "Admin",
            Self::Controller => "Controller",
            Self::Client => "Client",
            Self::Other(s) => s,
        }
    }

    /// Parse a stored value. Unknown values become [`UserRole::Other`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            "controller" => Self::Controller,
            "client" => Self::Client,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

/// Lifecycle status of a project.
///
/// Older records use `in_progress` or `inProgress`; both collapse onto
/// [`ProjectStatus::InProgress`], whose stored spelling is `in_progress`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    #[default]
    Pending,
    Planning,
    Designing,
    Development,
    Testing,
    Delivery,
    Completed,
    Cancelled,
    /// Legacy alias (`in_progress` / `inProgress`).
    InProgress,
    Other(String),
}

impl ProjectStatus {
    /// The canonical statuses offered by forms and filters.
    pub const ALL: [Self; 8] = [
        Self::Pending,
        Self::Planning,
        Self::Designing,
        Self::Development,
        Self::Testing,
        Self::Delivery,
        Self::Completed,
        Self::Cancelled,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Planning => "planning",
            Self::Designing => "designing",
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Delivery => "delivery",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::InProgress => "in_progress",
            Self::Other(s) => s,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Planning => "Planning",
            Self::Designing => "Designing",
            Self::Development => "Development",
            Self::Testing => "Testing",
            Self::Delivery => "Delivery",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::InProgress => "In Progress",
            Self::Other(s) => s,
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "pending" => Self::Pending,
            "planning" => Self::Planning,
            "designing" => Self::Designing,
            "development" => Self::Development,
            "testing" => Self::Testing,
            "delivery" => Self::Delivery,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            "in_progress" | "inProgress" => Self::InProgress,
            other => Self::Other(other.to_string()),
        }
    }

    /// The summary bucket this status counts towards.
    #[must_use]
    pub fn bucket(&self) -> StatusBucket {
        match self {
            Self::Pending => StatusBucket::Waiting,
            Self::Planning
            | Self::Designing
            | Self::Development
            | Self::Testing
            | Self::Delivery
            | Self::InProgress => StatusBucket::Active,
            Self::Completed => StatusBucket::Completed,
            Self::Cancelled => StatusBucket::Cancelled,
            Self::Other(_) => StatusBucket::Unrecognized,
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ProjectStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Coarse grouping of project statuses used by the dashboard tiles.
///
/// This is the one place the status-to-bucket mapping is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    Waiting,
    Active,
    Completed,
    Cancelled,
    Unrecognized,
}

impl StatusBucket {
    /// Buckets shown on the project dashboard, in display order.
    pub const TILES: [Self; 4] = [Self::Waiting, Self::Active, Self::Completed, Self::Cancelled];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unrecognized => "unrecognized",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Waiting => "Waiting",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Unrecognized => "Unrecognized",
        }
    }
}

/// Kind of an in-app notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum NotificationType {
    Alert,
    Reminder,
    #[default]
    Message,
    ProjectUpdate,
    ServiceUpdate,
    ShopUpdate,
    ProfileUpdate,
    UserUpdate,
    /// Legacy.
    Info,
    /// Legacy.
    Warning,
    /// Legacy.
    Success,
    Other(String),
}

impl NotificationType {
    /// Types an admin can send.
    pub const ALL: [Self; 8] = [
        Self::Alert,
        Self::Reminder,
        Self::Message,
        Self::ProjectUpdate,
        Self::ServiceUpdate,
        Self::ShopUpdate,
        Self::ProfileUpdate,
        Self::UserUpdate,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Alert => "alert",
            Self::Reminder => "reminder",
            Self::Message => "message",
            Self::ProjectUpdate => "project_update",
            Self::ServiceUpdate => "service_update",
            Self::ShopUpdate => "shop_update",
            Self::ProfileUpdate => "profile_update",
            Self::UserUpdate => "user_update",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Other(s) => s,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Alert => "Alert",
            Self::Reminder => "Reminder",
            Self::Message => "Message",
            Self::ProjectUpdate => "Project Update",
            Self::ServiceUpdate => "Service Update",
            Self::ShopUpdate => "Shop Update",
            Self::ProfileUpdate => "Profile Update",
            Self::UserUpdate => "User Update",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Success => "Success",
            Self::Other(s) => s,
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "alert" => Self::Alert,
            "reminder" => Self::Reminder,
            "message" => Self::Message,
            "project_update" => Self::ProjectUpdate,
            "service_update" => Self::ServiceUpdate,
            "shop_update" => Self::ShopUpdate,
            "profile_update" => Self::ProfileUpdate,
            "user_update" => Self::UserUpdate,
            "info" => Self::Info,
            "warning" => Self::Warning,
            "success" => Self::Success,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for NotificationType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<NotificationType> for String {
    fn from(kind: NotificationType) -> Self {
        kind.as_str().to_string()
    }
}
