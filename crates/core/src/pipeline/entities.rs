//! Pipeline bindings for the four canonical records.
//!
//! Searchable fields, categorical fields, sort keys, and the summary tiles
//! each list page shows above its table.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::aggregate::{SummaryTile, aggregate, distinct_labels, tile};
use super::{Comparable, ListRecord};
use crate::records::{NotificationRecord, ProjectRecord, ServiceRecord, UserRecord};
use crate::types::{NotificationId, ProjectId, ServiceId, StatusBucket, UserId, UserRole};

fn flag_value(flag: bool) -> Cow<'static, str> {
    Cow::Borrowed(if flag { "true" } else { "false" })
}

// =============================================================================
// Sort Keys
// =============================================================================

/// Sort keys for the user list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserSortKey {
    Name,
    Email,
    Role,
    #[default]
    CreatedAt,
    UpdatedAt,
    Id,
}

impl UserSortKey {
    /// Parse a sort key from a URL parameter string.
    #[must_use]
    pub fn from_str_param(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "name" | "first_name" | "firstname" => Some(Self::Name),
            "email" => Some(Self::Email),
            "role" => Some(Self::Role),
            "created_at" | "createdat" | "created" => Some(Self::CreatedAt),
            "updated_at" | "updatedat" | "updated" => Some(Self::UpdatedAt),
            "id" => Some(Self::Id),
            _ => None,
        }
    }

    /// Get the URL parameter string for this sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Role => "role",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Id => "id",
        }
    }
}

/// Sort keys for the project list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectSortKey {
    Title,
    Status,
    Progress,
    Amount,
    ClientName,
    ServiceName,
    #[default]
    CreatedAt,
    UpdatedAt,
    Id,
}

impl ProjectSortKey {
    /// Parse a sort key from a URL parameter string.
    #[must_use]
    pub fn from_str_param(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "title" => Some(Self::Title),
            "status" => Some(Self::Status),
            "progress" => Some(Self::Progress),
            "amount" => Some(Self::Amount),
            "client_name" | "clientname" | "client" => Some(Self::ClientName),
            "service_name" | "servicename" | "service" => Some(Self::ServiceName),
            "created_at" | "createdat" | "created" => Some(Self::CreatedAt),
            "updated_at" | "updatedat" | "updated" => Some(Self::UpdatedAt),
            "id" => Some(Self::Id),
            _ => None,
        }
    }

    /// Get the URL parameter string for this sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Status => "status",
            Self::Progress => "progress",
            Self::Amount => "amount",
            Self::ClientName => "client_name",
            Self::ServiceName => "service_name",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Id => "id",
        }
    }
}

/// Sort keys for the service catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceSortKey {
    #[default]
    Name,
    Category,
    Price,
    CreatedAt,
    UpdatedAt,
    Id,
}

impl ServiceSortKey {
    /// Parse a sort key from a URL parameter string.
    #[must_use]
    pub fn from_str_param(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "name" => Some(Self::Name),
            "category" => Some(Self::Category),
            "price" => Some(Self::Price),
            "created_at" | "createdat" | "created" => Some(Self::CreatedAt),
            "updated_at" | "updatedat" | "updated" => Some(Self::UpdatedAt),
            "id" => Some(Self::Id),
            _ => None,
        }
    }

    /// Get the URL parameter string for this sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Category => "category",
            Self::Price => "price",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Id => "id",
        }
    }
}

/// Sort keys for the notification list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationSortKey {
    Title,
    Type,
    IsRead,
    #[default]
    CreatedAt,
    Id,
}

impl NotificationSortKey {
    /// Parse a sort key from a URL parameter string.
    #[must_use]
    pub fn from_str_param(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "title" => Some(Self::Title),
            "type" => Some(Self::Type),
            "is_read" | "isread" | "read" => Some(Self::IsRead),
            "created_at" | "createdat" | "created" => Some(Self::CreatedAt),
            "id" => Some(Self::Id),
            _ => None,
        }
    }

    /// Get the URL parameter string for this sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Type => "type",
            Self::IsRead => "is_read",
            Self::CreatedAt => "created_at",
            Self::Id => "id",
        }
    }
}

// =============================================================================
// ListRecord
// =============================================================================

impl ListRecord for UserRecord {
    type Id = UserId;
    type SortKey = UserSortKey;

    fn id(&self) -> UserId {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or(""),
            &self.email,
        ]
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "role" => Some(Cow::Borrowed(self.role.as_str())),
            "isVerified" => Some(flag_value(self.is_verified)),
            _ => None,
        }
    }

    fn sort_key(param: &str) -> Option<UserSortKey> {
        UserSortKey::from_str_param(param)
    }

    fn sort_value(&self, key: UserSortKey) -> Comparable<'_> {
        match key {
            UserSortKey::Name => Comparable::from(self.display_name()),
            UserSortKey::Email => Comparable::from(self.email.as_str()),
            UserSortKey::Role => Comparable::from(self.role.as_str()),
            UserSortKey::CreatedAt => Comparable::from(self.created_at),
            UserSortKey::UpdatedAt => Comparable::from(self.updated_at),
            UserSortKey::Id => Comparable::from(self.id.as_i64()),
        }
    }

    fn label(&self) -> String {
        self.display_name()
    }
}

impl ListRecord for ProjectRecord {
    type Id = ProjectId;
    type SortKey = ProjectSortKey;

    fn id(&self) -> ProjectId {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.description]
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "bucket" => Some(Cow::Borrowed(self.status.bucket().as_str())),
            "serviceId" => Some(Cow::Owned(self.service_id.to_string())),
            "clientId" => Some(Cow::Owned(self.client_id.to_string())),
            "controllerId" => Some(Cow::Owned(
                self.controller_id.map(|id| id.to_string()).unwrap_or_default(),
            )),
            _ => None,
        }
    }

    fn sort_key(param: &str) -> Option<ProjectSortKey> {
        ProjectSortKey::from_str_param(param)
    }

    fn sort_value(&self, key: ProjectSortKey) -> Comparable<'_> {
        match key {
            ProjectSortKey::Title => Comparable::from(self.title.as_str()),
            ProjectSortKey::Status => Comparable::from(self.status.as_str()),
            ProjectSortKey::Progress => Comparable::from(self.progress),
            ProjectSortKey::Amount => Comparable::from(self.amount),
            ProjectSortKey::ClientName => Comparable::from(self.client_name.as_deref()),
            ProjectSortKey::ServiceName => Comparable::from(self.service_name.as_deref()),
            ProjectSortKey::CreatedAt => Comparable::from(self.created_at),
            ProjectSortKey::UpdatedAt => Comparable::from(self.updated_at),
            ProjectSortKey::Id => Comparable::from(self.id.as_i64()),
        }
    }

    fn label(&self) -> String {
        self.title.clone()
    }
}

impl ListRecord for ServiceRecord {
    type Id = ServiceId;
    type SortKey = ServiceSortKey;

    fn id(&self) -> ServiceId {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.description]
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "category" => Some(Cow::Borrowed(&self.category)),
            _ => None,
        }
    }

    fn sort_key(param: &str) -> Option<ServiceSortKey> {
        ServiceSortKey::from_str_param(param)
    }

    fn sort_value(&self, key: ServiceSortKey) -> Comparable<'_> {
        match key {
            ServiceSortKey::Name => Comparable::from(self.name.as_str()),
            ServiceSortKey::Category => Comparable::from(self.category.as_str()),
            ServiceSortKey::Price => Comparable::from(self.price),
            ServiceSortKey::CreatedAt => Comparable::from(self.created_at),
            ServiceSortKey::UpdatedAt => Comparable::from(self.updated_at),
            ServiceSortKey::Id => Comparable::from(self.id.as_i64()),
        }
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl ListRecord for NotificationRecord {
    type Id = NotificationId;
    type SortKey = NotificationSortKey;

    fn id(&self) -> NotificationId {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.message]
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "type" => Some(Cow::Borrowed(self.kind.as_str())),
            "isRead" => Some(flag_value(self.is_read)),
            "userId" => Some(Cow::Owned(self.user_id.to_string())),
            _ => None,
        }
    }

    fn sort_key(param: &str) -> Option<NotificationSortKey> {
        NotificationSortKey::from_str_param(param)
    }

    fn sort_value(&self, key: NotificationSortKey) -> Comparable<'_> {
        match key {
            NotificationSortKey::Title => Comparable::from(self.title.as_str()),
            NotificationSortKey::Type => Comparable::from(self.kind.as_str()),
            NotificationSortKey::IsRead => Comparable::from(i64::from(self.is_read)),
            NotificationSortKey::CreatedAt => Comparable::from(self.created_at),
            NotificationSortKey::Id => Comparable::from(self.id.as_i64()),
        }
    }

    fn label(&self) -> String {
        self.title.clone()
    }
}

// =============================================================================
// Summary Tiles
// =============================================================================

/// One tile per canonical role.
#[must_use]
pub fn role_summary(users: &[UserRecord]) -> Vec<SummaryTile> {
    let roles = UserRole::ALL;
    let labels: Vec<&str> = roles.iter().map(UserRole::as_str).collect();
    aggregate(users, &labels, |user| user.role.as_str().to_string())
}

/// One tile per status bucket.
#[must_use]
pub fn status_bucket_summary(projects: &[ProjectRecord]) -> Vec<SummaryTile> {
    let labels: Vec<&str> = StatusBucket::TILES.iter().map(|b| b.as_str()).collect();
    aggregate(projects, &labels, |project| {
        project.status.bucket().as_str().to_string()
    })
}

/// One tile per category, in order of first appearance.
#[must_use]
pub fn category_summary(services: &[ServiceRecord]) -> Vec<SummaryTile> {
    let labels = distinct_labels(services, |service| service.category.clone());
    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
    aggregate(services, &labels, |service| service.category.clone())
}

/// Count of unread notifications.
#[must_use]
pub fn unread_summary(notifications: &[NotificationRecord]) -> SummaryTile {
    tile(notifications, "unread", |n| !n.is_read)
}
