//! Data table component types.
//!
//! These types define the column, filter, and empty-state configuration of
//! the four list pages. Column keys double as sort parameters.

use std::borrow::Cow;

use atrium_core::pipeline::filter::{ALL, NONE};
use atrium_core::pipeline::{ListRecord, distinct_labels};
use atrium_core::{NotificationType, ProjectStatus, StatusBucket, UserRole};
use serde::{Deserialize, Serialize};

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Whether the column is sortable.
    pub sortable: bool,
    /// Whether the column is visible by default.
    pub default_visible: bool,
}

impl TableColumn {
    /// Create a new sortable column.
    #[must_use]
    pub fn sortable(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: true,
            default_visible: true,
        }
    }

    /// Create a new non-sortable column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: false,
            default_visible: true,
        }
    }

    /// Set whether the column is visible by default.
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.default_visible = visible;
        self
    }
}

/// Filter type for data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Single-select dropdown with an "all" entry.
    Select,
    /// Yes/no toggle.
    Boolean,
    /// Free-text field. Options are gathered from the loaded records and
    /// any value is accepted.
    Derived,
}

/// Option for select filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Option value.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl FilterOption {
    /// Create a new filter option.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Filter definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFilter {
    /// Record field the filter matches exactly.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Filter type.
    pub filter_type: FilterType,
    /// Available options, not counting "all".
    pub options: Vec<FilterOption>,
}

impl TableFilter {
    /// Create a select filter.
    #[must_use]
    pub fn select(key: &str, label: &str, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Select,
            options,
        }
    }

    /// Create a yes/no filter over a boolean field.
    #[must_use]
    pub fn boolean(key: &str, label: &str, yes: &str, no: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Boolean,
            options: vec![FilterOption::new("true", yes), FilterOption::new("false", no)],
        }
    }

    /// Create a filter whose options follow the loaded records.
    #[must_use]
    pub fn derived(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Derived,
            options: vec![],
        }
    }

    /// Whether `value` is one of the options, or clears the filter.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        self.filter_type == FilterType::Derived
            || value.is_empty()
            || value == ALL
            || self.options.iter().any(|o| o.value == value)
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Filter definitions.
    pub filters: Vec<TableFilter>,
    /// Search placeholder text.
    pub search_placeholder: String,
    /// Icon for empty state.
    pub empty_icon: String,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
    /// Whether to show filter panel.
    pub has_filters: bool,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            filters: vec![],
            search_placeholder: "Search...".to_string(),
            empty_icon: "ph-list".to_string(),
            empty_title: "No items found".to_string(),
            empty_description: None,
            has_filters: false,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.has_filters = true;
        self.filters.push(filter);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, icon: &str, title: &str, description: Option<&str>) -> Self {
        self.empty_icon = icon.to_string();
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Get default visible columns.
    #[must_use]
    pub fn default_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.default_visible)
            .map(|c| c.key.clone())
            .collect()
    }

    #[must_use]
    pub fn column_named(&self, key: &str) -> Option<&TableColumn> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Whether the table offers sorting on `key`.
    #[must_use]
    pub fn is_sortable(&self, key: &str) -> bool {
        self.column_named(key).is_some_and(|c| c.sortable)
    }

    #[must_use]
    pub fn filter_named(&self, key: &str) -> Option<&TableFilter> {
        self.filters.iter().find(|f| f.key == key)
    }

    /// Rebuild the options of every derived filter from `records`.
    pub fn refresh_derived<R: ListRecord>(&mut self, records: &[R]) {
        for filter in &mut self.filters {
            if filter.filter_type == FilterType::Derived {
                filter.options = derived_options(records, &filter.key);
            }
        }
    }
}

/// Build the users table configuration.
#[must_use]
pub fn users_table_config() -> DataTableConfig {
    DataTableConfig::new("users")
        .column(TableColumn::sortable("name", "Name"))
        .column(TableColumn::sortable("email", "Email"))
        .column(TableColumn::sortable("role", "Role"))
        .column(TableColumn::new("phone", "Phone").visible(false))
        .column(TableColumn::new("verified", "Verified"))
        .column(TableColumn::sortable("created_at", "Joined"))
        .column(TableColumn::sortable("updated_at", "Updated").visible(false))
        .filter(TableFilter::select(
            "role",
            "Role",
            UserRole::ALL
                .iter()
                .map(|r| FilterOption::new(r.as_str(), r.label()))
                .collect(),
        ))
        .filter(TableFilter::boolean(
            "isVerified",
            "Verification",
            "Verified",
            "Unverified",
        ))
        .search_placeholder("Search users by name or email...")
        .empty_state(
            "ph-users",
            "No users found",
            Some("Try adjusting your search or filters"),
        )
}

/// Build the projects table configuration.
#[must_use]
pub fn projects_table_config() -> DataTableConfig {
    DataTableConfig::new("projects")
        .column(TableColumn::sortable("title", "Project"))
        .column(TableColumn::sortable("client_name", "Client"))
        .column(TableColumn::sortable("service_name", "Service"))
        .column(TableColumn::new("controller", "Controller").visible(false))
        .column(TableColumn::sortable("status", "Status"))
        .column(TableColumn::sortable("progress", "Progress"))
        .column(TableColumn::sortable("amount", "Amount"))
        .column(TableColumn::sortable("created_at", "Created"))
        .column(TableColumn::sortable("updated_at", "Updated").visible(false))
        .filter(TableFilter::select(
            "status",
            "Status",
            ProjectStatus::ALL
                .iter()
                .chain([&ProjectStatus::InProgress])
                .map(|s| FilterOption::new(s.as_str(), s.label()))
                .collect(),
        ))
        .filter(TableFilter::select(
            "bucket",
            "Stage",
            StatusBucket::TILES
                .iter()
                .map(|b| FilterOption::new(b.as_str(), b.label()))
                .collect(),
        ))
        .filter(TableFilter::derived("controllerId", "Controller"))
        .search_placeholder("Search projects by title or description...")
        .empty_state(
            "ph-kanban",
            "No projects found",
            Some("Try adjusting your search or filters"),
        )
}

/// Build the services table configuration.
///
/// Categories are free text, so the category filter is derived.
#[must_use]
pub fn services_table_config() -> DataTableConfig {
    DataTableConfig::new("services")
        .column(TableColumn::sortable("name", "Service"))
        .column(TableColumn::sortable("category", "Category"))
        .column(TableColumn::sortable("price", "Price"))
        .column(TableColumn::new("description", "Description").visible(false))
        .column(TableColumn::sortable("created_at", "Created").visible(false))
        .filter(TableFilter::derived("category", "Category"))
        .search_placeholder("Search services by name or description...")
        .empty_state(
            "ph-briefcase",
            "No services found",
            Some("Try adjusting your search or filters"),
        )
}

/// Build the notifications table configuration.
#[must_use]
pub fn notifications_table_config() -> DataTableConfig {
    DataTableConfig::new("notifications")
        .column(TableColumn::sortable("title", "Title"))
        .column(TableColumn::new("message", "Message"))
        .column(TableColumn::sortable("type", "Type"))
        .column(TableColumn::sortable("is_read", "Read"))
        .column(TableColumn::sortable("created_at", "Received"))
        .filter(TableFilter::select(
            "type",
            "Type",
            NotificationType::ALL
                .iter()
                .map(|t| FilterOption::new(t.as_str(), t.label()))
                .collect(),
        ))
        .filter(TableFilter::boolean("isRead", "Status", "Read", "Unread"))
        .search_placeholder("Search notifications...")
        .empty_state("ph-bell", "No notifications", Some("You're all caught up"))
}

/// Distinct values of `key` across `records`, in first-seen order, with a
/// trailing "None" option when some record leaves the field blank.
#[must_use]
pub fn derived_options<R: ListRecord>(records: &[R], key: &str) -> Vec<FilterOption> {
    let value = |r: &R| r.field_value(key).map(Cow::into_owned).unwrap_or_default();
    let mut options: Vec<FilterOption> = distinct_labels(records, &value)
        .iter()
        .map(|v| FilterOption::new(v, v))
        .collect();
    if records.iter().any(|r| value(r).is_empty()) {
        options.push(FilterOption::new(NONE, "None"));
    }
    options
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use atrium_core::ServiceRecord;
    use atrium_core::pipeline::{ProjectSortKey, UserSortKey};

    use super::*;

    #[test]
    fn test_sortable_columns_parse_as_sort_keys() {
        for column in users_table_config().columns.iter().filter(|c| c.sortable) {
            assert!(
                UserSortKey::from_str_param(&column.key).is_some(),
                "{}",
                column.key
            );
        }
        for column in projects_table_config().columns.iter().filter(|c| c.sortable) {
            assert!(
                <atrium_core::ProjectRecord as ListRecord>::sort_key(&column.key).is_some(),
                "{}",
                column.key
            );
        }
        assert_eq!(
            ProjectSortKey::from_str_param("client_name"),
            Some(ProjectSortKey::ClientName)
        );
    }

    #[test]
    fn test_is_sortable() {
        let config = users_table_config();
        assert!(config.is_sortable("email"));
        assert!(!config.is_sortable("phone"));
        assert!(!config.is_sortable("missing"));
    }

    #[test]
    fn test_filter_options_come_from_vocabulary() {
        let config = projects_table_config();
        let status = config.filter_named("status").unwrap();
        assert_eq!(status.options.len(), ProjectStatus::ALL.len() + 1);
        assert!(status.accepts("development"));
        assert!(status.accepts("in_progress"));
        assert!(status.accepts(ALL));
        assert!(!status.accepts("inProgress"));
        assert!(config.has_filters);
    }

    #[test]
    fn test_derived_options_follow_records() {
        let services: Vec<ServiceRecord> = ["web", "web", "mobile", ""]
            .iter()
            .map(|c| ServiceRecord {
                category: (*c).to_string(),
                ..ServiceRecord::default()
            })
            .collect();

        let mut config = services_table_config();
        let category = config.filter_named("category").unwrap();
        assert!(category.options.is_empty());
        assert!(category.accepts("anything"));

        config.refresh_derived(&services);
        let values: Vec<_> = config
            .filter_named("category")
            .unwrap()
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, vec!["web", "mobile", NONE]);
    }

    #[test]
    fn test_default_columns_skip_hidden() {
        let columns = notifications_table_config().default_columns();
        assert!(columns.contains(&"title".to_string()));
        assert_eq!(columns.len(), 5);
    }
}
