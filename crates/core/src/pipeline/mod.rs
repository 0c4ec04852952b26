//! The client-side list pipeline.
//!
//! Every list page runs the same stages over its canonical records:
//!
//! 1. [`filter`] - free-text query plus exact-match categorical filters
//! 2. [`sort`] - type-aware comparison on one key, ascending or descending
//! 3. [`page`] - slicing the ordered list into pages
//!
//! [`aggregate`] computes summary tiles over the *unfiltered* records and
//! [`view`] ties everything together as a pure reducer.

pub mod aggregate;
pub mod entities;
pub mod filter;
pub mod page;
pub mod sort;
pub mod view;

use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;

pub use aggregate::{SummaryTile, aggregate, distinct_labels, percentage, tile};
pub use entities::{
    NotificationSortKey, ProjectSortKey, ServiceSortKey, UserSortKey, category_summary,
    role_summary, status_bucket_summary, unread_summary,
};
pub use filter::{FilterSet, filter_records, matches_query};
pub use page::{Page, paginate};
pub use sort::{Comparable, SortOrder, collate, sort_records, sorted};
pub use view::{DeleteDialog, ListAction, ListViewState};

/// A canonical record that can flow through the list pipeline.
pub trait ListRecord: Clone {
    /// Stable identity.
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;
    /// Columns this record can be sorted by.
    type SortKey: Copy + Eq + Default + fmt::Debug + Send + Sync + 'static;

    fn id(&self) -> Self::Id;

    /// Fields the free-text query is matched against. Missing values are `""`.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of a categorical field as stored, or `None` for unknown fields.
    fn field_value(&self, field: &str) -> Option<Cow<'_, str>>;

    /// Parse a column parameter into a sort key.
    fn sort_key(param: &str) -> Option<Self::SortKey>;

    /// Comparison value for a sort key.
    fn sort_value(&self, key: Self::SortKey) -> Comparable<'_>;

    /// Short human label, used to name the record in confirmation dialogs.
    fn label(&self) -> String;
}
