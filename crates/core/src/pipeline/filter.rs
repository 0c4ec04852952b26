//! Filter stage.
//!
//! A record is kept when it matches the free-text query AND every active
//! categorical filter. Text matching is a case-insensitive substring test
//! over the record's searchable fields; categorical matching is exact and
//! case-sensitive against the stored value.

use std::collections::BTreeMap;

use super::ListRecord;

/// Value that disables a categorical filter (the "All" option).
pub const ALL: &str = "all";

/// Value that selects records whose field is blank, e.g. projects with no
/// controller assigned. A field stored literally as `"none"` matches too.
pub const NONE: &str = "none";

/// Active categorical filters, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    entries: BTreeMap<String, String>,
}

impl FilterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FilterSet::set`].
    #[must_use]
    pub fn with(mut self, field: &str, value: &str) -> Self {
        self.set(field, value);
        self
    }

    /// Set a filter. `"all"` or an empty value clears it.
    pub fn set(&mut self, field: &str, value: &str) {
        if value.is_empty() || value == ALL {
            self.entries.remove(field);
        } else {
            self.entries.insert(field.to_string(), value.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Current value for a field, if the filter is active.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether a record satisfies every active filter.
    #[must_use]
    pub fn matches<R: ListRecord>(&self, record: &R) -> bool {
        self.entries.iter().all(|(field, value)| {
            record
                .field_value(field)
                .is_some_and(|v| v == value.as_str() || (value == NONE && v.is_empty()))
        })
    }
}

/// Case-insensitive substring match of an already lower-cased query.
#[must_use]
pub fn matches_query<R: ListRecord>(record: &R, lowered_query: &str) -> bool {
    lowered_query.is_empty()
        || record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(lowered_query))
}

/// Return the records matching `query` and `filters`, in input order.
#[must_use]
pub fn filter_records<'a, R: ListRecord>(
    records: &'a [R],
    query: &str,
    filters: &FilterSet,
) -> Vec<&'a R> {
    let lowered = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches_query(*record, &lowered) && filters.matches(*record))
        .collect()
}
