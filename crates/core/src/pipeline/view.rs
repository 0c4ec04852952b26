//! List view state.
//!
//! [`ListViewState`] holds everything a list page needs to render: the
//! canonical records, the active query, filters and sort, the current page,
//! the loading flag, the error banner, and the delete-confirmation dialog.
//! It changes only through [`ListViewState::reduce`].

use super::ListRecord;
use super::filter::{FilterSet, filter_records};
use super::page::{Page, paginate};
use super::sort::{SortOrder, sort_records};

/// The delete-confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDialog<Id> {
    pub target: Id,
    /// Names the record being deleted.
    pub label: String,
    /// Set while the delete call is running; the dialog ignores input.
    pub in_flight: bool,
}

/// Inputs to the list reducer.
#[derive(Debug, Clone)]
pub enum ListAction<R: ListRecord> {
    LoadStarted,
    Loaded(Vec<R>),
    LoadFailed(String),
    SetQuery(String),
    SetFilter { field: String, value: String },
    ClearFilters,
    /// Selecting the current key flips the direction.
    SortBy(R::SortKey),
    SetPage(usize),
    RequestDelete(R::Id),
    CancelDelete,
    DeleteStarted,
    DeleteSucceeded(R::Id),
    DeleteFailed(String),
    /// A record came back from a successful create or update.
    Upserted(R),
    DismissError,
}

#[derive(Debug, Clone)]
pub struct ListViewState<R: ListRecord> {
    records: Vec<R>,
    query: String,
    filters: FilterSet,
    sort_key: R::SortKey,
    sort_order: SortOrder,
    page: usize,
    per_page: usize,
    loading: bool,
    error: Option<String>,
    delete_dialog: Option<DeleteDialog<R::Id>>,
}

impl<R: ListRecord> ListViewState<R> {
    #[must_use]
    pub fn new(sort_key: R::SortKey, sort_order: SortOrder, per_page: usize) -> Self {
        Self {
            records: Vec::new(),
            query: String::new(),
            filters: FilterSet::new(),
            sort_key,
            sort_order,
            page: 1,
            per_page: per_page.max(1),
            loading: false,
            error: None,
            delete_dialog: None,
        }
    }

    /// All loaded records, unfiltered. Summary tiles are computed from these.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterSet {
        &self.filters
    }

    #[must_use]
    pub const fn sort(&self) -> (R::SortKey, SortOrder) {
        (self.sort_key, self.sort_order)
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn delete_dialog(&self) -> Option<&DeleteDialog<R::Id>> {
        self.delete_dialog.as_ref()
    }

    /// Filtered and sorted records, before pagination.
    #[must_use]
    pub fn matching(&self) -> Vec<&R> {
        let mut items = filter_records(&self.records, &self.query, &self.filters);
        sort_records(&mut items, self.sort_key, self.sort_order);
        items
    }

    /// The page of records to render.
    #[must_use]
    pub fn visible(&self) -> Page<&R> {
        paginate(self.matching(), self.page, self.per_page)
    }

    pub fn reduce(&mut self, action: ListAction<R>) {
        match action {
            ListAction::LoadStarted => {
                self.loading = true;
                self.error = None;
            }
            ListAction::Loaded(records) => {
                self.records = records;
                self.loading = false;
                self.clamp_page();
            }
            ListAction::LoadFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            ListAction::SetQuery(query) => {
                self.query = query;
                self.page = 1;
            }
            ListAction::SetFilter { field, value } => {
                self.filters.set(&field, &value);
                self.page = 1;
            }
            ListAction::ClearFilters => {
                self.filters.clear();
                self.page = 1;
            }
            ListAction::SortBy(key) => {
                if key == self.sort_key {
                    self.sort_order = self.sort_order.toggled();
                } else {
                    self.sort_key = key;
                    self.sort_order = SortOrder::Asc;
                }
                self.page = 1;
            }
            ListAction::SetPage(page) => {
                self.page = page;
                self.clamp_page();
            }
            ListAction::RequestDelete(id) => {
                if self.delete_dialog.as_ref().is_some_and(|d| d.in_flight) {
                    return;
                }
                self.delete_dialog = self
                    .records
                    .iter()
                    .find(|r| r.id() == id)
                    .map(|r| DeleteDialog {
                        target: id,
                        label: r.label(),
                        in_flight: false,
                    });
            }
            ListAction::CancelDelete => {
                if self.delete_dialog.as_ref().is_some_and(|d| !d.in_flight) {
                    self.delete_dialog = None;
                }
            }
            ListAction::DeleteStarted => {
                if let Some(dialog) = self.delete_dialog.as_mut() {
                    dialog.in_flight = true;
                }
            }
            ListAction::DeleteSucceeded(id) => {
                self.records.retain(|r| r.id() != id);
                self.delete_dialog = None;
                self.clamp_page();
            }
            ListAction::DeleteFailed(message) => {
                self.delete_dialog = None;
                self.error = Some(message);
            }
            ListAction::Upserted(record) => {
                let id = record.id();
                if let Some(existing) = self.records.iter_mut().find(|r| r.id() == id) {
                    *existing = record;
                } else {
                    self.records.insert(0, record);
                }
            }
            ListAction::DismissError => {
                self.error = None;
            }
        }
    }

    /// Keep `page` within `1..=total_pages` of the filtered list.
    fn clamp_page(&mut self) {
        let total = filter_records(&self.records, &self.query, &self.filters).len();
        let total_pages = total.div_ceil(self.per_page.max(1)).max(1);
        self.page = self.page.clamp(1, total_pages);
    }
}
