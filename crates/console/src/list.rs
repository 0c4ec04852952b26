//! List pages.
//!
//! A [`ListController`] loads one entity's records through its collaborator
//! and feeds user input into the pure [`ListViewState`] reducer. Sorting and
//! filtering are checked against the page's [`DataTableConfig`] first.
//!
//! Deleting is a two-step protocol: [`ListController::request_delete`] opens
//! the confirmation dialog, and only [`ListController::confirm_delete`] calls
//! the backend. A successful delete removes the record by id without
//! re-fetching; a failed one leaves the list alone and raises the banner.

use atrium_core::normalize::normalize_values;
use atrium_core::pipeline::{ListAction, ListRecord, ListViewState, Page, SortOrder};
use atrium_core::NotificationRecord;
use tracing::instrument;

use crate::api::{Collaborator, Inbox, RecordId, Resource};
use crate::components::data_table::DataTableConfig;
use crate::error::{ApiError, ErrorBanner, ValidationError};
use crate::mutation::SubmitOutcome;

/// Controller for one list page.
pub struct ListController<C: Collaborator> {
    collaborator: C,
    table: DataTableConfig,
    state: ListViewState<C::Record>,
}

impl<C: Collaborator> ListController<C> {
    /// A controller sorted by the record's default key, ascending.
    #[must_use]
    pub fn new(collaborator: C, table: DataTableConfig, per_page: usize) -> Self {
        Self {
            collaborator,
            table,
            state: ListViewState::new(
                <C::Record as ListRecord>::SortKey::default(),
                SortOrder::default(),
                per_page,
            ),
        }
    }

    /// Start from a different sort. Call before loading.
    #[must_use]
    pub fn sorted_by(mut self, key: <C::Record as ListRecord>::SortKey, order: SortOrder) -> Self {
        self.state = ListViewState::new(key, order, self.state.per_page());
        self
    }

    #[must_use]
    pub const fn state(&self) -> &ListViewState<C::Record> {
        &self.state
    }

    #[must_use]
    pub const fn table(&self) -> &DataTableConfig {
        &self.table
    }

    #[must_use]
    pub const fn collaborator(&self) -> &C {
        &self.collaborator
    }

    /// The page of records to render.
    #[must_use]
    pub fn visible(&self) -> Page<&C::Record> {
        self.state.visible()
    }

    /// Fetch and normalize every record. A failure leaves the previous
    /// records in place and raises the banner.
    #[instrument(skip(self), fields(resource = <C::Record as Resource>::PATH))]
    pub async fn load(&mut self) {
        self.state.reduce(ListAction::LoadStarted);
        let result = self.collaborator.get_all().await;
        self.finish_load(result);
    }

    fn finish_load(&mut self, result: Result<Vec<serde_json::Value>, ApiError>) {
        match result {
            Ok(values) => {
                let records = normalize_values::<C::Record>(values);
                tracing::debug!(count = records.len(), "Loaded records");
                self.reduce_records(ListAction::Loaded(records));
            }
            Err(err) => {
                let banner = ErrorBanner::from_error(
                    &err.into(),
                    &format!("Failed to load {}", <C::Record as Resource>::PATH),
                );
                self.state.reduce(ListAction::LoadFailed(banner.message));
            }
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.state.reduce(ListAction::SetQuery(query.to_string()));
    }

    /// Set a categorical filter. `"all"` or an empty value clears it.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownValue` if the table has no such
    /// filter or the value is not one of its options.
    pub fn set_filter(&mut self, field: &str, value: &str) -> Result<(), ValidationError> {
        let Some(filter) = self.table.filter_named(field) else {
            return Err(ValidationError::UnknownValue {
                field: "filter",
                value: field.to_string(),
            });
        };
        if !filter.accepts(value) {
            return Err(ValidationError::UnknownValue {
                field: "filter value",
                value: value.to_string(),
            });
        }
        self.state.reduce(ListAction::SetFilter {
            field: field.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.state.reduce(ListAction::ClearFilters);
    }

    /// Sort by a column header. Clicking the current column flips the order.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownValue` if the column is not sortable.
    pub fn sort_by_column(&mut self, column: &str) -> Result<(), ValidationError> {
        let key = self
            .table
            .is_sortable(column)
            .then(|| <C::Record as ListRecord>::sort_key(column))
            .flatten()
            .ok_or_else(|| ValidationError::UnknownValue {
                field: "sort column",
                value: column.to_string(),
            })?;
        self.state.reduce(ListAction::SortBy(key));
        Ok(())
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.reduce(ListAction::SetPage(page));
    }

    /// Open the confirmation dialog for `id`. Returns whether it opened.
    pub fn request_delete(&mut self, id: RecordId<C>) -> bool {
        self.state.reduce(ListAction::RequestDelete(id));
        self.state
            .delete_dialog()
            .is_some_and(|dialog| dialog.target == id)
    }

    pub fn cancel_delete(&mut self) {
        self.state.reduce(ListAction::CancelDelete);
    }

    /// Delete the record named in the open dialog. Returns whether it was
    /// removed.
    #[instrument(skip(self), fields(resource = <C::Record as Resource>::PATH))]
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.begin_delete() else {
            return false;
        };
        let result = self.collaborator.delete(id).await;
        self.finish_delete(id, result)
    }

    fn begin_delete(&mut self) -> Option<RecordId<C>> {
        let dialog = self.state.delete_dialog().filter(|d| !d.in_flight)?;
        let id = dialog.target;
        self.state.reduce(ListAction::DeleteStarted);
        Some(id)
    }

    fn finish_delete(&mut self, id: RecordId<C>, result: Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => {
                tracing::info!(id = %id, "Deleted {}", <C::Record as Resource>::NOUN);
                self.reduce_records(ListAction::DeleteSucceeded(id));
                true
            }
            Err(err) => {
                let banner = ErrorBanner::from_error(
                    &err.into(),
                    &format!("Failed to delete {}", <C::Record as Resource>::NOUN),
                );
                self.state.reduce(ListAction::DeleteFailed(banner.message));
                false
            }
        }
    }

    /// Show a record returned by a successful create or update.
    pub fn apply_saved(&mut self, record: C::Record) {
        self.reduce_records(ListAction::Upserted(record));
    }

    /// Reflect a form submit in the list. A saved record is upserted; a
    /// write that came back without a record triggers a reload.
    pub async fn apply_outcome(&mut self, outcome: SubmitOutcome<C::Record>) {
        match outcome {
            SubmitOutcome::Saved { record, .. } => self.apply_saved(record),
            SubmitOutcome::Accepted { .. } => self.load().await,
            SubmitOutcome::Rejected(_) | SubmitOutcome::Ignored => {}
        }
    }

    pub fn dismiss_error(&mut self) {
        self.state.reduce(ListAction::DismissError);
    }

    /// Apply an action that changes the records, then rebuild the options
    /// of filters derived from them.
    fn reduce_records(&mut self, action: ListAction<C::Record>) {
        self.state.reduce(action);
        self.table.refresh_derived(self.state.records());
    }
}

impl<C> ListController<C>
where
    C: Collaborator<Record = NotificationRecord> + Inbox,
{
    /// Load the signed-in user's inbox instead of every notification.
    #[instrument(skip(self))]
    pub async fn load_mine(&mut self) {
        self.state.reduce(ListAction::LoadStarted);
        let result = self.collaborator.get_my_notifications().await;
        self.finish_load(result);
    }

    /// Mark one notification read.
    ///
    /// # Errors
    ///
    /// Returns the banner raised when the backend rejects the call.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn mark_read(&mut self, id: RecordId<C>) -> Result<(), ErrorBanner> {
        if let Err(err) = self.collaborator.mark_my_notification_as_read(id).await {
            return Err(self.raise(err, "Failed to mark notification as read"));
        }
        let updated = self
            .state
            .records()
            .iter()
            .find(|n| n.id == id)
            .map(|n| NotificationRecord {
                is_read: true,
                ..n.clone()
            });
        if let Some(record) = updated {
            self.reduce_records(ListAction::Upserted(record));
        }
        Ok(())
    }

    /// Mark every notification read.
    ///
    /// # Errors
    ///
    /// Returns the banner raised when the backend rejects the call.
    #[instrument(skip(self))]
    pub async fn mark_all_read(&mut self) -> Result<(), ErrorBanner> {
        if let Err(err) = self.collaborator.mark_all_my_notifications_as_read().await {
            return Err(self.raise(err, "Failed to mark notifications as read"));
        }
        let records = self
            .state
            .records()
            .iter()
            .map(|n| NotificationRecord {
                is_read: true,
                ..n.clone()
            })
            .collect();
        self.reduce_records(ListAction::Loaded(records));
        Ok(())
    }

    /// Confirm the open dialog through the inbox endpoint.
    #[instrument(skip(self))]
    pub async fn confirm_delete_mine(&mut self) -> bool {
        let Some(id) = self.begin_delete() else {
            return false;
        };
        let result = self.collaborator.delete_my_notification(id).await;
        self.finish_delete(id, result)
    }

    fn raise(&mut self, err: ApiError, fallback: &str) -> ErrorBanner {
        let banner = ErrorBanner::from_error(&err.into(), fallback);
        self.state.reduce(ListAction::LoadFailed(banner.message.clone()));
        banner
    }
}

impl<C: Collaborator + std::fmt::Debug> std::fmt::Debug for ListController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("collaborator", &self.collaborator)
            .field("table", &self.table.table_id)
            .field("records", &self.state.records().len())
            .finish_non_exhaustive()
    }
}
