//! Create and update round-trips.
//!
//! A [`FormController`] submits one form to a collaborator. While a submit
//! is in flight further submits are ignored; on success the caller is told
//! how long to wait before navigating away, on failure the form stays put
//! with an error banner.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use atrium_core::normalize::normalize_value;
use atrium_core::pipeline::ListRecord;
use atrium_core::{NotificationRecord, UserRole};
use tracing::instrument;

use super::form::{NotificationForm, RecordForm};
use crate::api::{Collaborator, Inbox, RecordId, Resource};
use crate::error::{ConsoleError, ErrorBanner};

/// Submission state of a form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    /// A request is in flight; the submit control is disabled.
    Submitting,
    /// Saved. Navigate away once `redirect_after` has elapsed.
    Succeeded { redirect_after: Duration },
    /// Rejected locally or by the backend. The form keeps its input.
    Failed(ErrorBanner),
}

impl FormState {
    /// Enter `Submitting`. Returns `false` if a submit is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        *self = Self::Submitting;
        true
    }

    pub fn succeed(&mut self, redirect_after: Duration) {
        *self = Self::Succeeded { redirect_after };
    }

    pub fn fail(&mut self, banner: ErrorBanner) {
        *self = Self::Failed(banner);
    }

    /// Close the error banner.
    pub fn dismiss(&mut self) {
        if matches!(self, Self::Failed(_)) {
            *self = Self::Idle;
        }
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    #[must_use]
    pub const fn banner(&self) -> Option<&ErrorBanner> {
        match self {
            Self::Failed(banner) => Some(banner),
            _ => None,
        }
    }
}

/// Result of one submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<R> {
    /// The collaborator accepted the write and returned `record`.
    Saved { record: R, redirect_after: Duration },
    /// The write went through but no record came back, e.g. a `204` to a
    /// create. The caller reloads instead of upserting.
    Accepted { redirect_after: Duration },
    Rejected(ErrorBanner),
    /// Dropped because another submit was in flight.
    Ignored,
}

impl<R> SubmitOutcome<R> {
    #[must_use]
    pub const fn record(&self) -> Option<&R> {
        match self {
            Self::Saved { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Whether the backend accepted the write.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Saved { .. } | Self::Accepted { .. })
    }

    /// Sleep out the success delay, then hand back the saved record, if
    /// one came back.
    pub async fn wait_for_redirect(self) -> Option<R> {
        match self {
            Self::Saved {
                record,
                redirect_after,
            } => {
                tokio::time::sleep(redirect_after).await;
                Some(record)
            }
            Self::Accepted { redirect_after } => {
                tokio::time::sleep(redirect_after).await;
                None
            }
            Self::Rejected(_) | Self::Ignored => None,
        }
    }
}

enum Mode<Id> {
    Create,
    Edit { id: Id, role: UserRole },
}

/// Drives create or edit submissions for one record type.
pub struct FormController<C: Collaborator> {
    collaborator: C,
    redirect_delay: Duration,
    mode: Mode<RecordId<C>>,
    state: Mutex<FormState>,
}

impl<C: Collaborator> FormController<C> {
    /// A controller for a create form.
    #[must_use]
    pub fn create(collaborator: C, redirect_delay: Duration) -> Self {
        Self::with_mode(collaborator, redirect_delay, Mode::Create)
    }

    /// A controller editing record `id` on behalf of a user with `role`.
    #[must_use]
    pub fn edit(collaborator: C, redirect_delay: Duration, id: RecordId<C>, role: UserRole) -> Self {
        Self::with_mode(collaborator, redirect_delay, Mode::Edit { id, role })
    }

    fn with_mode(collaborator: C, redirect_delay: Duration, mode: Mode<RecordId<C>>) -> Self {
        Self {
            collaborator,
            redirect_delay,
            mode,
            state: Mutex::new(FormState::Idle),
        }
    }

    #[must_use]
    pub const fn collaborator(&self) -> &C {
        &self.collaborator
    }

    /// Id of the record being edited, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<RecordId<C>> {
        match &self.mode {
            Mode::Create => None,
            Mode::Edit { id, .. } => Some(*id),
        }
    }

    #[must_use]
    pub fn state(&self) -> FormState {
        self.lock().clone()
    }

    pub fn dismiss_error(&self) {
        self.lock().dismiss();
    }

    /// Fetch the record being edited and pre-populate a form from it. A
    /// create controller gets a blank form without a request.
    ///
    /// # Errors
    ///
    /// Returns a banner if the fetch fails.
    #[instrument(skip(self), fields(resource = <C::Record as Resource>::PATH))]
    pub async fn load<F>(&self) -> Result<F, ErrorBanner>
    where
        F: RecordForm<Record = C::Record>,
    {
        let Mode::Edit { id, .. } = &self.mode else {
            return Ok(F::from_record(&normalize_value(serde_json::Value::Null)));
        };
        match self.collaborator.get_by_id(*id).await {
            Ok(body) => Ok(F::from_record(&normalize_value(body))),
            Err(err) => Err(ErrorBanner::from_error(
                &err.into(),
                &format!("Failed to load {}", <C::Record as Resource>::NOUN),
            )),
        }
    }

    /// Submit `form`. Ignored while another submit is in flight.
    #[instrument(skip(self, form), fields(resource = <C::Record as Resource>::PATH))]
    pub async fn submit<F>(&self, form: &F) -> SubmitOutcome<C::Record>
    where
        F: RecordForm<Record = C::Record> + Sync,
    {
        let accepted = self.lock().begin();
        if !accepted {
            tracing::debug!("Submit ignored; request already in flight");
            return SubmitOutcome::Ignored;
        }

        match self.round_trip(form).await {
            Ok(Some(record)) => {
                tracing::info!(id = %record.id(), "Saved {}", <C::Record as Resource>::NOUN);
                self.lock().succeed(self.redirect_delay);
                SubmitOutcome::Saved {
                    record,
                    redirect_after: self.redirect_delay,
                }
            }
            Ok(None) => {
                tracing::info!("Saved {} without a returned record", <C::Record as Resource>::NOUN);
                self.lock().succeed(self.redirect_delay);
                SubmitOutcome::Accepted {
                    redirect_after: self.redirect_delay,
                }
            }
            Err(err) => {
                let banner = ErrorBanner::from_error(&err, &self.fallback_message());
                self.lock().fail(banner.clone());
                SubmitOutcome::Rejected(banner)
            }
        }
    }

    /// Perform the write. `None` means it succeeded but the saved record
    /// could not be obtained.
    async fn round_trip<F>(&self, form: &F) -> Result<Option<C::Record>, ConsoleError>
    where
        F: RecordForm<Record = C::Record> + Sync,
    {
        let body = match &self.mode {
            Mode::Create => {
                let payload = form.create_payload()?;
                self.collaborator.create(payload).await?
            }
            Mode::Edit { id, role } => {
                let payload = form.update_payload(role)?;
                let body = self.collaborator.update(*id, payload).await?;
                if body.is_object() {
                    body
                } else {
                    self.refetch(*id).await
                }
            }
        };
        Ok(body.is_object().then(|| normalize_value(body)))
    }

    /// Fetch `id` after an update that answered without a body. The write
    /// already happened, so a failure here is logged rather than raised.
    async fn refetch(&self, id: RecordId<C>) -> serde_json::Value {
        tracing::debug!(%id, "Update returned no record; refetching");
        self.collaborator.get_by_id(id).await.unwrap_or_else(|err| {
            tracing::warn!(%id, error = %err, "Failed to refetch updated record");
            serde_json::Value::Null
        })
    }

    fn fallback_message(&self) -> String {
        let verb = match self.mode {
            Mode::Create => "create",
            Mode::Edit { .. } => "update",
        };
        format!("Failed to {verb} {}", <C::Record as Resource>::NOUN)
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Collaborator + std::fmt::Debug> std::fmt::Debug for FormController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("collaborator", &self.collaborator)
            .field("redirect_delay", &self.redirect_delay)
            .field("editing", &self.editing())
            .field("state", &self.state())
            .finish()
    }
}

/// Send a notification to another user through the inbox endpoint.
///
/// # Errors
///
/// Returns a banner if the form is invalid or the backend rejects it.
pub async fn send_notification<I: Inbox>(
    inbox: &I,
    form: &NotificationForm,
) -> Result<NotificationRecord, ErrorBanner> {
    const FALLBACK: &str = "Failed to send notification";
    let payload = form
        .create_payload()
        .map_err(|err| ErrorBanner::from_error(&err, FALLBACK))?;
    match inbox.send_notification_to_user(payload).await {
        Ok(body) => Ok(normalize_value(body)),
        Err(err) => Err(ErrorBanner::from_error(&err.into(), FALLBACK)),
    }
}
