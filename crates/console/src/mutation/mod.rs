//! The mutation protocol: forms, validation, and create/update round-trips.
//!
//! Deletes go through [`crate::list::ListController`], which owns the
//! confirmation dialog and the record list they remove from.

mod form;
mod protocol;

pub use form::{
    MIN_PASSWORD_LEN, NotificationForm, NotificationPayload, ProjectForm, ProjectPayload,
    ProjectUpdate, RecordForm, ServiceForm, ServicePayload, UserForm, UserPayload,
};
pub use protocol::{FormController, FormState, SubmitOutcome, send_notification};
