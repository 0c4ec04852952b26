//! REST collaborators.
//!
//! Every entity is served by the same conventional REST shape:
//!
//! ```text
//! GET    /{resource}        -> get_all
//! GET    /{resource}/{id}   -> get_by_id
//! POST   /{resource}        -> create
//! PUT    /{resource}/{id}   -> update
//! DELETE /{resource}/{id}   -> delete
//! ```
//!
//! Collaborators hand back raw JSON; turning it into canonical records is
//! the normalizer's job.

mod client;
mod notifications;
mod resource;
mod uploads;

pub use client::{RestClient, unwrap_list, unwrap_record};
pub use notifications::Inbox;
pub use resource::{NotificationsApi, ProjectsApi, ResourceApi, ServicesApi, UsersApi};
pub use uploads::{UploadFile, UploadResult};

use std::future::Future;

use atrium_core::pipeline::ListRecord;
use atrium_core::{Canonical, NotificationRecord, ProjectRecord, ServiceRecord, UserRecord};
use serde_json::Value;

use crate::error::ApiError;

/// A canonical record served by a REST collection.
pub trait Resource: Canonical + ListRecord + Send + Sync + 'static {
    /// Collection path relative to the API base.
    const PATH: &'static str;
    /// Singular noun for user-facing messages.
    const NOUN: &'static str;
}

impl Resource for UserRecord {
    const PATH: &'static str = "users";
    const NOUN: &'static str = "user";
}

impl Resource for ProjectRecord {
    const PATH: &'static str = "projects";
    const NOUN: &'static str = "project";
}

impl Resource for ServiceRecord {
    const PATH: &'static str = "services";
    const NOUN: &'static str = "service";
}

impl Resource for NotificationRecord {
    const PATH: &'static str = "notifications";
    const NOUN: &'static str = "notification";
}

/// Identity type of a collaborator's records.
pub type RecordId<C> = <<C as Collaborator>::Record as ListRecord>::Id;

/// The per-entity backend contract.
pub trait Collaborator: Send + Sync {
    type Record: Resource;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Value>, ApiError>> + Send;

    fn get_by_id(&self, id: RecordId<Self>)
    -> impl Future<Output = Result<Value, ApiError>> + Send;

    fn create(&self, payload: Value) -> impl Future<Output = Result<Value, ApiError>> + Send;

    fn update(
        &self,
        id: RecordId<Self>,
        payload: Value,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;

    fn delete(&self, id: RecordId<Self>) -> impl Future<Output = Result<(), ApiError>> + Send;
}
