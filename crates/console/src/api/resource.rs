//! Generic CRUD collaborator over one REST collection.

use std::marker::PhantomData;

use atrium_core::{NotificationRecord, ProjectRecord, ServiceRecord, UserRecord};
use serde_json::Value;
use tracing::instrument;

use super::client::{RestClient, unwrap_list, unwrap_record};
use super::{Collaborator, RecordId, Resource};
use crate::error::ApiError;

/// Users collaborator.
pub type UsersApi = ResourceApi<UserRecord>;
/// Projects collaborator.
pub type ProjectsApi = ResourceApi<ProjectRecord>;
/// Services collaborator.
pub type ServicesApi = ResourceApi<ServiceRecord>;
/// Notifications collaborator.
pub type NotificationsApi = ResourceApi<NotificationRecord>;

/// CRUD over the collection at `R::PATH`.
pub struct ResourceApi<R> {
    client: RestClient,
    _record: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceApi<R> {
    #[must_use]
    pub const fn new(client: RestClient) -> Self {
        Self {
            client,
            _record: PhantomData,
        }
    }

    #[must_use]
    pub const fn client(&self) -> &RestClient {
        &self.client
    }

    pub(crate) fn item_path(id: impl std::fmt::Display) -> String {
        format!("{}/{id}", R::PATH)
    }
}

impl<R> Clone for ResourceApi<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Resource> std::fmt::Debug for ResourceApi<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceApi")
            .field("path", &R::PATH)
            .field("client", &self.client)
            .finish()
    }
}

impl<R: Resource> Collaborator for ResourceApi<R> {
    type Record = R;

    #[instrument(skip(self), fields(resource = R::PATH))]
    async fn get_all(&self) -> Result<Vec<Value>, ApiError> {
        let body = self.client.get_json(R::PATH).await?;
        let records = unwrap_list(body)?;
        tracing::debug!(count = records.len(), "Fetched records");
        Ok(records)
    }

    #[instrument(skip(self), fields(resource = R::PATH, id = %id))]
    async fn get_by_id(&self, id: RecordId<Self>) -> Result<Value, ApiError> {
        let body = self.client.get_json(&Self::item_path(id)).await?;
        Ok(unwrap_record(body))
    }

    #[instrument(skip(self, payload), fields(resource = R::PATH))]
    async fn create(&self, payload: Value) -> Result<Value, ApiError> {
        let body = self.client.post_json(R::PATH, &payload).await?;
        Ok(unwrap_record(body))
    }

    #[instrument(skip(self, payload), fields(resource = R::PATH, id = %id))]
    async fn update(&self, id: RecordId<Self>, payload: Value) -> Result<Value, ApiError> {
        let body = self.client.put_json(&Self::item_path(id), &payload).await?;
        Ok(unwrap_record(body))
    }

    #[instrument(skip(self), fields(resource = R::PATH, id = %id))]
    async fn delete(&self, id: RecordId<Self>) -> Result<(), ApiError> {
        self.client.delete(&Self::item_path(id)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use atrium_core::ProjectId;

    use super::*;
    use crate::config::ApiConfig;

    #[test]
    fn test_item_paths() {
        assert_eq!(ProjectsApi::item_path(ProjectId::new(12)), "projects/12");
        assert_eq!(UsersApi::item_path(3), "users/3");
    }

    #[test]
    fn test_item_url_resolves_under_base() {
        let client = RestClient::new(&ApiConfig::new("https://api.test/api").unwrap()).unwrap();
        let api = ServicesApi::new(client);
        let url = api.client().url(&ServicesApi::item_path(5)).unwrap();
        assert_eq!(url.as_str(), "https://api.test/api/services/5");
    }
}
