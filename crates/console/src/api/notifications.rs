//! Notification endpoints scoped to the signed-in user.

use std::future::Future;

use atrium_core::NotificationId;
use serde_json::{Value, json};
use tracing::instrument;

use super::client::{unwrap_list, unwrap_record};
use super::resource::NotificationsApi;
use crate::error::ApiError;

/// The signed-in user's notification inbox.
pub trait Inbox: Send + Sync {
    fn get_my_notifications(&self) -> impl Future<Output = Result<Vec<Value>, ApiError>> + Send;

    fn mark_my_notification_as_read(
        &self,
        id: NotificationId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn mark_all_my_notifications_as_read(
        &self,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn delete_my_notification(
        &self,
        id: NotificationId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Send a notification to another user. Admin and controller only.
    fn send_notification_to_user(
        &self,
        payload: Value,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;
}

impl Inbox for NotificationsApi {
    #[instrument(skip(self))]
    async fn get_my_notifications(&self) -> Result<Vec<Value>, ApiError> {
        let body = self.client().get_json("notifications/my").await?;
        unwrap_list(body)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn mark_my_notification_as_read(&self, id: NotificationId) -> Result<(), ApiError> {
        self.client()
            .post_json(&format!("notifications/my/{id}/read"), &json!({}))
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_all_my_notifications_as_read(&self) -> Result<(), ApiError> {
        self.client()
            .post_json("notifications/my/read-all", &json!({}))
            .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_my_notification(&self, id: NotificationId) -> Result<(), ApiError> {
        self.client()
            .delete(&format!("notifications/my/{id}"))
            .await
    }

    #[instrument(skip(self, payload))]
    async fn send_notification_to_user(&self, payload: Value) -> Result<Value, ApiError> {
        let body = self.client().post_json("notifications/send", &payload).await?;
        Ok(unwrap_record(body))
    }
}
