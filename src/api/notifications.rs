use uuid::Uuid;

use super::models::{Notification, UnreadCount};
use super::Api;
use crate::error::ClientError;

pub const NOTIFICATIONS_PATH: &str = "/notifications/";
pub const UNREAD_COUNT_PATH: &str = "/notifications/unread-count/";
pub const MARK_ALL_READ_PATH: &str = "/notifications/mark-all-read/";
pub const CLEAR_ALL_PATH: &str = "/notifications/clear-all/";

pub fn notification_path(id: Uuid) -> String {
    format!("/notifications/{}/", id)
}

pub fn notification_mark_read_path(id: Uuid) -> String {
    format!("/notifications/{}/mark-read/", id)
}

pub struct NotificationsClient<'a> {
    pub(crate) api: &'a Api,
}

impl NotificationsClient<'_> {
    pub async fn list(&self) -> Result<Vec<Notification>, ClientError> {
        self.api.get(NOTIFICATIONS_PATH).await
    }

    pub async fn unread_count(&self) -> Result<UnreadCount, ClientError> {
        self.api.get(UNREAD_COUNT_PATH).await
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<(), ClientError> {
        self.api.patch_empty_unit(&notification_mark_read_path(id)).await
    }

    pub async fn mark_all_read(&self) -> Result<(), ClientError> {
        self.api.post_empty_unit(MARK_ALL_READ_PATH).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.api.delete_unit(&notification_path(id)).await
    }

    pub async fn clear_all(&self) -> Result<(), ClientError> {
        self.api.post_empty_unit(CLEAR_ALL_PATH).await
    }
}
