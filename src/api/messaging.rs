use serde_json::json;
use uuid::Uuid;

use super::models::{Conversation, Message, NewConversation};
use super::Api;
use crate::error::ClientError;

pub const CONVERSATIONS_PATH: &str = "/messaging/conversations/";

pub fn conversation_path(id: Uuid) -> String {
    format!("/messaging/conversations/{}/", id)
}

pub fn conversation_messages_path(id: Uuid) -> String {
    format!("/messaging/conversations/{}/messages/", id)
}

pub fn conversation_mark_read_path(id: Uuid) -> String {
    format!("/messaging/conversations/{}/mark-read/", id)
}

pub fn conversation_participants_path(id: Uuid) -> String {
    format!("/messaging/conversations/{}/participants/", id)
}

pub fn conversation_participant_path(id: Uuid, user_id: Uuid) -> String {
    format!("/messaging/conversations/{}/participants/{}/", id, user_id)
}

pub struct MessagingClient<'a> {
    pub(crate) api: &'a Api,
}

impl MessagingClient<'_> {
    pub async fn conversations(&self) -> Result<Vec<Conversation>, ClientError> {
        self.api.get(CONVERSATIONS_PATH).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Conversation, ClientError> {
        self.api.get(&conversation_path(id)).await
    }

    pub async fn create(&self, conversation: &NewConversation) -> Result<Conversation, ClientError> {
        self.api.post(CONVERSATIONS_PATH, conversation).await
    }

    pub async fn messages(&self, id: Uuid) -> Result<Vec<Message>, ClientError> {
        self.api.get(&conversation_messages_path(id)).await
    }

    pub async fn send(&self, id: Uuid, content: &str) -> Result<Message, ClientError> {
        self.api
            .post(&conversation_messages_path(id), &json!({ "content": content }))
            .await
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<(), ClientError> {
        self.api.post_empty_unit(&conversation_mark_read_path(id)).await
    }

    pub async fn add_participant(&self, id: Uuid, user_id: Uuid) -> Result<(), ClientError> {
        self.api
            .post_unit(&conversation_participants_path(id), &json!({ "user_id": user_id }))
            .await
    }

    pub async fn remove_participant(&self, id: Uuid, user_id: Uuid) -> Result<(), ClientError> {
        self.api.delete_unit(&conversation_participant_path(id, user_id)).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.api.delete_unit(&conversation_path(id)).await
    }
}
