use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::{Announcement, Application, NewAnnouncement};
use super::Api;
use crate::error::ClientError;
use crate::types::AnnouncementStatus;

pub const ANNOUNCEMENTS_PATH: &str = "/internship-announcements/";

pub fn announcement_path(id: Uuid) -> String {
    format!("/internship-announcements/{}/", id)
}

pub fn announcement_applications_path(id: Uuid) -> String {
    format!("/internship-announcements/{}/applications/", id)
}

/// Offer filters, used both as the announcement list query and as the
/// client-side filter state of the internship store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub establishment: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AnnouncementStatus>,
}

impl OfferFilters {
    /// Client-side counterpart of the server query: a missing filter
    /// matches everything.
    pub fn matches(&self, announcement: &Announcement) -> bool {
        let specialty_ok = self
            .specialty
            .as_ref()
            .map_or(true, |s| &announcement.service.specialty == s);
        let establishment_ok = self
            .establishment
            .map_or(true, |id| announcement.establishment.id == id);
        let status_ok = self.status.map_or(true, |s| announcement.status == s);
        specialty_ok && establishment_ok && status_ok
    }
}

pub struct InternshipsClient<'a> {
    pub(crate) api: &'a Api,
}

impl InternshipsClient<'_> {
    pub async fn announcements(
        &self,
        filters: &OfferFilters,
    ) -> Result<Vec<Announcement>, ClientError> {
        self.api.get_query(ANNOUNCEMENTS_PATH, filters).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Announcement, ClientError> {
        self.api.get(&announcement_path(id)).await
    }

    pub async fn create(&self, announcement: &NewAnnouncement) -> Result<Announcement, ClientError> {
        self.api.post(ANNOUNCEMENTS_PATH, announcement).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        announcement: &NewAnnouncement,
    ) -> Result<Announcement, ClientError> {
        self.api.put(&announcement_path(id), announcement).await
    }

    pub async fn applications(&self, id: Uuid) -> Result<Vec<Application>, ClientError> {
        self.api.get(&announcement_applications_path(id)).await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: AnnouncementStatus,
    ) -> Result<Announcement, ClientError> {
        self.api
            .patch(&announcement_path(id), &serde_json::json!({ "status": status }))
            .await
    }
}
