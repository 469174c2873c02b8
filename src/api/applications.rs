use serde_json::json;
use uuid::Uuid;

use super::models::{Application, AssignInternshipRequest, Internship, NewApplication};
use super::Api;
use crate::error::ClientError;
use crate::types::ApplicationStatus;

pub const APPLICATIONS_PATH: &str = "/candidacies/";

pub fn application_path(id: Uuid) -> String {
    format!("/candidacies/{}/", id)
}

pub fn assign_internship_path(id: Uuid) -> String {
    format!("/candidacies/{}/assign-internship/", id)
}

pub struct ApplicationsClient<'a> {
    pub(crate) api: &'a Api,
}

impl ApplicationsClient<'_> {
    pub async fn list(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>, ClientError> {
        match status {
            Some(status) => {
                self.api
                    .get_query(APPLICATIONS_PATH, &[("status", status)])
                    .await
            }
            None => self.api.get(APPLICATIONS_PATH).await,
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Application, ClientError> {
        self.api.get(&application_path(id)).await
    }

    pub async fn create(&self, application: &NewApplication) -> Result<Application, ClientError> {
        self.api.post(APPLICATIONS_PATH, application).await
    }

    /// Status transition; a refusal carries its reason.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
        reason: Option<&str>,
    ) -> Result<Application, ClientError> {
        let body = match reason {
            Some(reason) => json!({ "status": status, "reason_of_refusal": reason }),
            None => json!({ "status": status }),
        };
        self.api.patch(&application_path(id), &body).await
    }

    pub async fn assign_internship(
        &self,
        id: Uuid,
        assignment: &AssignInternshipRequest,
    ) -> Result<Internship, ClientError> {
        self.api.post(&assign_internship_path(id), assignment).await
    }
}
