use serde_json::{json, Value};
use uuid::Uuid;

use super::models::{Establishment, HospitalService};
use super::Api;
use crate::error::ClientError;

pub const ESTABLISHMENTS_PATH: &str = "/establishments/";

pub fn establishment_path(id: Uuid) -> String {
    format!("/establishments/{}/", id)
}

pub fn establishment_services_path(id: Uuid) -> String {
    format!("/establishments/{}/services/", id)
}

pub fn establishment_stats_path(id: Uuid) -> String {
    format!("/establishments/{}/stats/", id)
}

pub fn hospital_service_path(id: Uuid) -> String {
    format!("/hospital-services/{}/", id)
}

pub struct HospitalsClient<'a> {
    pub(crate) api: &'a Api,
}

impl HospitalsClient<'_> {
    pub async fn establishments(&self) -> Result<Vec<Establishment>, ClientError> {
        self.api.get(ESTABLISHMENTS_PATH).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Establishment, ClientError> {
        self.api.get(&establishment_path(id)).await
    }

    pub async fn services(&self, id: Uuid) -> Result<Vec<HospitalService>, ClientError> {
        self.api.get(&establishment_services_path(id)).await
    }

    pub async fn stats(&self, id: Uuid) -> Result<Value, ClientError> {
        self.api.get(&establishment_stats_path(id)).await
    }

    pub async fn update_service_capacity(
        &self,
        service_id: Uuid,
        capacity: u32,
    ) -> Result<HospitalService, ClientError> {
        self.api
            .patch(&hospital_service_path(service_id), &json!({ "capacity": capacity }))
            .await
    }
}
