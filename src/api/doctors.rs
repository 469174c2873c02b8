use uuid::Uuid;

use super::models::{Doctor, Evaluation, NewEvaluation, Student};
use super::Api;
use crate::error::ClientError;

pub const DOCTORS_PATH: &str = "/doctors/";
pub const EVALUATIONS_PATH: &str = "/evaluations/";

pub fn doctor_path(id: Uuid) -> String {
    format!("/doctors/{}/", id)
}

pub fn doctor_interns_path(id: Uuid) -> String {
    format!("/doctors/{}/interns/", id)
}

pub fn doctor_evaluations_path(id: Uuid) -> String {
    format!("/doctors/{}/evaluations/", id)
}

pub fn evaluation_path(id: Uuid) -> String {
    format!("/evaluations/{}/", id)
}

pub struct DoctorsClient<'a> {
    pub(crate) api: &'a Api,
}

impl DoctorsClient<'_> {
    pub async fn list(&self) -> Result<Vec<Doctor>, ClientError> {
        self.api.get(DOCTORS_PATH).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Doctor, ClientError> {
        self.api.get(&doctor_path(id)).await
    }

    pub async fn interns(&self, id: Uuid) -> Result<Vec<Student>, ClientError> {
        self.api.get(&doctor_interns_path(id)).await
    }

    pub async fn evaluations(&self, id: Uuid) -> Result<Vec<Evaluation>, ClientError> {
        self.api.get(&doctor_evaluations_path(id)).await
    }

    pub async fn create_evaluation(
        &self,
        evaluation: &NewEvaluation,
    ) -> Result<Evaluation, ClientError> {
        self.api.post(EVALUATIONS_PATH, evaluation).await
    }

    pub async fn update_evaluation(
        &self,
        id: Uuid,
        evaluation: &NewEvaluation,
    ) -> Result<Evaluation, ClientError> {
        self.api.put(&evaluation_path(id), evaluation).await
    }
}
