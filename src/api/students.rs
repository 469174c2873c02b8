use serde_json::Value;
use uuid::Uuid;

use super::models::{Application, Document, Evaluation, Internship, NewDocument, NewStudent, Student};
use super::Api;
use crate::error::ClientError;

pub const STUDENTS_PATH: &str = "/students/";
pub const DOCUMENTS_PATH: &str = "/documents/";

pub fn student_path(id: Uuid) -> String {
    format!("/students/{}/", id)
}

pub fn student_applications_path(id: Uuid) -> String {
    format!("/students/{}/applications/", id)
}

pub fn student_internships_path(id: Uuid) -> String {
    format!("/students/{}/internships/", id)
}

pub fn student_documents_path(id: Uuid) -> String {
    format!("/students/{}/documents/", id)
}

pub fn student_evaluations_path(id: Uuid) -> String {
    format!("/students/{}/evaluations/", id)
}

pub fn student_schedule_path(id: Uuid) -> String {
    format!("/students/{}/schedule/", id)
}

pub fn student_stats_path(id: Uuid) -> String {
    format!("/students/{}/stats/", id)
}

pub struct StudentsClient<'a> {
    pub(crate) api: &'a Api,
}

impl StudentsClient<'_> {
    pub async fn list(&self) -> Result<Vec<Student>, ClientError> {
        self.api.get(STUDENTS_PATH).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Student, ClientError> {
        self.api.get(&student_path(id)).await
    }

    pub async fn create(&self, student: &NewStudent) -> Result<Student, ClientError> {
        self.api.post(STUDENTS_PATH, student).await
    }

    pub async fn update(&self, id: Uuid, student: &NewStudent) -> Result<Student, ClientError> {
        self.api.put(&student_path(id), student).await
    }

    pub async fn applications(&self, id: Uuid) -> Result<Vec<Application>, ClientError> {
        self.api.get(&student_applications_path(id)).await
    }

    pub async fn internships(&self, id: Uuid) -> Result<Vec<Internship>, ClientError> {
        self.api.get(&student_internships_path(id)).await
    }

    pub async fn documents(&self, id: Uuid) -> Result<Vec<Document>, ClientError> {
        self.api.get(&student_documents_path(id)).await
    }

    pub async fn upload_document(&self, document: &NewDocument) -> Result<Document, ClientError> {
        self.api.post(DOCUMENTS_PATH, document).await
    }

    pub async fn evaluations(&self, id: Uuid) -> Result<Vec<Evaluation>, ClientError> {
        self.api.get(&student_evaluations_path(id)).await
    }

    /// Schedule payload shape is owned by the calendar views; passed through
    /// untyped.
    pub async fn schedule(&self, id: Uuid) -> Result<Value, ClientError> {
        self.api.get(&student_schedule_path(id)).await
    }

    pub async fn stats(&self, id: Uuid) -> Result<Value, ClientError> {
        self.api.get(&student_stats_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_carry_trailing_slash() {
        let id = Uuid::nil();
        assert_eq!(
            student_path(id),
            "/students/00000000-0000-0000-0000-000000000000/"
        );
        assert!(student_stats_path(id).ends_with("/stats/"));
    }
}
