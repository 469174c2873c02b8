//! Wire models for the REST boundary.
//!
//! Lean serde structs; optional fields mirror nullable columns on the
//! backend. Unknown fields are ignored on deserialize so the client stays
//! tolerant to additive backend changes.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{
    AnnouncementStatus, ApplicationStatus, DocumentType, EvaluationType, NotificationType,
    Permission, Role,
};

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Payload returned by `POST /auth/login/`: a token pair plus the user it
/// authenticates.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Role the backend assigned at login, if any; a user without one goes
    /// through role selection.
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub permissions: HashSet<Permission>,
    /// Set for hospital-admin users; drives the hospital dashboard prefetch.
    #[serde(default)]
    pub establishment_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Shallow profile patch; `None` fields are left untouched on merge.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterStudentRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub student_number: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewStudent {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub promotion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub promotion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub specialty: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Establishment {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalService {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub capacity: u32,
}

/// Nested references carried by announcements; the client-side offer
/// filters match on these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRef {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstablishmentRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub service: ServiceRef,
    pub establishment: EstablishmentRef,
    pub status: AnnouncementStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub places: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAnnouncement {
    pub title: String,
    pub description: Option<String>,
    pub service: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub places: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub student: Uuid,
    pub announcement: Uuid,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub reason_of_refusal: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewApplication {
    pub student: Uuid,
    pub announcement: Uuid,
    pub motivation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignInternshipRequest {
    pub service: Uuid,
    pub doctor: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Internship {
    pub id: Uuid,
    pub student: Uuid,
    #[serde(default)]
    pub doctor: Option<Uuid>,
    #[serde(default)]
    pub service: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: AnnouncementStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: Uuid,
    pub internship: Uuid,
    pub evaluation_type: EvaluationType,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewEvaluation {
    pub internship: Uuid,
    pub evaluation_type: EvaluationType,
    pub score: f32,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub student: Uuid,
    pub document_type: DocumentType,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewDocument {
    pub title: String,
    pub student: Uuid,
    pub document_type: DocumentType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub notification_type: NotificationType,
    pub message: String,
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnreadCount {
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub participants: Vec<Uuid>,
    #[serde(default)]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewConversation {
    pub participants: Vec<Uuid>,
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Uuid,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_tolerates_missing_optional_fields() {
        let user: User = serde_json::from_str(
            r#"{"id":"7c9e6679-7425-40de-944b-e07fc1f90ae7","email":"a@b.c"}"#,
        )
        .unwrap();
        assert!(user.role.is_none());
        assert!(user.permissions.is_empty());
    }

    #[test]
    fn login_response_round_trip() {
        let raw = r#"{
            "access": "acc",
            "refresh": "ref",
            "user": {
                "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
                "email": "a@b.c",
                "role": "doctor",
                "permissions": ["doctor.manage_interns"]
            }
        }"#;
        let resp: LoginResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.user.role, Some(Role::Doctor));
        assert!(resp.user.permissions.contains(&Permission::DoctorManageInterns));
    }
}
