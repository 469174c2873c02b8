/// Shared types used across the codebase
///
/// Roles and permissions are closed enums rather than loose strings, so a
/// typo fails at construction instead of silently denying access at
/// runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four user roles of the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Doctor,
    HospitalAdmin,
    Doyen,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Student, Role::Doctor, Role::HospitalAdmin, Role::Doyen];

    /// Slug used in navigation paths (`/hospital-admin/*`), which differs
    /// from the snake_case wire form (`hospital_admin`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Doctor => "doctor",
            Role::HospitalAdmin => "hospital-admin",
            Role::Doyen => "doyen",
        }
    }

    /// Wire form, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Doctor => "doctor",
            Role::HospitalAdmin => "hospital_admin",
            Role::Doyen => "doyen",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "doctor" => Ok(Role::Doctor),
            "hospital_admin" | "hospital-admin" => Ok(Role::HospitalAdmin),
            "doyen" => Ok(Role::Doyen),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Closed permission set. Routes declare the permissions they need and the
/// evaluator checks total coverage against the session user's set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "student.view_offers")]
    StudentViewOffers,
    #[serde(rename = "student.create_application")]
    StudentCreateApplication,
    #[serde(rename = "student.view_evaluations")]
    StudentViewEvaluations,

    #[serde(rename = "doctor.manage_interns")]
    DoctorManageInterns,
    #[serde(rename = "doctor.create_evaluations")]
    DoctorCreateEvaluations,
    #[serde(rename = "doctor.view_student_profiles")]
    DoctorViewStudentProfiles,

    #[serde(rename = "hospital.manage_services")]
    HospitalManageServices,
    #[serde(rename = "hospital.create_offers")]
    HospitalCreateOffers,
    #[serde(rename = "hospital.review_applications")]
    HospitalReviewApplications,

    #[serde(rename = "doyen.validate_offers")]
    DoyenValidateOffers,
    #[serde(rename = "doyen.manage_users")]
    DoyenManageUsers,
    #[serde(rename = "doyen.run_assignment")]
    DoyenRunAssignment,
    #[serde(rename = "doyen.view_reports")]
    DoyenViewReports,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::StudentViewOffers => "student.view_offers",
            Permission::StudentCreateApplication => "student.create_application",
            Permission::StudentViewEvaluations => "student.view_evaluations",
            Permission::DoctorManageInterns => "doctor.manage_interns",
            Permission::DoctorCreateEvaluations => "doctor.create_evaluations",
            Permission::DoctorViewStudentProfiles => "doctor.view_student_profiles",
            Permission::HospitalManageServices => "hospital.manage_services",
            Permission::HospitalCreateOffers => "hospital.create_offers",
            Permission::HospitalReviewApplications => "hospital.review_applications",
            Permission::DoyenValidateOffers => "doyen.validate_offers",
            Permission::DoyenManageUsers => "doyen.manage_users",
            Permission::DoyenRunAssignment => "doyen.run_assignment",
            Permission::DoyenViewReports => "doyen.view_reports",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidacy lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Submitted,
    Withdrawn,
}

/// Internship announcement lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementStatus {
    Draft,
    Published,
    InProgress,
    Completed,
    Cancelled,
    Upcoming,
}

impl FromStr for AnnouncementStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AnnouncementStatus::Draft),
            "published" => Ok(AnnouncementStatus::Published),
            "in_progress" => Ok(AnnouncementStatus::InProgress),
            "completed" => Ok(AnnouncementStatus::Completed),
            "cancelled" => Ok(AnnouncementStatus::Cancelled),
            "upcoming" => Ok(AnnouncementStatus::Upcoming),
            other => Err(format!("unknown announcement status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationType {
    Internship,
    Skills,
    Behavior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Cv,
    MotivationLetter,
    StudentCard,
    Transcript,
    Certificate,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    ApplicationUpdate,
    Evaluation,
    Internship,
    Message,
    System,
    Reminder,
}

/// Default page size for paginated resource listings
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_form_is_snake_case() {
        let json = serde_json::to_string(&Role::HospitalAdmin).unwrap();
        assert_eq!(json, "\"hospital_admin\"");
        assert_eq!(Role::HospitalAdmin.path_segment(), "hospital-admin");
    }

    #[test]
    fn role_parses_both_slug_forms() {
        assert_eq!("hospital-admin".parse::<Role>().unwrap(), Role::HospitalAdmin);
        assert_eq!("hospital_admin".parse::<Role>().unwrap(), Role::HospitalAdmin);
        assert!("dean".parse::<Role>().is_err());
    }

    #[test]
    fn permission_wire_form_is_dotted() {
        let json = serde_json::to_string(&Permission::StudentViewOffers).unwrap();
        assert_eq!(json, "\"student.view_offers\"");
        let back: Permission = serde_json::from_str("\"doyen.run_assignment\"").unwrap();
        assert_eq!(back, Permission::DoyenRunAssignment);
    }
}
