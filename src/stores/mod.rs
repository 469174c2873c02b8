//! Client-side state stores: UI chrome state and thin filter/cache layers
//! over the REST resources. All of them are plain structs behind `Arc`,
//! read and written on the single event loop.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use serde_json::Value;
use uuid::Uuid;

use crate::api::internships::OfferFilters;
use crate::api::models::{Announcement, Application, Document, Student};
use crate::api::Api;
use crate::error::ClientError;

/// Open modal/panel state. The navigator closes everything after each
/// completed navigation.
#[derive(Default)]
pub struct UiState {
    open_modals: RwLock<HashSet<String>>,
}

impl UiState {
    pub fn open(&self, name: impl Into<String>) {
        self.open_modals
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into());
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.open_modals
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
    }

    pub fn open_count(&self) -> usize {
        self.open_modals
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn close_all(&self) {
        let mut modals = self
            .open_modals
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if !modals.is_empty() {
            tracing::debug!(count = modals.len(), "closing open modals");
            modals.clear();
        }
    }
}

/// Announcement cache with declarative filters. `refresh` fetches with the
/// current filters as the server query; `filtered` re-applies them
/// client-side over the cache.
#[derive(Default)]
pub struct InternshipStore {
    announcements: RwLock<Vec<Announcement>>,
    filters: RwLock<OfferFilters>,
}

impl InternshipStore {
    pub async fn refresh(&self, api: &Api) -> Result<usize, ClientError> {
        let filters = self.filters();
        let announcements = api.internships().announcements(&filters).await?;
        let count = announcements.len();
        *self
            .announcements
            .write()
            .unwrap_or_else(PoisonError::into_inner) = announcements;
        Ok(count)
    }

    pub fn filters(&self) -> OfferFilters {
        self.filters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Shallow-merge: `Some` fields replace, `None` fields keep the
    /// current value.
    pub fn update_filters(&self, patch: OfferFilters) {
        let mut filters = self.filters.write().unwrap_or_else(PoisonError::into_inner);
        if patch.specialty.is_some() {
            filters.specialty = patch.specialty;
        }
        if patch.establishment.is_some() {
            filters.establishment = patch.establishment;
        }
        if patch.status.is_some() {
            filters.status = patch.status;
        }
    }

    pub fn clear_filters(&self) {
        *self.filters.write().unwrap_or_else(PoisonError::into_inner) = OfferFilters::default();
    }

    pub fn filtered(&self) -> Vec<Announcement> {
        let filters = self.filters();
        self.announcements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|a| filters.matches(a))
            .cloned()
            .collect()
    }

    pub fn all(&self) -> Vec<Announcement> {
        self.announcements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Fetch-through cache for the student views.
#[derive(Default)]
pub struct StudentStore {
    profile: RwLock<Option<Student>>,
    applications: RwLock<Vec<Application>>,
    documents: RwLock<Vec<Document>>,
}

impl StudentStore {
    pub async fn fetch_profile(&self, api: &Api, student_id: Uuid) -> Result<Student, ClientError> {
        let student = api.students().get(student_id).await?;
        *self.profile.write().unwrap_or_else(PoisonError::into_inner) = Some(student.clone());
        Ok(student)
    }

    pub async fn fetch_applications(
        &self,
        api: &Api,
        student_id: Uuid,
    ) -> Result<Vec<Application>, ClientError> {
        let applications = api.students().applications(student_id).await?;
        *self
            .applications
            .write()
            .unwrap_or_else(PoisonError::into_inner) = applications.clone();
        Ok(applications)
    }

    pub async fn fetch_documents(
        &self,
        api: &Api,
        student_id: Uuid,
    ) -> Result<Vec<Document>, ClientError> {
        let documents = api.students().documents(student_id).await?;
        *self.documents.write().unwrap_or_else(PoisonError::into_inner) = documents.clone();
        Ok(documents)
    }

    pub fn profile(&self) -> Option<Student> {
        self.profile
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn applications(&self) -> Vec<Application> {
        self.applications
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Prefetched role-dashboard payloads keyed by route name. The navigator
/// only stores a result if its route is still the active one.
#[derive(Default)]
pub struct DashboardCache {
    entries: RwLock<HashMap<&'static str, Value>>,
}

impl DashboardCache {
    pub fn insert(&self, route: &'static str, data: Value) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(route, data);
    }

    pub fn get(&self, route: &str) -> Option<Value> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(route)
            .cloned()
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{EstablishmentRef, ServiceRef};
    use crate::types::AnnouncementStatus;

    fn announcement(specialty: &str, status: AnnouncementStatus) -> Announcement {
        Announcement {
            id: Uuid::new_v4(),
            title: "Internship".into(),
            description: None,
            service: ServiceRef {
                id: Uuid::new_v4(),
                name: "Service".into(),
                specialty: specialty.into(),
            },
            establishment: EstablishmentRef {
                id: Uuid::new_v4(),
                name: "CHU".into(),
            },
            status,
            start_date: None,
            end_date: None,
            places: None,
        }
    }

    #[test]
    fn filters_match_on_specialty_and_status() {
        let store = InternshipStore::default();
        *store.announcements.write().unwrap() = vec![
            announcement("Cardiology", AnnouncementStatus::Published),
            announcement("Pediatrics", AnnouncementStatus::Published),
            announcement("Cardiology", AnnouncementStatus::Draft),
        ];

        store.update_filters(OfferFilters {
            specialty: Some("Cardiology".into()),
            establishment: None,
            status: Some(AnnouncementStatus::Published),
        });

        let filtered = store.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].service.specialty, "Cardiology");
    }

    #[test]
    fn update_filters_merges_shallowly() {
        let store = InternshipStore::default();
        store.update_filters(OfferFilters {
            specialty: Some("Neurology".into()),
            ..Default::default()
        });
        store.update_filters(OfferFilters {
            status: Some(AnnouncementStatus::Published),
            ..Default::default()
        });

        let filters = store.filters();
        assert_eq!(filters.specialty.as_deref(), Some("Neurology"));
        assert_eq!(filters.status, Some(AnnouncementStatus::Published));
    }

    #[test]
    fn close_all_empties_modal_state() {
        let ui = UiState::default();
        ui.open("application-form");
        ui.open("offer-details");
        assert_eq!(ui.open_count(), 2);

        ui.close_all();
        assert_eq!(ui.open_count(), 0);
        assert!(!ui.is_open("application-form"));
    }
}
