//! REST client plumbing: endpoint construction and the global 401
//! teardown side channel. No live backend is involved; the teardown path
//! is exercised through its seam.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use stagemed::api::models::{LoginResponse, User};
use stagemed::api::{applications, internships, messaging, notifications, students, Api};
use stagemed::config::AppConfig;
use stagemed::router::{names, Navigator};
use stagemed::session::SessionStore;
use stagemed::stores::{DashboardCache, UiState};
use stagemed::types::Role;

fn temp_state_dir() -> PathBuf {
    std::env::temp_dir().join(format!("stagemed-test-{}", Uuid::new_v4()))
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::from_env();
    config.storage.state_dir = Some(temp_state_dir());
    config.api.base_url = "http://127.0.0.1:9/api".into();
    config.navigation.prefetch_enabled = false;
    config
}

fn logged_in_store(config: &AppConfig) -> Arc<SessionStore> {
    let store = Arc::new(SessionStore::from_config(config));
    store.complete_login(LoginResponse {
        access: "access-token".into(),
        refresh: "refresh-token".into(),
        user: User {
            id: Uuid::new_v4(),
            email: "user@example.com".into(),
            first_name: String::new(),
            last_name: String::new(),
            role: Some(Role::Student),
            permissions: HashSet::new(),
            establishment_id: None,
        },
    });
    store
}

#[test]
fn endpoint_joins_base_url_and_resource_path() {
    let config = test_config();
    let session = Arc::new(SessionStore::from_config(&config));
    let api = Api::new(&config, session).unwrap();

    assert_eq!(
        api.endpoint(students::STUDENTS_PATH),
        "http://127.0.0.1:9/api/students/"
    );
    let id = Uuid::nil();
    assert_eq!(
        api.endpoint(&applications::application_path(id)),
        "http://127.0.0.1:9/api/candidacies/00000000-0000-0000-0000-000000000000/"
    );
}

#[test]
fn malformed_base_url_fails_at_construction() {
    let mut config = test_config();
    config.api.base_url = "not a url".into();
    let session = Arc::new(SessionStore::from_config(&config));
    assert!(Api::new(&config, session).is_err());
}

#[test]
fn resource_paths_follow_the_rest_convention() {
    // METHOD /resource[/:id][/action]/ with trailing slashes throughout.
    let id = Uuid::nil();
    assert!(internships::announcement_applications_path(id).ends_with("/applications/"));
    assert!(messaging::conversation_mark_read_path(id).ends_with("/mark-read/"));
    assert!(notifications::notification_mark_read_path(id).ends_with("/mark-read/"));
    assert_eq!(notifications::MARK_ALL_READ_PATH, "/notifications/mark-all-read/");
    for path in [
        students::student_stats_path(id),
        applications::assign_internship_path(id),
        messaging::conversation_messages_path(id),
    ] {
        assert!(path.starts_with('/') && path.ends_with('/'), "bad path {path}");
    }
}

#[test]
fn unauthorized_teardown_clears_session_and_fires_hook() {
    let config = test_config();
    let session = logged_in_store(&config);
    let api = Api::new(&config, Arc::clone(&session)).unwrap();

    let fired = Arc::new(AtomicBool::new(false));
    {
        let fired = Arc::clone(&fired);
        api.on_unauthorized(move || {
            fired.store(true, Ordering::SeqCst);
        });
    }

    assert!(session.is_authenticated());
    api.handle_unauthorized();

    assert!(!session.is_authenticated());
    assert!(session.snapshot().token.is_none());
    assert!(fired.load(Ordering::SeqCst));
}

#[test]
fn unauthorized_teardown_forces_a_login_navigation() {
    // Full wiring, as the CLI does it: the 401 hook drives the navigator to
    // the login view regardless of what was active.
    let config = test_config();
    let session = logged_in_store(&config);
    let api = Arc::new(Api::new(&config, Arc::clone(&session)).unwrap());
    let navigator = Arc::new(Navigator::new(
        &config,
        Arc::clone(&session),
        Arc::clone(&api),
        Arc::new(UiState::default()),
        Arc::new(DashboardCache::default()),
    ));

    {
        let nav = Arc::clone(&navigator);
        api.on_unauthorized(move || {
            let _ = nav.navigate("/login");
        });
    }

    navigator.navigate("/student/dashboard").unwrap();
    assert_eq!(
        navigator.current_route().map(|r| r.name),
        Some("student-dashboard")
    );

    api.handle_unauthorized();
    assert_eq!(navigator.current_route().map(|r| r.name), Some(names::LOGIN));
}
