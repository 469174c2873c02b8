//! Session store invariants and token persistence.

use std::collections::HashSet;
use std::path::PathBuf;

use uuid::Uuid;

use stagemed::api::models::{LoginResponse, User, UserPatch};
use stagemed::session::{SessionStore, AUTH_TOKEN_KEY, REFRESH_TOKEN_KEY};
use stagemed::types::{Permission, Role};

fn temp_state_dir() -> PathBuf {
    std::env::temp_dir().join(format!("stagemed-test-{}", Uuid::new_v4()))
}

fn login_response(role: Option<Role>) -> LoginResponse {
    LoginResponse {
        access: "access-token".into(),
        refresh: "refresh-token".into(),
        user: User {
            id: Uuid::new_v4(),
            email: "user@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            role,
            permissions: HashSet::new(),
            establishment_id: None,
        },
    }
}

#[test]
fn fresh_store_is_a_guest_session() {
    let store = SessionStore::open(temp_state_dir());
    let session = store.snapshot();
    assert!(!session.is_authenticated);
    assert!(session.token.is_none());
    assert!(session.user.is_none());
    assert!(session.role.is_none());
}

#[test]
fn login_sets_everything_atomically_and_persists_tokens() {
    let dir = temp_state_dir();
    let store = SessionStore::open(dir.clone());

    store.complete_login(login_response(Some(Role::Student)));

    let session = store.snapshot();
    assert!(session.is_authenticated);
    assert_eq!(session.token.as_deref(), Some("access-token"));
    assert_eq!(session.role, Some(Role::Student));
    assert!(session.user.is_some());

    assert_eq!(
        std::fs::read_to_string(dir.join(AUTH_TOKEN_KEY)).unwrap(),
        "access-token"
    );
    assert_eq!(
        std::fs::read_to_string(dir.join(REFRESH_TOKEN_KEY)).unwrap(),
        "refresh-token"
    );
}

#[test]
fn persisted_token_restores_authentication_only() {
    let dir = temp_state_dir();
    {
        let store = SessionStore::open(dir.clone());
        store.complete_login(login_response(Some(Role::Doctor)));
    }

    // A new process: authenticated from the token, but user and role are
    // unknown until fetched or selected.
    let restored = SessionStore::open(dir);
    let session = restored.snapshot();
    assert!(session.is_authenticated);
    assert_eq!(session.token.as_deref(), Some("access-token"));
    assert!(session.user.is_none());
    assert!(session.role.is_none());
}

#[test]
fn clear_resets_state_and_removes_persisted_tokens() {
    let dir = temp_state_dir();
    let store = SessionStore::open(dir.clone());
    store.complete_login(login_response(Some(Role::Doyen)));

    store.clear();

    let session = store.snapshot();
    assert!(!session.is_authenticated);
    assert!(session.token.is_none());
    assert!(session.role.is_none());
    assert!(!dir.join(AUTH_TOKEN_KEY).exists());
    assert!(!dir.join(REFRESH_TOKEN_KEY).exists());

    // And nothing is restored afterwards.
    let reopened = SessionStore::open(dir);
    assert!(!reopened.is_authenticated());
}

#[test]
fn role_selection_requires_authentication() {
    let store = SessionStore::open(temp_state_dir());
    assert!(store.select_role(Role::Student).is_err());

    store.complete_login(login_response(None));
    assert!(store.select_role(Role::Student).is_ok());
    assert_eq!(store.current_role(), Some(Role::Student));
}

#[test]
fn update_profile_merges_shallowly() {
    let store = SessionStore::open(temp_state_dir());
    store.complete_login(login_response(Some(Role::Student)));

    store
        .update_profile(UserPatch {
            first_name: Some("Grace".into()),
            ..Default::default()
        })
        .unwrap();

    let user = store.snapshot().user.unwrap();
    assert_eq!(user.first_name, "Grace");
    // Untouched fields keep their values.
    assert_eq!(user.last_name, "Lovelace");
    assert_eq!(user.email, "user@example.com");
}

#[test]
fn update_profile_without_session_is_rejected() {
    let store = SessionStore::open(temp_state_dir());
    assert!(store.update_profile(UserPatch::default()).is_err());
}

#[test]
fn permission_checks_are_total_coverage() {
    let dir = temp_state_dir();
    let store = SessionStore::open(dir);

    let mut response = login_response(Some(Role::Student));
    response.user.permissions =
        [Permission::StudentViewOffers].into_iter().collect::<HashSet<_>>();
    store.complete_login(response);

    let session = store.snapshot();
    assert!(session.has_permissions(&[]));
    assert!(session.has_permissions(&[Permission::StudentViewOffers]));
    assert!(!session.has_permissions(&[
        Permission::StudentViewOffers,
        Permission::StudentCreateApplication
    ]));
}
