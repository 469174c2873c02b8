//! Client-held authentication/authorization context.
//!
//! The session is an explicitly owned, injectable object: constructed once
//! at process start (restoring persisted tokens), shared behind `Arc`, and
//! mutated only by login, logout, role selection and profile updates.
//!
//! Invariants: `role` is set only while authenticated; absence of a token
//! implies not-authenticated. `clear()` restores the guest state and is the
//! teardown path used by both logout and the global 401 interceptor.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use crate::api::models::{Credentials, LoginResponse, User, UserPatch};
use crate::api::{auth::AuthClient, Api};
use crate::config::AppConfig;
use crate::error::ClientError;
use crate::types::{Permission, Role};

/// Fixed storage keys for the persisted token pair. Presence of the access
/// token is the bootstrap signal for restoring `is_authenticated`.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Immutable snapshot of the session, consumed by the access-control
/// evaluator.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub is_authenticated: bool,
    pub token: Option<String>,
    pub user: Option<User>,
    pub role: Option<Role>,
}

impl Session {
    pub fn guest() -> Self {
        Self::default()
    }

    /// Total-coverage permission check: every required permission must be
    /// present in the user's set. An empty requirement always passes.
    pub fn has_permissions(&self, required: &[Permission]) -> bool {
        if required.is_empty() {
            return true;
        }
        match &self.user {
            Some(user) => required.iter().all(|p| user.permissions.contains(p)),
            None => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("no user profile loaded")]
    NoProfile,
}

pub struct SessionStore {
    state: RwLock<Session>,
    state_dir: PathBuf,
    refresh: RwLock<Option<String>>,
}

impl SessionStore {
    /// Open the store against a state directory, restoring a persisted
    /// session if an access token is present. User and role stay unset
    /// until login data arrives or a role is selected.
    pub fn open(state_dir: PathBuf) -> Self {
        let token = read_key(&state_dir, AUTH_TOKEN_KEY);
        let refresh = read_key(&state_dir, REFRESH_TOKEN_KEY);

        let session = match token {
            Some(token) => {
                tracing::debug!("restored session from persisted access token");
                Session {
                    is_authenticated: true,
                    token: Some(token),
                    user: None,
                    role: None,
                }
            }
            None => Session::guest(),
        };

        Self {
            state: RwLock::new(session),
            state_dir,
            refresh: RwLock::new(refresh),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::open(config.state_dir())
    }

    pub fn snapshot(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated
    }

    pub fn current_role(&self) -> Option<Role> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).role
    }

    pub fn token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.refresh
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Authenticate against the backend and adopt the returned token pair
    /// and user atomically.
    pub async fn login(
        &self,
        auth: &AuthClient<'_>,
        credentials: &Credentials,
    ) -> Result<(), ClientError> {
        let response = auth.login(credentials).await?;
        self.complete_login(response);
        Ok(())
    }

    /// Transport-free half of login: persist the token pair and set
    /// token/user/role/is_authenticated in one write-lock scope.
    pub fn complete_login(&self, response: LoginResponse) {
        write_key(&self.state_dir, AUTH_TOKEN_KEY, &response.access);
        write_key(&self.state_dir, REFRESH_TOKEN_KEY, &response.refresh);

        let role = response.user.role;
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            *state = Session {
                is_authenticated: true,
                token: Some(response.access),
                user: Some(response.user),
                role,
            };
        }
        {
            let mut refresh = self.refresh.write().unwrap_or_else(PoisonError::into_inner);
            *refresh = Some(response.refresh);
        }

        tracing::info!(role = ?role, "session established");
    }

    /// Clear the session and persisted tokens, then revoke the refresh
    /// token server-side fire-and-forget: revocation failure is logged and
    /// swallowed, never blocking the logout.
    pub async fn logout(&self, api: &Arc<Api>) {
        let refresh = self.refresh_token();
        self.clear();

        if let Some(refresh) = refresh {
            let api = Arc::clone(api);
            tokio::spawn(async move {
                if let Err(e) = api.auth().revoke(&refresh).await {
                    tracing::debug!(error = %e, "token revocation failed");
                }
            });
        }
    }

    /// Role selection: no server round-trip beyond what login already
    /// returned.
    pub fn select_role(&self, role: Role) -> Result<(), SessionError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !state.is_authenticated {
            return Err(SessionError::NotAuthenticated);
        }
        state.role = Some(role);
        tracing::info!(role = %role, "role selected");
        Ok(())
    }

    /// Shallow-merge a patch into the current user profile.
    pub fn update_profile(&self, patch: UserPatch) -> Result<(), SessionError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !state.is_authenticated {
            return Err(SessionError::NotAuthenticated);
        }
        let user = state.user.as_mut().ok_or(SessionError::NoProfile)?;
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(first_name) = patch.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = last_name;
        }
        Ok(())
    }

    /// Reset to the guest state and drop the persisted tokens. Used by
    /// logout and by the global 401 teardown.
    pub fn clear(&self) {
        remove_key(&self.state_dir, AUTH_TOKEN_KEY);
        remove_key(&self.state_dir, REFRESH_TOKEN_KEY);

        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            *state = Session::guest();
        }
        {
            let mut refresh = self.refresh.write().unwrap_or_else(PoisonError::into_inner);
            *refresh = None;
        }
    }
}

// Token persistence: one file per storage key under the state directory.
// Best-effort, mirroring browser local-storage semantics: a failed write
// degrades to an in-memory session rather than failing the login.

fn key_file(dir: &Path, key: &str) -> PathBuf {
    dir.join(key)
}

fn read_key(dir: &Path, key: &str) -> Option<String> {
    let value = fs::read_to_string(key_file(dir, key)).ok()?;
    let value = value.trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn write_key(dir: &Path, key: &str, value: &str) {
    if let Err(e) = fs::create_dir_all(dir) {
        tracing::warn!(error = %e, "failed to create session state directory");
        return;
    }
    if let Err(e) = fs::write(key_file(dir, key), value) {
        tracing::warn!(key, error = %e, "failed to persist session token");
    }
}

fn remove_key(dir: &Path, key: &str) {
    let path = key_file(dir, key);
    if path.exists() {
        if let Err(e) = fs::remove_file(&path) {
            tracing::warn!(key, error = %e, "failed to remove persisted token");
        }
    }
}
