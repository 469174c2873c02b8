//! Authentication endpoints. Token storage and session mutation live in
//! the session store; this client only shapes the requests.

use serde_json::json;

use super::models::{Credentials, LoginResponse, RefreshResponse, RegisterStudentRequest, User};
use super::Api;
use crate::error::ClientError;

pub const LOGIN_PATH: &str = "/auth/login/";
pub const REGISTER_STUDENT_PATH: &str = "/auth/register/student/";
pub const TOKEN_REFRESH_PATH: &str = "/auth/token/refresh/";
pub const LOGOUT_PATH: &str = "/auth/logout/";
pub const PASSWORD_RESET_PATH: &str = "/auth/password/reset/";
pub const PASSWORD_RESET_CONFIRM_PATH: &str = "/auth/password/reset/confirm/";

pub struct AuthClient<'a> {
    pub(crate) api: &'a Api,
}

impl AuthClient<'_> {
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError> {
        self.api.post(LOGIN_PATH, credentials).await
    }

    pub async fn register_student(
        &self,
        request: &RegisterStudentRequest,
    ) -> Result<User, ClientError> {
        self.api.post(REGISTER_STUDENT_PATH, request).await
    }

    pub async fn refresh_token(&self, refresh: &str) -> Result<RefreshResponse, ClientError> {
        self.api
            .post(TOKEN_REFRESH_PATH, &json!({ "refresh": refresh }))
            .await
    }

    /// Server-side revocation of the refresh token. Called fire-and-forget
    /// on logout; the session is already cleared by the time this runs.
    pub async fn revoke(&self, refresh: &str) -> Result<(), ClientError> {
        self.api
            .post_unit(LOGOUT_PATH, &json!({ "refresh_token": refresh }))
            .await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), ClientError> {
        self.api
            .post_unit(PASSWORD_RESET_PATH, &json!({ "email": email }))
            .await
    }

    pub async fn reset_password(
        &self,
        uid: &str,
        token: &str,
        new_password: &str,
    ) -> Result<(), ClientError> {
        self.api
            .post_unit(
                PASSWORD_RESET_CONFIRM_PATH,
                &json!({ "uid": uid, "token": token, "new_password": new_password }),
            )
            .await
    }
}
