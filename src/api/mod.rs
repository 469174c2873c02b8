//! REST boundary: a thin `reqwest`-based executor plus stateless
//! per-resource request builders.
//!
//! Every outgoing request carries the session's bearer token. A 401
//! response is handled globally, independent of which client issued the
//! call: the session is cleared and the installed forced-redirect hook
//! fires. This is a side channel outside the navigation evaluator. No
//! retry logic exists; other failures propagate to the caller as-is.

pub mod models;

pub mod applications;
pub mod auth;
pub mod doctors;
pub mod hospitals;
pub mod internships;
pub mod messaging;
pub mod notifications;
pub mod students;

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::AppConfig;
use crate::error::ClientError;
use crate::session::SessionStore;

type UnauthorizedHook = Box<dyn Fn() + Send + Sync>;

pub struct Api {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    on_unauthorized: RwLock<Option<UnauthorizedHook>>,
}

impl Api {
    pub fn new(config: &AppConfig, session: Arc<SessionStore>) -> Result<Self, ClientError> {
        // Parse up front so a malformed base URL fails at startup, not on
        // the first request.
        let base = Url::parse(&config.api.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: base.as_str().trim_end_matches('/').to_string(),
            session,
            on_unauthorized: RwLock::new(None),
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Install the forced-redirect hook invoked on any 401 response.
    /// The application wires this to a login navigation.
    pub fn on_unauthorized(&self, hook: impl Fn() + Send + Sync + 'static) {
        let mut guard = self
            .on_unauthorized
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Box::new(hook));
    }

    /// Absolute URL for an endpoint path (`/students/:id/` style, leading
    /// and trailing slash included).
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // Resource client accessors

    pub fn auth(&self) -> auth::AuthClient<'_> {
        auth::AuthClient { api: self }
    }

    pub fn students(&self) -> students::StudentsClient<'_> {
        students::StudentsClient { api: self }
    }

    pub fn applications(&self) -> applications::ApplicationsClient<'_> {
        applications::ApplicationsClient { api: self }
    }

    pub fn internships(&self) -> internships::InternshipsClient<'_> {
        internships::InternshipsClient { api: self }
    }

    pub fn hospitals(&self) -> hospitals::HospitalsClient<'_> {
        hospitals::HospitalsClient { api: self }
    }

    pub fn doctors(&self) -> doctors::DoctorsClient<'_> {
        doctors::DoctorsClient { api: self }
    }

    pub fn messaging(&self) -> messaging::MessagingClient<'_> {
        messaging::MessagingClient { api: self }
    }

    pub fn notifications(&self) -> notifications::NotificationsClient<'_> {
        notifications::NotificationsClient { api: self }
    }

    // Request plumbing used by the resource clients

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, self.endpoint(path));
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        self.send_unit(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn post_empty_unit(&self, path: &str) -> Result<(), ClientError> {
        self.send_unit(self.request(Method::POST, path)).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    pub(crate) async fn patch_empty_unit(&self, path: &str) -> Result<(), ClientError> {
        self.send_unit(self.request(Method::PATCH, path)).await
    }

    pub(crate) async fn delete_unit(&self, path: &str) -> Result<(), ClientError> {
        self.send_unit(self.request(Method::DELETE, path)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let resp = req.send().await?;
        let resp = self.intercept(resp).await?;
        Ok(resp.json::<T>().await?)
    }

    async fn send_unit(&self, req: reqwest::RequestBuilder) -> Result<(), ClientError> {
        let resp = req.send().await?;
        self.intercept(resp).await?;
        Ok(())
    }

    /// Global response interceptor: 401 tears the session down, any other
    /// non-success status becomes an `Api` error with the backend message
    /// when one is present.
    async fn intercept(&self, resp: Response) -> Result<Response, ClientError> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            return Err(ClientError::SessionExpired);
        }

        if !status.is_success() {
            let message = extract_error_message(resp).await.unwrap_or_else(|| {
                status.canonical_reason().unwrap_or("request failed").to_string()
            });
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp)
    }

    /// Session teardown on 401: clear the session, fire the forced-redirect
    /// hook. Public so the teardown path is exercisable without a live
    /// backend.
    pub fn handle_unauthorized(&self) {
        tracing::warn!("401 received, clearing session and forcing login redirect");
        self.session.clear();
        let guard = self
            .on_unauthorized
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(hook) = guard.as_ref() {
            hook();
        }
    }
}

/// Best-effort extraction of a human-readable message from an error body.
async fn extract_error_message(resp: Response) -> Option<String> {
    let body: serde_json::Value = resp.json().await.ok()?;
    for key in ["message", "detail", "error"] {
        if let Some(msg) = body.get(key).and_then(|v| v.as_str()) {
            return Some(msg.to_string());
        }
    }
    None
}
