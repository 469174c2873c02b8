//! Navigation driver: resolves a path, runs the access-control evaluator,
//! follows redirects, mounts the view and runs the post-navigation
//! effects. The decision path is synchronous and performs no I/O; only the
//! optional dashboard prefetch is asynchronous, and it never blocks or
//! fails the navigation that triggered it.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use thiserror::Error;

use super::evaluator::{evaluate, AccessDecision};
use super::routes::{Prefetch, ResolvedRoute, RouteDescriptor, RouteTable};
use crate::api::internships::OfferFilters;
use crate::api::models::User;
use crate::api::Api;
use crate::config::AppConfig;
use crate::error::ClientError;
use crate::session::{Session, SessionStore};
use crate::stores::{DashboardCache, UiState};
use crate::types::AnnouncementStatus;

#[derive(Error, Debug)]
pub enum ViewLoadError {
    #[error("view chunk unavailable: {0}")]
    ChunkUnavailable(String),
}

/// Seam for mounting the view bound to a route. The default loader always
/// succeeds (views are compiled in); a chunked deployment can fail here,
/// which triggers the full-reload recovery policy.
pub trait ViewLoader: Send + Sync {
    fn load(&self, route: &RouteDescriptor) -> Result<(), ViewLoadError>;
}

pub struct EagerLoader;

impl ViewLoader for EagerLoader {
    fn load(&self, _route: &RouteDescriptor) -> Result<(), ViewLoadError> {
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum NavError {
    #[error("redirect chain exceeded {0} hops")]
    RedirectLoop(u32),

    #[error("failed to load view for route '{0}'")]
    LoadFailed(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Completed {
        name: &'static str,
        /// Final path, including the preserved `redirect` query parameter
        /// when rule 1 produced it.
        path: String,
        redirected: bool,
    },
    /// The target is already the active route; suppressed, no effects run.
    Duplicate,
}

#[derive(Debug, Clone)]
pub struct CurrentRoute {
    pub name: &'static str,
    pub path: String,
    pub params: HashMap<&'static str, String>,
}

#[derive(Default)]
struct NavState {
    current: Option<CurrentRoute>,
    title: Option<String>,
}

pub struct Navigator {
    table: Arc<RouteTable>,
    session: Arc<SessionStore>,
    api: Arc<Api>,
    ui: Arc<UiState>,
    dashboards: Arc<DashboardCache>,
    loader: Box<dyn ViewLoader>,
    state: Arc<RwLock<NavState>>,
    max_hops: u32,
    prefetch_enabled: bool,
    page_view_events: bool,
}

impl Navigator {
    pub fn new(
        config: &AppConfig,
        session: Arc<SessionStore>,
        api: Arc<Api>,
        ui: Arc<UiState>,
        dashboards: Arc<DashboardCache>,
    ) -> Self {
        Self::with_table(RouteTable::shared(), config, session, api, ui, dashboards)
    }

    pub fn with_table(
        table: Arc<RouteTable>,
        config: &AppConfig,
        session: Arc<SessionStore>,
        api: Arc<Api>,
        ui: Arc<UiState>,
        dashboards: Arc<DashboardCache>,
    ) -> Self {
        Self {
            table,
            session,
            api,
            ui,
            dashboards,
            loader: Box::new(EagerLoader),
            state: Arc::new(RwLock::new(NavState::default())),
            max_hops: config.navigation.max_redirect_hops,
            prefetch_enabled: config.navigation.prefetch_enabled,
            page_view_events: config.telemetry.page_view_events,
        }
    }

    pub fn with_loader(mut self, loader: Box<dyn ViewLoader>) -> Self {
        self.loader = loader;
        self
    }

    pub fn current_route(&self) -> Option<CurrentRoute> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }

    pub fn title(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .title
            .clone()
    }

    /// Drive one navigation intent to completion. A view-load failure is
    /// answered with the blunt recovery policy: one full reload (state
    /// reset, same navigation re-run from scratch); a second failure
    /// surfaces.
    pub fn navigate(&self, path: &str) -> Result<NavigationOutcome, NavError> {
        match self.attempt(path) {
            Err(NavError::LoadFailed(name)) => {
                tracing::warn!(route = name, "view load failed, performing full reload");
                self.reload();
                self.attempt(path)
            }
            outcome => outcome,
        }
    }

    fn attempt(&self, original: &str) -> Result<NavigationOutcome, NavError> {
        let mut path = original.to_string();
        let mut hops = 0u32;
        let mut redirected = false;

        loop {
            if hops > self.max_hops {
                return Err(NavError::RedirectLoop(self.max_hops));
            }

            let resolved = self.table.resolve(&path);

            // Alias entries forward resolution without evaluation; the
            // final target's metadata is what gets checked.
            if let Some(target) = resolved.route.redirect_to {
                path = target.to_string();
                hops += 1;
                redirected = true;
                continue;
            }

            if self.is_current(&resolved) {
                tracing::debug!(route = resolved.route.name, "duplicate navigation suppressed");
                return Ok(NavigationOutcome::Duplicate);
            }

            let session = self.session.snapshot();
            match evaluate(resolved.route, &session) {
                AccessDecision::Proceed => {
                    return self.commit(&resolved, &path, redirected, &session);
                }
                AccessDecision::Redirect { to, preserve_target } => {
                    let next = self
                        .table
                        .by_name(to)
                        .map(|r| r.path)
                        .unwrap_or("/404");
                    path = if preserve_target {
                        format!("{}?redirect={}", next, original)
                    } else {
                        next.to_string()
                    };
                    hops += 1;
                    redirected = true;
                }
            }
        }
    }

    fn commit(
        &self,
        resolved: &ResolvedRoute<'_>,
        path: &str,
        redirected: bool,
        session: &Session,
    ) -> Result<NavigationOutcome, NavError> {
        let route = resolved.route;

        self.loader.load(route).map_err(|e| {
            tracing::error!(route = route.name, error = %e, "view load error");
            NavError::LoadFailed(route.name)
        })?;

        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.current = Some(CurrentRoute {
                name: route.name,
                path: path.to_string(),
                params: resolved.params.clone(),
            });
            if let Some(title) = route.title {
                state.title = Some(title.to_string());
            }
        }

        // Post-navigation effects: page-view event, modal teardown,
        // optional dashboard prefetch.
        if self.page_view_events {
            tracing::info!(
                target: "stagemed::analytics",
                route = route.name,
                title = route.title.unwrap_or(""),
                "page view"
            );
        }
        self.ui.close_all();
        self.spawn_prefetch(route, session);

        tracing::debug!(route = route.name, redirected, "navigation completed");
        Ok(NavigationOutcome::Completed {
            name: route.name,
            path: path.to_string(),
            redirected,
        })
    }

    fn is_current(&self, resolved: &ResolvedRoute<'_>) -> bool {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        match &state.current {
            Some(current) => {
                current.name == resolved.route.name && current.params == resolved.params
            }
            None => false,
        }
    }

    /// Recovery policy for a failed view load: reset navigation and UI
    /// state wholesale, as a page reload would.
    fn reload(&self) {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            *state = NavState::default();
        }
        self.ui.close_all();
        self.dashboards.clear();
    }

    /// Fire-and-forget dashboard prefetch. Never blocks the navigation:
    /// failures are logged and swallowed, and a result arriving after the
    /// user has moved on is discarded instead of overwriting the active
    /// view's data.
    fn spawn_prefetch(&self, route: &RouteDescriptor, session: &Session) {
        let Some(prefetch) = route.prefetch else { return };
        if !self.prefetch_enabled {
            return;
        }
        if session.role != Some(prefetch.role()) {
            tracing::debug!(route = route.name, "session role does not match prefetch hook");
            return;
        }
        let Some(user) = session.user.clone() else {
            tracing::debug!(route = route.name, "no user profile loaded, skipping prefetch");
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("no async runtime, skipping prefetch");
            return;
        };

        let api = Arc::clone(&self.api);
        let dashboards = Arc::clone(&self.dashboards);
        let state = Arc::clone(&self.state);
        let name = route.name;

        handle.spawn(async move {
            match run_prefetch(prefetch, &api, &user).await {
                Ok(Some(data)) => {
                    let still_active = {
                        let state = state.read().unwrap_or_else(PoisonError::into_inner);
                        state.current.as_ref().map(|c| c.name) == Some(name)
                    };
                    if still_active {
                        dashboards.insert(name, data);
                    } else {
                        tracing::debug!(route = name, "stale prefetch result discarded");
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(route = name, error = %e, "dashboard prefetch failed");
                }
            }
        });
    }
}

async fn run_prefetch(
    prefetch: Prefetch,
    api: &Api,
    user: &User,
) -> Result<Option<Value>, ClientError> {
    match prefetch {
        Prefetch::StudentDashboard => api.students().stats(user.id).await.map(Some),
        Prefetch::DoctorDashboard => {
            let interns = api.doctors().interns(user.id).await?;
            Ok(Some(serde_json::to_value(interns)?))
        }
        Prefetch::HospitalDashboard => match user.establishment_id {
            Some(establishment) => api.hospitals().stats(establishment).await.map(Some),
            None => {
                tracing::debug!("hospital admin without establishment, nothing to prefetch");
                Ok(None)
            }
        },
        Prefetch::DoyenDashboard => {
            let pending = OfferFilters {
                status: Some(AnnouncementStatus::Draft),
                ..Default::default()
            };
            let announcements = api.internships().announcements(&pending).await?;
            Ok(Some(serde_json::to_value(announcements)?))
        }
    }
}
