//! The access-control evaluator: decides, for every navigation attempt,
//! whether it proceeds or redirects, from the target route's declared
//! requirements and the current session.
//!
//! The rules are ordered and the first match wins; redirect targets
//! re-enter evaluation, so the order is what prevents loops (the login
//! view is guest-only, the role-selection view never re-triggers rule 5).

use super::routes::{names, RouteDescriptor};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Proceed,
    Redirect {
        to: &'static str,
        /// Carry the original target path as the `redirect` query
        /// parameter, so login can return the user where they were headed.
        preserve_target: bool,
    },
}

impl AccessDecision {
    fn redirect(to: &'static str) -> Self {
        AccessDecision::Redirect {
            to,
            preserve_target: false,
        }
    }
}

/// Evaluate one navigation attempt. Pure and synchronous: reads only the
/// target's metadata and the session snapshot, performs no I/O.
///
/// Wrong-role policy: a *selected but wrong* role is an authorization
/// failure and lands on the unauthorized view, same as a missing
/// permission; `role-selection` is reserved for the authenticated-but-
/// no-role state.
pub fn evaluate(target: &RouteDescriptor, session: &Session) -> AccessDecision {
    // 1. Authentication
    if target.requires_auth && !session.is_authenticated {
        tracing::warn!(route = target.name, "not authenticated, redirecting to login");
        return AccessDecision::Redirect {
            to: names::LOGIN,
            preserve_target: true,
        };
    }

    // 2. Role requirement
    if target.requires_auth {
        if let Some(required) = target.required_role {
            match session.role {
                None => {
                    tracing::warn!(
                        route = target.name,
                        "no role selected, redirecting to role selection"
                    );
                    return AccessDecision::redirect(names::ROLE_SELECTION);
                }
                Some(role) if role != required => {
                    tracing::warn!(
                        route = target.name,
                        role = %role,
                        required = %required,
                        "role mismatch, redirecting to unauthorized"
                    );
                    return AccessDecision::redirect(names::UNAUTHORIZED);
                }
                Some(_) => {}
            }
        }
    }

    // 3. Permission coverage
    if !session.has_permissions(target.required_permissions) {
        tracing::warn!(route = target.name, "insufficient permissions");
        return AccessDecision::redirect(names::UNAUTHORIZED);
    }

    // 4. Guest-only views
    if target.requires_guest && session.is_authenticated {
        tracing::debug!(route = target.name, "already authenticated, redirecting to dashboard");
        return AccessDecision::redirect(names::DASHBOARD);
    }

    // 5. Authenticated but no role chosen yet
    if session.is_authenticated && session.role.is_none() && target.name != names::ROLE_SELECTION {
        tracing::debug!(route = target.name, "no role selected, redirecting to role selection");
        return AccessDecision::redirect(names::ROLE_SELECTION);
    }

    AccessDecision::Proceed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::User;
    use crate::types::{Permission, Role};
    use std::collections::HashSet;
    use uuid::Uuid;

    fn authenticated(role: Option<Role>, permissions: &[Permission]) -> Session {
        Session {
            is_authenticated: true,
            token: Some("token".into()),
            user: Some(User {
                id: Uuid::new_v4(),
                email: "user@example.com".into(),
                first_name: String::new(),
                last_name: String::new(),
                role,
                permissions: permissions.iter().copied().collect::<HashSet<_>>(),
                establishment_id: None,
            }),
            role,
        }
    }

    fn route(name: &'static str) -> RouteDescriptor {
        RouteDescriptor::new("/x", name)
    }

    #[test]
    fn unauthenticated_hits_login_with_preserved_target() {
        let decision = evaluate(&route("student-dashboard").auth(), &Session::guest());
        assert_eq!(
            decision,
            AccessDecision::Redirect {
                to: names::LOGIN,
                preserve_target: true
            }
        );
    }

    #[test]
    fn wrong_role_is_unauthorized() {
        let session = authenticated(Some(Role::Doctor), &[]);
        let decision = evaluate(&route("student-dashboard").role(Role::Student), &session);
        assert_eq!(decision, AccessDecision::redirect(names::UNAUTHORIZED));
    }

    #[test]
    fn missing_role_on_role_gated_route_goes_to_role_selection() {
        let session = authenticated(None, &[]);
        let decision = evaluate(&route("student-dashboard").role(Role::Student), &session);
        assert_eq!(decision, AccessDecision::redirect(names::ROLE_SELECTION));
    }

    #[test]
    fn matching_role_proceeds() {
        let session = authenticated(Some(Role::Student), &[]);
        let decision = evaluate(&route("student-dashboard").role(Role::Student), &session);
        assert_eq!(decision, AccessDecision::Proceed);
    }

    #[test]
    fn partial_permission_coverage_is_denied() {
        let session = authenticated(Some(Role::Student), &[Permission::StudentViewOffers]);
        let target = route("student-applications")
            .role(Role::Student)
            .permissions(&[Permission::StudentViewOffers, Permission::StudentCreateApplication]);
        assert_eq!(evaluate(&target, &session), AccessDecision::redirect(names::UNAUTHORIZED));
    }

    #[test]
    fn guest_route_bounces_authenticated_sessions() {
        let session = authenticated(Some(Role::Student), &[]);
        assert_eq!(
            evaluate(&route(names::LOGIN).guest(), &session),
            AccessDecision::redirect(names::DASHBOARD)
        );
    }

    #[test]
    fn authenticated_without_role_is_funneled_to_role_selection() {
        let session = authenticated(None, &[]);
        assert_eq!(
            evaluate(&route(names::DASHBOARD).auth(), &session),
            AccessDecision::redirect(names::ROLE_SELECTION)
        );
        // ...but role-selection itself proceeds, or it would loop.
        assert_eq!(
            evaluate(&route(names::ROLE_SELECTION).auth(), &session),
            AccessDecision::Proceed
        );
    }

    #[test]
    fn login_redirect_is_idempotent_for_guests() {
        // Login is guest-only: re-evaluating it with the same
        // unauthenticated session proceeds instead of looping.
        let decision = evaluate(&route(names::LOGIN).guest(), &Session::guest());
        assert_eq!(decision, AccessDecision::Proceed);
    }
}
