//! Access-control properties checked over the real route table.

use std::collections::HashSet;

use uuid::Uuid;

use stagemed::api::models::User;
use stagemed::router::{evaluate, names, AccessDecision, RouteTable};
use stagemed::session::Session;
use stagemed::types::{Permission, Role};

fn authenticated(role: Option<Role>, permissions: &[Permission]) -> Session {
    Session {
        is_authenticated: true,
        token: Some("token".into()),
        user: Some(User {
            id: Uuid::new_v4(),
            email: "user@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            role,
            permissions: permissions.iter().copied().collect::<HashSet<_>>(),
            establishment_id: None,
        }),
        role,
    }
}

#[test]
fn every_auth_route_redirects_guests_to_login() {
    let table = RouteTable::shared();
    let guest = Session::guest();

    for route in table.routes().iter().filter(|r| r.requires_auth) {
        assert_eq!(
            evaluate(route, &guest),
            AccessDecision::Redirect {
                to: names::LOGIN,
                preserve_target: true
            },
            "route '{}' should send guests to login",
            route.name
        );
    }
}

#[test]
fn every_guest_route_redirects_authenticated_sessions_to_dashboard() {
    let table = RouteTable::shared();
    let session = authenticated(Some(Role::Student), &[]);

    for route in table.routes().iter().filter(|r| r.requires_guest) {
        assert_eq!(
            evaluate(route, &session),
            AccessDecision::Redirect {
                to: names::DASHBOARD,
                preserve_target: false
            },
            "route '{}' should bounce authenticated users",
            route.name
        );
    }
}

#[test]
fn role_gated_routes_never_proceed_for_another_role() {
    let table = RouteTable::shared();

    for route in table.routes() {
        let Some(required) = route.required_role else { continue };
        for role in Role::ALL {
            if role == required {
                continue;
            }
            let session = authenticated(Some(role), &[]);
            let decision = evaluate(route, &session);
            assert_ne!(
                decision,
                AccessDecision::Proceed,
                "route '{}' must not proceed for role {}",
                route.name,
                role
            );
            assert_eq!(decision, AccessDecision::Redirect { to: names::UNAUTHORIZED, preserve_target: false });
        }
    }
}

#[test]
fn role_gated_routes_proceed_for_the_matching_role_with_permissions() {
    let table = RouteTable::shared();

    for route in table.routes() {
        let Some(required) = route.required_role else { continue };
        if route.redirect_to.is_some() {
            continue;
        }
        let session = authenticated(Some(required), route.required_permissions);
        assert_eq!(
            evaluate(route, &session),
            AccessDecision::Proceed,
            "route '{}' should proceed for its own role",
            route.name
        );
    }
}

#[test]
fn unauthenticated_student_dashboard_scenario() {
    let table = RouteTable::shared();
    let target = table.resolve("/student/dashboard");
    let decision = evaluate(target.route, &Session::guest());
    assert_eq!(
        decision,
        AccessDecision::Redirect {
            to: names::LOGIN,
            preserve_target: true
        }
    );
}

#[test]
fn doctor_on_student_dashboard_scenario() {
    let table = RouteTable::shared();
    let target = table.resolve("/student/dashboard");
    let session = authenticated(Some(Role::Doctor), &[]);
    assert_eq!(
        evaluate(target.route, &session),
        AccessDecision::Redirect {
            to: names::UNAUTHORIZED,
            preserve_target: false
        }
    );
}

#[test]
fn authenticated_without_role_on_dashboard_scenario() {
    let table = RouteTable::shared();
    let target = table.resolve("/dashboard");
    let session = authenticated(None, &[]);
    assert_eq!(
        evaluate(target.route, &session),
        AccessDecision::Redirect {
            to: names::ROLE_SELECTION,
            preserve_target: false
        }
    );
}

#[test]
fn missing_permission_scenario() {
    let table = RouteTable::shared();
    // student-applications requires student.create_application
    let target = table.resolve("/student/applications");
    let session = authenticated(Some(Role::Student), &[Permission::StudentViewOffers]);
    assert_eq!(
        evaluate(target.route, &session),
        AccessDecision::Redirect {
            to: names::UNAUTHORIZED,
            preserve_target: false
        }
    );
}

#[test]
fn login_redirect_is_idempotent() {
    // Rule 1 sends guests to login; evaluating the login route itself with
    // the same unauthenticated session must proceed, not redirect again.
    let table = RouteTable::shared();
    let guest = Session::guest();

    let login = table.by_name(names::LOGIN).unwrap();
    assert_eq!(evaluate(login, &guest), AccessDecision::Proceed);
}
