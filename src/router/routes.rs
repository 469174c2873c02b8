//! Declarative route table: path, view name and access metadata for every
//! navigable surface of the platform, defined once at startup.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::types::{Permission, Role};

/// Route names referenced by the evaluator and the navigator.
pub mod names {
    pub const LOGIN: &str = "login";
    pub const ROLE_SELECTION: &str = "role-selection";
    pub const DASHBOARD: &str = "dashboard";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const NOT_FOUND: &str = "not-found";
}

/// Declarative per-route prefetch hook, resolved from the route table
/// instead of a hardcoded switch over role and route name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefetch {
    StudentDashboard,
    DoctorDashboard,
    HospitalDashboard,
    DoyenDashboard,
}

impl Prefetch {
    /// Role whose session the hook applies to; a mismatched session skips
    /// the prefetch entirely.
    pub fn role(&self) -> Role {
        match self {
            Prefetch::StudentDashboard => Role::Student,
            Prefetch::DoctorDashboard => Role::Doctor,
            Prefetch::HospitalDashboard => Role::HospitalAdmin,
            Prefetch::DoyenDashboard => Role::Doyen,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
    pub requires_guest: bool,
    pub required_role: Option<Role>,
    pub required_permissions: &'static [Permission],
    pub breadcrumb: Option<&'static str>,
    pub title: Option<&'static str>,
    pub prefetch: Option<Prefetch>,
    /// Alias entry: resolution continues at this path (`/student` lands on
    /// `/student/dashboard`). The access metadata of the final target is
    /// what gets evaluated.
    pub redirect_to: Option<&'static str>,
}

impl RouteDescriptor {
    pub fn new(path: &'static str, name: &'static str) -> Self {
        Self {
            path,
            name,
            requires_auth: false,
            requires_guest: false,
            required_role: None,
            required_permissions: &[],
            breadcrumb: None,
            title: None,
            prefetch: None,
            redirect_to: None,
        }
    }

    pub fn auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    pub fn guest(mut self) -> Self {
        self.requires_guest = true;
        self
    }

    /// Role-gated routes always require authentication as well.
    pub fn role(mut self, role: Role) -> Self {
        self.requires_auth = true;
        self.required_role = Some(role);
        self
    }

    pub fn permissions(mut self, permissions: &'static [Permission]) -> Self {
        self.required_permissions = permissions;
        self
    }

    pub fn title(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn breadcrumb(mut self, breadcrumb: &'static str) -> Self {
        self.breadcrumb = Some(breadcrumb);
        self
    }

    pub fn prefetch(mut self, prefetch: Prefetch) -> Self {
        self.prefetch = Some(prefetch);
        self
    }

    pub fn redirect(mut self, target: &'static str) -> Self {
        self.redirect_to = Some(target);
        self
    }
}

/// A matched route plus the `:param` captures from the path.
#[derive(Debug, Clone)]
pub struct ResolvedRoute<'t> {
    pub route: &'t RouteDescriptor,
    pub params: HashMap<&'static str, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub text: &'static str,
    pub to: String,
}

pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    /// Build a table, enforcing the declaration invariants: unique names,
    /// and `requires_auth`/`requires_guest` mutually exclusive. Violations
    /// are construction bugs, so this fails fast at startup.
    pub fn from_routes(routes: Vec<RouteDescriptor>) -> Self {
        let mut seen = HashSet::new();
        for route in &routes {
            assert!(
                !(route.requires_auth && route.requires_guest),
                "route '{}' declares both requires_auth and requires_guest",
                route.name
            );
            assert!(seen.insert(route.name), "duplicate route name '{}'", route.name);
        }
        Self { routes }
    }

    /// The platform's full route table.
    pub fn new() -> Self {
        use self::names::*;
        use crate::types::Permission::*;

        let mut routes = vec![
            RouteDescriptor::new("/", "root").redirect("/login"),
            RouteDescriptor::new("/login", LOGIN)
                .guest()
                .title("Sign in - StageMed"),
            RouteDescriptor::new("/role-selection", ROLE_SELECTION)
                .auth()
                .title("Role selection - StageMed"),
            RouteDescriptor::new("/dashboard", DASHBOARD)
                .auth()
                .title("Dashboard - StageMed"),
        ];

        // Student
        routes.extend([
            RouteDescriptor::new("/student", "student-root")
                .role(Role::Student)
                .redirect("/student/dashboard"),
            RouteDescriptor::new("/student/dashboard", "student-dashboard")
                .role(Role::Student)
                .title("Student dashboard")
                .breadcrumb("Dashboard")
                .prefetch(Prefetch::StudentDashboard),
            RouteDescriptor::new("/student/offers", "student-offers")
                .role(Role::Student)
                .permissions(&[StudentViewOffers])
                .title("Internship offers")
                .breadcrumb("Internship offers"),
            RouteDescriptor::new("/student/applications", "student-applications")
                .role(Role::Student)
                .permissions(&[StudentCreateApplication])
                .title("My applications")
                .breadcrumb("My applications"),
            RouteDescriptor::new("/student/planning", "student-planning")
                .role(Role::Student)
                .title("My planning")
                .breadcrumb("My planning"),
            RouteDescriptor::new("/student/evaluations", "student-evaluations")
                .role(Role::Student)
                .permissions(&[StudentViewEvaluations])
                .title("My evaluations")
                .breadcrumb("My evaluations"),
            RouteDescriptor::new("/student/profile", "student-profile")
                .role(Role::Student)
                .title("My profile")
                .breadcrumb("My profile"),
        ]);

        // Doctor
        routes.extend([
            RouteDescriptor::new("/doctor", "doctor-root")
                .role(Role::Doctor)
                .redirect("/doctor/dashboard"),
            RouteDescriptor::new("/doctor/dashboard", "doctor-dashboard")
                .role(Role::Doctor)
                .title("Doctor dashboard")
                .breadcrumb("Dashboard")
                .prefetch(Prefetch::DoctorDashboard),
            RouteDescriptor::new("/doctor/interns", "doctor-interns")
                .role(Role::Doctor)
                .permissions(&[DoctorManageInterns])
                .title("My interns")
                .breadcrumb("My interns"),
            RouteDescriptor::new("/doctor/evaluations", "doctor-evaluations")
                .role(Role::Doctor)
                .title("Evaluations")
                .breadcrumb("Evaluations"),
            RouteDescriptor::new("/doctor/planning", "doctor-planning")
                .role(Role::Doctor)
                .title("Planning")
                .breadcrumb("Planning"),
            RouteDescriptor::new("/doctor/evaluation/:internship_id", "doctor-evaluation-form")
                .role(Role::Doctor)
                .permissions(&[DoctorCreateEvaluations])
                .title("Evaluation form")
                .breadcrumb("Evaluation"),
            RouteDescriptor::new("/doctor/student/:student_id", "doctor-student-profile")
                .role(Role::Doctor)
                .permissions(&[DoctorViewStudentProfiles])
                .title("Intern profile")
                .breadcrumb("Intern profile"),
        ]);

        // Hospital admin
        routes.extend([
            RouteDescriptor::new("/hospital-admin", "hospital-admin-root")
                .role(Role::HospitalAdmin)
                .redirect("/hospital-admin/dashboard"),
            RouteDescriptor::new("/hospital-admin/dashboard", "hospital-admin-dashboard")
                .role(Role::HospitalAdmin)
                .title("Hospital dashboard")
                .breadcrumb("Dashboard")
                .prefetch(Prefetch::HospitalDashboard),
            RouteDescriptor::new("/hospital-admin/services", "hospital-services")
                .role(Role::HospitalAdmin)
                .permissions(&[HospitalManageServices])
                .title("Service management")
                .breadcrumb("Services"),
            RouteDescriptor::new("/hospital-admin/offers", "hospital-offers")
                .role(Role::HospitalAdmin)
                .permissions(&[HospitalCreateOffers])
                .title("Internship offers")
                .breadcrumb("Internship offers"),
            RouteDescriptor::new("/hospital-admin/applications", "hospital-applications")
                .role(Role::HospitalAdmin)
                .permissions(&[HospitalReviewApplications])
                .title("Applications")
                .breadcrumb("Applications"),
            RouteDescriptor::new("/hospital-admin/planning", "hospital-planning")
                .role(Role::HospitalAdmin)
                .title("Hospital planning")
                .breadcrumb("Planning"),
        ]);

        // Doyen
        routes.extend([
            RouteDescriptor::new("/doyen", "doyen-root")
                .role(Role::Doyen)
                .redirect("/doyen/dashboard"),
            RouteDescriptor::new("/doyen/dashboard", "doyen-dashboard")
                .role(Role::Doyen)
                .title("Doyen dashboard")
                .breadcrumb("Dashboard")
                .prefetch(Prefetch::DoyenDashboard),
            RouteDescriptor::new("/doyen/validation", "doyen-validation")
                .role(Role::Doyen)
                .permissions(&[DoyenValidateOffers])
                .title("Offer validation")
                .breadcrumb("Offer validation"),
            RouteDescriptor::new("/doyen/users", "doyen-users")
                .role(Role::Doyen)
                .permissions(&[DoyenManageUsers])
                .title("User management")
                .breadcrumb("Users"),
            RouteDescriptor::new("/doyen/assignment", "doyen-assignment")
                .role(Role::Doyen)
                .permissions(&[DoyenRunAssignment])
                .title("Assignment")
                .breadcrumb("Assignment"),
            RouteDescriptor::new("/doyen/reporting", "doyen-reporting")
                .role(Role::Doyen)
                .permissions(&[DoyenViewReports])
                .title("Reporting")
                .breadcrumb("Reporting"),
        ]);

        // Error views
        routes.extend([
            RouteDescriptor::new("/unauthorized", UNAUTHORIZED).title("Unauthorized"),
            RouteDescriptor::new("/404", NOT_FOUND).title("Page not found"),
        ]);

        Self::from_routes(routes)
    }

    /// Process-wide table instance.
    pub fn shared() -> Arc<RouteTable> {
        static TABLE: Lazy<Arc<RouteTable>> = Lazy::new(|| Arc::new(RouteTable::new()));
        Arc::clone(&TABLE)
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Match a path against the table, first declaration wins. Unmatched
    /// paths fall back to the not-found view (the catch-all of the
    /// navigation surface).
    pub fn resolve(&self, path: &str) -> ResolvedRoute<'_> {
        if let Some(resolved) = self.find(path) {
            return resolved;
        }
        // A custom table may omit the 404 view; fall back to the last route
        // rather than panic.
        let route = self
            .by_name(names::NOT_FOUND)
            .or_else(|| self.routes.last())
            .expect("route table is empty");
        ResolvedRoute {
            route,
            params: HashMap::new(),
        }
    }

    /// Exact match without the catch-all fallback.
    pub fn find(&self, path: &str) -> Option<ResolvedRoute<'_>> {
        let segments = normalize(path);
        self.routes.iter().find_map(|route| {
            match_segments(route.path, &segments).map(|params| ResolvedRoute { route, params })
        })
    }

    /// Breadcrumb trail: every path prefix that names a route with a
    /// breadcrumb, ending at the route itself.
    pub fn breadcrumbs(&self, path: &str) -> Vec<Breadcrumb> {
        let segments = normalize(path);
        let mut crumbs = Vec::new();
        for depth in 1..=segments.len() {
            let prefix = format!("/{}", segments[..depth].join("/"));
            if let Some(resolved) = self.find(&prefix) {
                if let Some(text) = resolved.route.breadcrumb {
                    crumbs.push(Breadcrumb { text, to: prefix });
                }
            }
        }
        crumbs
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Landing path for a freshly selected role.
pub fn default_route_for_role(role: Role) -> &'static str {
    match role {
        Role::Student => "/student/dashboard",
        Role::Doctor => "/doctor/dashboard",
        Role::HospitalAdmin => "/hospital-admin/dashboard",
        Role::Doyen => "/doyen/dashboard",
    }
}

/// Role owning a path prefix, if any.
pub fn role_from_path(path: &str) -> Option<Role> {
    let first = normalize(path).into_iter().next()?;
    Role::ALL.into_iter().find(|role| role.path_segment() == first)
}

/// Pure accessibility check used by navigation menus: does this
/// role/permission set satisfy the route's declared requirements?
pub fn is_route_accessible(
    route: &RouteDescriptor,
    role: Option<Role>,
    permissions: &HashSet<Permission>,
) -> bool {
    if let Some(required) = route.required_role {
        if role != Some(required) {
            return false;
        }
    }
    route.required_permissions.iter().all(|p| permissions.contains(p))
}

/// Split a path into segments, dropping the query string, empty segments
/// and any trailing slash.
fn normalize(path: &str) -> Vec<&str> {
    let path = path.split('?').next().unwrap_or(path);
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn match_segments(
    pattern: &'static str,
    segments: &[&str],
) -> Option<HashMap<&'static str, String>> {
    let pattern_segments: Vec<&'static str> =
        pattern.split('/').filter(|s| !s.is_empty()).collect();
    if pattern_segments.len() != segments.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (pat, seg) in pattern_segments.iter().zip(segments) {
        if let Some(name) = pat.strip_prefix(':') {
            params.insert(name, (*seg).to_string());
        } else if pat != seg {
            return None;
        }
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_and_guest_are_mutually_exclusive_across_the_table() {
        for route in RouteTable::shared().routes() {
            assert!(
                !(route.requires_auth && route.requires_guest),
                "route '{}' violates the auth/guest invariant",
                route.name
            );
        }
    }

    #[test]
    fn resolves_static_and_param_routes() {
        let table = RouteTable::shared();

        let login = table.resolve("/login");
        assert_eq!(login.route.name, names::LOGIN);

        // Trailing slash and query string are insignificant
        let offers = table.resolve("/student/offers/?page=2");
        assert_eq!(offers.route.name, "student-offers");

        let form = table.resolve("/doctor/evaluation/42");
        assert_eq!(form.route.name, "doctor-evaluation-form");
        assert_eq!(form.params.get("internship_id").map(String::as_str), Some("42"));
    }

    #[test]
    fn unmatched_path_falls_back_to_not_found() {
        let table = RouteTable::shared();
        assert_eq!(table.resolve("/no/such/page").route.name, names::NOT_FOUND);
        assert_eq!(table.resolve("/student/unknown").route.name, names::NOT_FOUND);
    }

    #[test]
    fn role_prefixes_resolve_to_alias_entries() {
        let table = RouteTable::shared();
        let alias = table.resolve("/hospital-admin");
        assert_eq!(alias.route.redirect_to, Some("/hospital-admin/dashboard"));
    }

    #[test]
    fn breadcrumbs_walk_path_prefixes() {
        let table = RouteTable::shared();
        let crumbs = table.breadcrumbs("/doyen/validation");
        assert_eq!(crumbs.len(), 1);
        assert_eq!(crumbs[0].text, "Offer validation");
        assert_eq!(crumbs[0].to, "/doyen/validation");
    }

    #[test]
    fn role_path_helpers() {
        assert_eq!(default_route_for_role(Role::HospitalAdmin), "/hospital-admin/dashboard");
        assert_eq!(role_from_path("/doctor/interns"), Some(Role::Doctor));
        assert_eq!(role_from_path("/dashboard"), None);
    }

    #[test]
    fn accessibility_requires_role_and_full_permission_coverage() {
        let table = RouteTable::shared();
        let route = table.by_name("doyen-validation").unwrap();

        let mut perms = HashSet::new();
        assert!(!is_route_accessible(route, Some(Role::Doyen), &perms));

        perms.insert(Permission::DoyenValidateOffers);
        assert!(is_route_accessible(route, Some(Role::Doyen), &perms));
        assert!(!is_route_accessible(route, Some(Role::Student), &perms));
    }

    #[test]
    #[should_panic(expected = "requires_auth and requires_guest")]
    fn table_construction_rejects_conflicting_flags() {
        RouteTable::from_routes(vec![RouteDescriptor::new("/x", "x").auth().guest()]);
    }
}
