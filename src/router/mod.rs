//! Navigation: the declarative route table, the access-control evaluator
//! and the navigator that drives them.

pub mod evaluator;
pub mod navigator;
pub mod routes;

pub use evaluator::{evaluate, AccessDecision};
pub use navigator::{NavError, NavigationOutcome, Navigator, ViewLoadError, ViewLoader};
pub use routes::{
    default_route_for_role, is_route_accessible, role_from_path, names, Breadcrumb, Prefetch,
    ResolvedRoute, RouteDescriptor, RouteTable,
};
