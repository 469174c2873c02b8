pub mod auth;
pub mod nav;
pub mod notify;
pub mod offers;
pub mod role;
