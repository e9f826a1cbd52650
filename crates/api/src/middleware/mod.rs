//! Request guards applied per route group.
//!
//! - [`auth::AuthUser`] -- resolves the Bearer token into the calling user.
//! - [`rbac::RequireAdmin`] -- back-office routes, `admin` only.
//! - [`rbac::RequireTeam`] -- staff routes, `team` or `admin`.
//! - [`rbac::RequireAuth`] -- portal routes, any signed-in account.

pub mod auth;
pub mod rbac;
