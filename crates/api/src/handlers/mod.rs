//! HTTP handler functions, grouped by resource.

pub mod admin;
pub mod auth;
pub mod checkout;
pub mod clients;
pub mod deliverables;
pub mod leads;
pub mod messages;
pub mod milestones;
pub mod notifications;
pub mod portfolio;
pub mod projects;
pub mod referrals;
