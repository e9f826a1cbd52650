//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - Where patches exist, an update DTO with all-`Option` fields

pub mod client;
pub mod deliverable;
pub mod event;
pub mod lead;
pub mod message;
pub mod milestone;
pub mod notification;
pub mod payment;
pub mod portfolio;
pub mod project;
pub mod referral;
pub mod role;
pub mod session;
pub mod subscription;
pub mod user;
