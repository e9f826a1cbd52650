//! Domain logic for the Verdant landscape-design platform.
//!
//! This crate contains no I/O and no database dependency: tier routing,
//! lead and milestone state machines, deliverable upload constraints, and
//! the shared error/type definitions. Evaluation is done against values the
//! caller has already loaded.

pub mod client;
pub mod error;
pub mod lead;
pub mod milestone;
pub mod pagination;
pub mod payment;
pub mod project;
pub mod roles;
pub mod tier;
pub mod types;
pub mod upload;
