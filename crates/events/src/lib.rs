//! Verdant domain event bus and notification infrastructure.
//!
//! Building blocks for the platform-wide event system:
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DomainEvent`] -- the canonical domain event envelope.
//! - [`EventPersistence`] -- background service that durably writes every
//!   event to the `events` table and drives the notification fan-out.
//! - [`NotificationFanout`] -- turns persisted events into per-user
//!   notification rows, with email delivery for critical event types.

pub mod bus;
pub mod delivery;
pub mod fanout;
pub mod persistence;

pub use bus::{
    DomainEvent, EventBus, DELIVERABLE_UPLOADED, LEAD_CONVERTED, LEAD_CREATED, LEAD_QUALIFIED,
    MESSAGE_SENT, MILESTONE_COMPLETED, MILESTONE_DUE_SOON, PAYMENT_SUCCEEDED, PROJECT_CREATED,
};
pub use delivery::email::{EmailConfig, EmailDelivery};
pub use fanout::NotificationFanout;
pub use persistence::EventPersistence;
