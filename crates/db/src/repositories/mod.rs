//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod analytics_repo;
pub mod client_repo;
pub mod deliverable_repo;
pub mod event_repo;
pub mod lead_repo;
pub mod message_repo;
pub mod milestone_repo;
pub mod notification_repo;
pub mod payment_repo;
pub mod portfolio_repo;
pub mod project_repo;
pub mod referral_repo;
pub mod role_repo;
pub mod session_repo;
pub mod subscription_repo;
pub mod user_repo;

pub use analytics_repo::AnalyticsRepo;
pub use client_repo::ClientRepo;
pub use deliverable_repo::DeliverableRepo;
pub use event_repo::EventRepo;
pub use lead_repo::LeadRepo;
pub use message_repo::MessageRepo;
pub use milestone_repo::MilestoneRepo;
pub use notification_repo::NotificationRepo;
pub use payment_repo::PaymentRepo;
pub use portfolio_repo::PortfolioRepo;
pub use project_repo::ProjectRepo;
pub use referral_repo::ReferralRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use subscription_repo::SubscriptionRepo;
pub use user_repo::UserRepo;
