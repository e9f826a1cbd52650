//! Payment and subscription status constants.
//!
//! Status ID constants must match the seed data in
//! `20250301000008_create_payments_and_subscriptions.sql`. Payments are
//! written by the checkout handshake only: a session opens a PENDING row,
//! and the provider webhook moves it to SUCCEEDED or FAILED. REFUNDED is
//! applied manually by finance when a project is unwound.

/// Checkout session opened, provider callback not yet received.
pub const PAYMENT_PENDING: i16 = 1;

/// Provider confirmed the charge; the lead converted on this payment.
pub const PAYMENT_SUCCEEDED: i16 = 2;

/// Provider declined or the session expired.
pub const PAYMENT_FAILED: i16 = 3;

/// Charge reversed after the fact.
pub const PAYMENT_REFUNDED: i16 = 4;

/// Human-readable name for a payment status ID.
pub fn payment_status_name(status: i16) -> Option<&'static str> {
    match status {
        PAYMENT_PENDING => Some("pending"),
        PAYMENT_SUCCEEDED => Some("succeeded"),
        PAYMENT_FAILED => Some("failed"),
        PAYMENT_REFUNDED => Some("refunded"),
        _ => None,
    }
}

/// Care-plan subscription in good standing.
pub const SUBSCRIPTION_ACTIVE: i16 = 1;

/// A renewal charge failed; the plan is grace-period billing.
pub const SUBSCRIPTION_PAST_DUE: i16 = 2;

/// Canceled by the client or by staff. Terminal.
pub const SUBSCRIPTION_CANCELED: i16 = 3;

/// Human-readable name for a subscription status ID.
pub fn subscription_status_name(status: i16) -> Option<&'static str> {
    match status {
        SUBSCRIPTION_ACTIVE => Some("active"),
        SUBSCRIPTION_PAST_DUE => Some("past_due"),
        SUBSCRIPTION_CANCELED => Some("canceled"),
        _ => None,
    }
}
