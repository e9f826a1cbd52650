//! Shared scalar aliases used across the workspace.

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Money is integer USD cents end to end; floats never touch an amount.
pub type Cents = i64;
