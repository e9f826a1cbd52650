//! Shared response envelope for API handlers.
//!
//! Every successful JSON body the portal and back office receive is shaped
//! `{ "data": ... }`; failures are shaped `{ "error": ..., "code": ... }` by
//! [`AppError`](crate::error::AppError). The polling SPA relies on that
//! split to tell a payload apart from a fault without inspecting status
//! codes, so handlers return [`DataResponse`] rather than building ad-hoc
//! `serde_json::json!` envelopes.

use serde::Serialize;

/// Standard `{ "data": T }` success envelope.
///
/// `T` is whatever the endpoint yields: an entity struct, a `Vec` of rows,
/// or an inline `serde_json::json!` object for one-off shapes like the
/// checkout session.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: projects }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
