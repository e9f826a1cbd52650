//! Long-running jobs spawned next to the HTTP server.
//!
//! The only resident job today is the daily [`maintenance`] sweep; it takes
//! a [`tokio_util::sync::CancellationToken`] so shutdown can drain it
//! alongside the listener.

pub mod maintenance;
