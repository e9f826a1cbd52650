//! Credential handling for staff and portal accounts.
//!
//! - [`password`] -- Argon2id hashing plus the minimum-length policy applied
//!   to every human-chosen password.
//! - [`jwt`] -- the access/refresh token pair: short-lived HS256 access
//!   tokens and rotating refresh tokens stored server-side as digests.

pub mod jwt;
pub mod password;
