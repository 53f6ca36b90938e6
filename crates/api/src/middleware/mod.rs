//! Request extractors applied before handlers run.
//!
//! - [`auth::AuthUser`] -- the caller identity read from the gateway's bearer token.

pub mod auth;
