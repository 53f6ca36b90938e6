//! Background tasks started alongside the HTTP server.
//!
//! - [`recommendation_log`] -- worker pool that persists recommendation log rows.

pub mod recommendation_log;
