//! Recommendations API server library.
//!
//! Exposes the building blocks (config, state, error handling, store ports,
//! the recommendation service, routes) so integration tests and the binary
//! entrypoint can both access them.

pub mod app;
pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod recommender;
pub mod routes;
pub mod state;
pub mod store;
