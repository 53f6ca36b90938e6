//! Domain logic for the meal-planning recommender.
//!
//! This crate has no database or HTTP dependencies. Everything here operates
//! on data the caller has already loaded, so the scoring rules can be tested
//! in isolation and reused by any store implementation.

pub mod cooking;
pub mod error;
pub mod preferences;
pub mod recipe;
pub mod recommendation;
pub mod scoring;
pub mod types;
