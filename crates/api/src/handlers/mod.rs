//! Request handlers.
//!
//! Each submodule extracts the caller and inputs, delegates to the
//! [`RecommendationService`](crate::recommender::RecommendationService), and
//! maps errors via [`AppError`](crate::error::AppError).

pub mod cooking;
pub mod preferences;
pub mod recommendations;
