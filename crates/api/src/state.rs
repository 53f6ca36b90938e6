use std::sync::Arc;

use crate::config::ServerConfig;
use crate::recommender::RecommendationService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: every field is an `Arc` or wraps one.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Recommendation, preference, and cooking operations.
    pub recommender: RecommendationService,
}
