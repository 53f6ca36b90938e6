pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the authenticated route tree.
///
/// ```text
/// /recommendations        GET   ?algorithm=&limit=&strict=
/// /preferences            GET, PUT
/// /cooking                POST
/// /cooking/history        GET   ?limit=
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recommendations",
            get(handlers::recommendations::get_recommendations),
        )
        .route(
            "/preferences",
            get(handlers::preferences::get_preferences)
                .put(handlers::preferences::update_preferences),
        )
        .route("/cooking", post(handlers::cooking::log_cooking))
        .route("/cooking/history", get(handlers::cooking::cooking_history))
}
