use axum::extract::State;
use axum::Json;
use mealplan_core::recommendation::RecommendationResponse;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::middleware::auth::AuthUser;
use crate::recommender::RecommendationQuery;
use crate::state::AppState;

/// Query parameters for `GET /recommendations`.
///
/// `limit` stays a string so non-numeric input can be coerced or rejected
/// depending on `strict`.
#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub algorithm: Option<String>,
    pub limit: Option<String>,
    #[serde(default)]
    pub strict: bool,
}

/// GET /recommendations
///
/// Rank the catalogue for the caller.
pub async fn get_recommendations(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<RecommendationParams>,
) -> AppResult<Json<RecommendationResponse>> {
    let query = RecommendationQuery {
        algorithm: params.algorithm,
        limit: params.limit,
        strict: params.strict,
    };
    let response = state.recommender.recommend(auth.user_id, &query).await?;
    Ok(Json(response))
}
