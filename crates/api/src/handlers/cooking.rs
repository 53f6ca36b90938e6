//! Handlers for the cooking log.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mealplan_db::models::cooking::{CookingEvent, CreateCookingEvent};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /cooking/history`.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<String>,
}

/// POST /cooking
///
/// Record that the caller cooked a recipe. Returns 201.
pub async fn log_cooking(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCookingEvent>,
) -> AppResult<impl IntoResponse> {
    state.recommender.log_cooking(auth.user_id, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Cooking logged successfully" })),
    ))
}

/// GET /cooking/history
///
/// The caller's cooking events, newest first.
pub async fn cooking_history(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<HistoryParams>,
) -> AppResult<Json<Vec<CookingEvent>>> {
    let events = state
        .recommender
        .cooking_history(auth.user_id, params.limit.as_deref())
        .await?;
    Ok(Json(events))
}
