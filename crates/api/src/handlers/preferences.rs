use axum::extract::State;
use axum::Json;
use mealplan_db::models::preferences::{Preferences, UpdatePreferences};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /preferences
///
/// Returns an empty, unsaved row when the caller has never set preferences.
pub async fn get_preferences(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Preferences>> {
    let prefs = state.recommender.preferences(auth.user_id).await?;
    Ok(Json(prefs))
}

/// PUT /preferences
pub async fn update_preferences(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdatePreferences>,
) -> AppResult<Json<Preferences>> {
    let prefs = state
        .recommender
        .update_preferences(auth.user_id, &input.preferred_categories)
        .await?;
    Ok(Json(prefs))
}
