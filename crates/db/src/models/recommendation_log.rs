//! Recommendation log entity model.

use mealplan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `recommendation_log` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecommendationLogEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub recipe_id: DbId,
    pub recommended_at: Timestamp,
    pub algorithm: String,
}
