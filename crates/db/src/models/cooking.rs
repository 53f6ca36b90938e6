//! Cooking event entity model and DTO.

use mealplan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `cooking_events` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct CookingEvent {
    pub id: DbId,
    pub user_id: DbId,
    pub recipe_id: DbId,
    pub cooked_at: Timestamp,
    pub rating: Option<i32>,
}

/// DTO for `POST /cooking`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCookingEvent {
    pub recipe_id: DbId,
    pub rating: Option<i32>,
}

/// One row of the per-recipe `MAX(cooked_at)` aggregate.
#[derive(Debug, Clone, FromRow)]
pub struct LastCookedRow {
    pub recipe_id: DbId,
    pub last_cooked_at: Timestamp,
}
