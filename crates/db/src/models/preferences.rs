//! Preferences entity model and DTO.

use mealplan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `preferences` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Preferences {
    pub user_id: DbId,
    pub preferred_categories: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Preferences {
    /// An unsaved, empty preferences value for a user with no row.
    pub fn empty(user_id: DbId, now: Timestamp) -> Self {
        Self {
            user_id,
            preferred_categories: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// DTO for `PUT /preferences`.
#[derive(Debug, Deserialize)]
pub struct UpdatePreferences {
    pub preferred_categories: Vec<DbId>,
}
