//! Repository for the `preferences` table.

use mealplan_core::types::DbId;
use sqlx::PgPool;

use crate::models::preferences::Preferences;

/// Column list for `preferences` queries.
const COLUMNS: &str = "user_id, preferred_categories, created_at, updated_at";

/// Reads and upserts per-user category preferences.
pub struct PreferencesRepo;

impl PreferencesRepo {
    /// Get the preferences row for a user.
    ///
    /// Returns `None` when the user has never saved preferences, which is
    /// different from a row whose category list is empty.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Preferences>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM preferences WHERE user_id = $1");
        sqlx::query_as::<_, Preferences>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace a user's preferred categories.
    ///
    /// Uses `INSERT ... ON CONFLICT (user_id) DO UPDATE` so concurrent
    /// upserts for the same user resolve to the last writer. `created_at`
    /// is kept from the existing row.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        categories: &[DbId],
    ) -> Result<Preferences, sqlx::Error> {
        let query = format!(
            "INSERT INTO preferences (user_id, preferred_categories) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET \
                preferred_categories = EXCLUDED.preferred_categories, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Preferences>(&query)
            .bind(user_id)
            .bind(categories)
            .fetch_one(pool)
            .await
    }
}
