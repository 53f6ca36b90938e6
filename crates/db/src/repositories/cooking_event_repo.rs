//! Repository for the `cooking_events` table.

use std::collections::HashMap;

use mealplan_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::cooking::{CookingEvent, LastCookedRow};

/// Column list for `cooking_events` queries.
const COLUMNS: &str = "id, user_id, recipe_id, cooked_at, rating";

/// Append-only access to a user's cooking history.
pub struct CookingEventRepo;

impl CookingEventRepo {
    /// Append a cooking event stamped with the database's current time.
    ///
    /// Returns `None` without inserting when the recipe does not exist.
    pub async fn insert(
        pool: &PgPool,
        user_id: DbId,
        recipe_id: DbId,
        rating: Option<i32>,
    ) -> Result<Option<CookingEvent>, sqlx::Error> {
        let query = format!(
            "INSERT INTO cooking_events (user_id, recipe_id, rating) \
             SELECT $1, $2, $3 \
             WHERE EXISTS (SELECT 1 FROM recipes WHERE id = $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CookingEvent>(&query)
            .bind(user_id)
            .bind(recipe_id)
            .bind(rating)
            .fetch_optional(pool)
            .await
    }

    /// List a user's events, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<CookingEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cooking_events \
             WHERE user_id = $1 \
             ORDER BY cooked_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, CookingEvent>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Latest `cooked_at` per recipe for a user, in one query.
    pub async fn last_cooked_times(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<HashMap<DbId, Timestamp>, sqlx::Error> {
        let rows = sqlx::query_as::<_, LastCookedRow>(
            "SELECT recipe_id, MAX(cooked_at) AS last_cooked_at \
             FROM cooking_events \
             WHERE user_id = $1 \
             GROUP BY recipe_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.recipe_id, row.last_cooked_at))
            .collect())
    }
}
