//! Repository for the `recommendation_log` table.

use mealplan_core::types::DbId;
use sqlx::PgPool;

/// Append-only analytics log of emitted recommendations.
pub struct RecommendationLogRepo;

impl RecommendationLogRepo {
    /// Insert one row per recipe id in a single statement.
    ///
    /// Returns the number of rows written.
    pub async fn insert_batch(
        pool: &PgPool,
        user_id: DbId,
        recipe_ids: &[DbId],
        algorithm: &str,
    ) -> Result<u64, sqlx::Error> {
        if recipe_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO recommendation_log (user_id, recipe_id, algorithm) \
             SELECT $1, recipe_id, $3 FROM UNNEST($2::BIGINT[]) AS t(recipe_id)",
        )
        .bind(user_id)
        .bind(recipe_ids)
        .bind(algorithm)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
