//! Read-only queries against the catalogue's `recipes` and `categories` tables.

use mealplan_core::recipe::Recipe;
use mealplan_core::types::DbId;
use sqlx::PgPool;

use crate::models::recipe::RecipeRow;

/// Catalogue reads used by the recommender.
pub struct RecipeRepo;

impl RecipeRepo {
    /// List every recipe joined with its optional category.
    pub async fn list_with_categories(pool: &PgPool) -> Result<Vec<Recipe>, sqlx::Error> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            "SELECT r.id, r.name, r.description, r.category_id, \
                    c.name AS category_name, c.description AS category_description \
             FROM recipes r \
             LEFT JOIN categories c ON c.id = r.category_id \
             ORDER BY r.id",
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    /// Whether a recipe with this id exists.
    pub async fn exists(pool: &PgPool, recipe_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM recipes WHERE id = $1)")
            .bind(recipe_id)
            .fetch_one(pool)
            .await
    }
}
