//! Postgres-backed store delegating to the `mealplan_db` repositories.

use std::collections::HashMap;

use async_trait::async_trait;
use mealplan_core::recipe::Recipe;
use mealplan_core::recommendation::Algorithm;
use mealplan_core::types::{DbId, Timestamp};
use mealplan_db::models::cooking::CookingEvent;
use mealplan_db::models::preferences::Preferences;
use mealplan_db::repositories::{
    CookingEventRepo, PreferencesRepo, RecipeRepo, RecommendationLogRepo,
};
use mealplan_db::DbPool;

use super::{CatalogueReader, HistoryStore, StoreError};

/// History store and catalogue reader over one connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn history(err: sqlx::Error) -> StoreError {
    StoreError::History(Box::new(err))
}

fn catalogue(err: sqlx::Error) -> StoreError {
    StoreError::Catalogue(Box::new(err))
}

/// Foreign key from `cooking_events.recipe_id` onto `recipes.id`.
const COOKING_RECIPE_FK: &str = "cooking_events_recipe_id_fkey";

/// Classify a failed cooking-event insert.
///
/// A foreign key violation (SQLSTATE 23503) on the recipe reference means the
/// recipe was deleted concurrently; anything else is a history failure.
fn cooking_insert(err: sqlx::Error, recipe_id: DbId) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23503")
            && db_err.constraint() == Some(COOKING_RECIPE_FK)
        {
            return StoreError::RecipeNotFound(recipe_id);
        }
    }
    history(err)
}

#[async_trait]
impl HistoryStore for PgStore {
    async fn get_preferences(&self, user_id: DbId) -> Result<Option<Preferences>, StoreError> {
        PreferencesRepo::find_by_user(&self.pool, user_id)
            .await
            .map_err(history)
    }

    async fn upsert_preferences(
        &self,
        user_id: DbId,
        categories: &[DbId],
    ) -> Result<Preferences, StoreError> {
        PreferencesRepo::upsert(&self.pool, user_id, categories)
            .await
            .map_err(history)
    }

    async fn append_cooking_event(
        &self,
        user_id: DbId,
        recipe_id: DbId,
        rating: Option<i32>,
    ) -> Result<CookingEvent, StoreError> {
        CookingEventRepo::insert(&self.pool, user_id, recipe_id, rating)
            .await
            .map_err(|err| cooking_insert(err, recipe_id))?
            .ok_or(StoreError::RecipeNotFound(recipe_id))
    }

    async fn cooking_history(
        &self,
        user_id: DbId,
        limit: usize,
    ) -> Result<Vec<CookingEvent>, StoreError> {
        CookingEventRepo::list_for_user(&self.pool, user_id, limit as i64)
            .await
            .map_err(history)
    }

    async fn last_cooked_times(
        &self,
        user_id: DbId,
    ) -> Result<HashMap<DbId, Timestamp>, StoreError> {
        CookingEventRepo::last_cooked_times(&self.pool, user_id)
            .await
            .map_err(history)
    }

    async fn append_recommendation_log(
        &self,
        user_id: DbId,
        recipe_ids: &[DbId],
        algorithm: Algorithm,
    ) -> Result<u64, StoreError> {
        RecommendationLogRepo::insert_batch(&self.pool, user_id, recipe_ids, algorithm.as_str())
            .await
            .map_err(history)
    }
}

#[async_trait]
impl CatalogueReader for PgStore {
    async fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        RecipeRepo::list_with_categories(&self.pool)
            .await
            .map_err(catalogue)
    }

    async fn recipe_exists(&self, recipe_id: DbId) -> Result<bool, StoreError> {
        RecipeRepo::exists(&self.pool, recipe_id)
            .await
            .map_err(catalogue)
    }
}
