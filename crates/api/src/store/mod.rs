//! Storage ports used by the recommendation service.
//!
//! - [`HistoryStore`] -- preferences, cooking events, recommendation log.
//! - [`CatalogueReader`] -- read-only access to recipes and categories.
//!
//! [`postgres::PgStore`] implements both against the shared database;
//! [`memory::MemoryStore`] keeps everything in process for tests and local
//! experiments.

use std::collections::HashMap;

use async_trait::async_trait;
use mealplan_core::recipe::Recipe;
use mealplan_core::recommendation::Algorithm;
use mealplan_core::types::{DbId, Timestamp};
use mealplan_db::models::cooking::CookingEvent;
use mealplan_db::models::preferences::Preferences;

pub mod memory;
pub mod postgres;

/// Boxed error carried by [`StoreError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Downstream failure reported by a store port.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The referenced recipe is not in the catalogue.
    #[error("Recipe with id {0} not found")]
    RecipeNotFound(DbId),

    /// The history store (preferences, events, log) failed.
    #[error("History store failure: {0}")]
    History(#[source] BoxError),

    /// The catalogue read port failed.
    #[error("Catalogue failure: {0}")]
    Catalogue(#[source] BoxError),
}

/// Per-user preferences, cooking history, and the recommendation log.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// The user's preferences row, or `None` when no row exists.
    async fn get_preferences(&self, user_id: DbId) -> Result<Option<Preferences>, StoreError>;

    /// Replace the user's preferred categories, creating the row if needed.
    ///
    /// `created_at` is preserved on update; `updated_at` is bumped.
    async fn upsert_preferences(
        &self,
        user_id: DbId,
        categories: &[DbId],
    ) -> Result<Preferences, StoreError>;

    /// Append a cooking event stamped with the current time.
    ///
    /// Fails with [`StoreError::RecipeNotFound`] when the recipe is missing
    /// at write time, even if an earlier existence check passed.
    async fn append_cooking_event(
        &self,
        user_id: DbId,
        recipe_id: DbId,
        rating: Option<i32>,
    ) -> Result<CookingEvent, StoreError>;

    /// The user's events, newest first, at most `limit` of them.
    async fn cooking_history(
        &self,
        user_id: DbId,
        limit: usize,
    ) -> Result<Vec<CookingEvent>, StoreError>;

    /// Latest `cooked_at` per recipe over all of the user's events.
    async fn last_cooked_times(
        &self,
        user_id: DbId,
    ) -> Result<HashMap<DbId, Timestamp>, StoreError>;

    /// Record that `recipe_ids` were recommended to the user.
    ///
    /// Returns the number of rows written.
    async fn append_recommendation_log(
        &self,
        user_id: DbId,
        recipe_ids: &[DbId],
        algorithm: Algorithm,
    ) -> Result<u64, StoreError>;
}

/// Read-only view of the recipe catalogue.
#[async_trait]
pub trait CatalogueReader: Send + Sync {
    /// Every recipe joined with its optional category.
    async fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError>;

    /// Whether a recipe with this id exists.
    async fn recipe_exists(&self, recipe_id: DbId) -> Result<bool, StoreError>;
}
