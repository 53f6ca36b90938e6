//! In-process store for tests and local experiments.
//!
//! Holds the catalogue, preferences, cooking events, and recommendation log
//! behind a single mutex. Never held across an `.await`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use mealplan_core::recipe::{Category, Recipe};
use mealplan_core::recommendation::Algorithm;
use mealplan_core::types::{DbId, Timestamp};
use mealplan_db::models::cooking::CookingEvent;
use mealplan_db::models::preferences::Preferences;
use mealplan_db::models::recommendation_log::RecommendationLogEntry;

use super::{CatalogueReader, HistoryStore, StoreError};

#[derive(Default)]
struct Inner {
    categories: HashMap<DbId, Category>,
    recipes: Vec<Recipe>,
    preferences: HashMap<DbId, Preferences>,
    events: Vec<CookingEvent>,
    log: Vec<RecommendationLogEntry>,
    next_event_id: DbId,
    next_log_id: DbId,
}

/// History store and catalogue reader kept entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_log_writes: AtomicBool,
    fail_catalogue: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add or replace a category.
    pub fn add_category(&self, id: DbId, name: &str) {
        let category = Category {
            id,
            name: name.to_string(),
            description: None,
        };
        self.lock().categories.insert(id, category);
    }

    /// Add a recipe, joining it to a previously added category.
    ///
    /// A `category_id` with no matching category leaves the recipe
    /// uncategorised, like a dangling foreign key set to NULL.
    pub fn add_recipe(&self, id: DbId, name: &str, category_id: Option<DbId>) {
        let mut inner = self.lock();
        let category = category_id.and_then(|cid| inner.categories.get(&cid).cloned());
        inner.recipes.push(Recipe {
            id,
            name: name.to_string(),
            description: None,
            category_id: category.as_ref().map(|c| c.id),
            category,
        });
    }

    /// Store a preferences row directly, bypassing normalisation.
    pub fn set_preferences(&self, user_id: DbId, categories: Vec<DbId>) {
        let now = Utc::now();
        self.lock().preferences.insert(
            user_id,
            Preferences {
                user_id,
                preferred_categories: categories,
                created_at: now,
                updated_at: now,
            },
        );
    }

    /// Record a cooking event at an explicit time.
    pub fn record_cooked_at(&self, user_id: DbId, recipe_id: DbId, cooked_at: Timestamp) {
        let mut inner = self.lock();
        push_event(&mut inner, user_id, recipe_id, cooked_at, None);
    }

    /// Snapshot of every recommendation log row written so far.
    pub fn recommendation_log(&self) -> Vec<RecommendationLogEntry> {
        self.lock().log.clone()
    }

    /// Snapshot of every cooking event, in insertion order.
    pub fn cooking_events(&self) -> Vec<CookingEvent> {
        self.lock().events.clone()
    }

    /// Make subsequent recommendation-log writes fail.
    pub fn fail_recommendation_log(&self, fail: bool) {
        self.fail_log_writes.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent catalogue reads fail.
    pub fn fail_catalogue(&self, fail: bool) {
        self.fail_catalogue.store(fail, Ordering::SeqCst);
    }

    fn check_catalogue(&self) -> Result<(), StoreError> {
        if self.fail_catalogue.load(Ordering::SeqCst) {
            return Err(StoreError::Catalogue("catalogue unavailable".into()));
        }
        Ok(())
    }
}

fn push_event(
    inner: &mut Inner,
    user_id: DbId,
    recipe_id: DbId,
    cooked_at: Timestamp,
    rating: Option<i32>,
) -> CookingEvent {
    inner.next_event_id += 1;
    let event = CookingEvent {
        id: inner.next_event_id,
        user_id,
        recipe_id,
        cooked_at,
        rating,
    };
    inner.events.push(event.clone());
    event
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn get_preferences(&self, user_id: DbId) -> Result<Option<Preferences>, StoreError> {
        Ok(self.lock().preferences.get(&user_id).cloned())
    }

    async fn upsert_preferences(
        &self,
        user_id: DbId,
        categories: &[DbId],
    ) -> Result<Preferences, StoreError> {
        let now = Utc::now();
        let mut inner = self.lock();
        let prefs = inner
            .preferences
            .entry(user_id)
            .or_insert_with(|| Preferences::empty(user_id, now));
        prefs.preferred_categories = categories.to_vec();
        prefs.updated_at = now;
        Ok(prefs.clone())
    }

    async fn append_cooking_event(
        &self,
        user_id: DbId,
        recipe_id: DbId,
        rating: Option<i32>,
    ) -> Result<CookingEvent, StoreError> {
        let mut inner = self.lock();
        if !inner.recipes.iter().any(|r| r.id == recipe_id) {
            return Err(StoreError::RecipeNotFound(recipe_id));
        }
        Ok(push_event(&mut inner, user_id, recipe_id, Utc::now(), rating))
    }

    async fn cooking_history(
        &self,
        user_id: DbId,
        limit: usize,
    ) -> Result<Vec<CookingEvent>, StoreError> {
        let inner = self.lock();
        let mut events: Vec<CookingEvent> = inner
            .events
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.cooked_at.cmp(&a.cooked_at).then(b.id.cmp(&a.id)));
        events.truncate(limit);
        Ok(events)
    }

    async fn last_cooked_times(
        &self,
        user_id: DbId,
    ) -> Result<HashMap<DbId, Timestamp>, StoreError> {
        let inner = self.lock();
        let mut latest: HashMap<DbId, Timestamp> = HashMap::new();
        for event in inner.events.iter().filter(|e| e.user_id == user_id) {
            latest
                .entry(event.recipe_id)
                .and_modify(|t| *t = (*t).max(event.cooked_at))
                .or_insert(event.cooked_at);
        }
        Ok(latest)
    }

    async fn append_recommendation_log(
        &self,
        user_id: DbId,
        recipe_ids: &[DbId],
        algorithm: Algorithm,
    ) -> Result<u64, StoreError> {
        if self.fail_log_writes.load(Ordering::SeqCst) {
            return Err(StoreError::History("recommendation log unavailable".into()));
        }
        let now = Utc::now();
        let mut inner = self.lock();
        for &recipe_id in recipe_ids {
            inner.next_log_id += 1;
            let id = inner.next_log_id;
            inner.log.push(RecommendationLogEntry {
                id,
                user_id,
                recipe_id,
                recommended_at: now,
                algorithm: algorithm.as_str().to_string(),
            });
        }
        Ok(recipe_ids.len() as u64)
    }
}

#[async_trait]
impl CatalogueReader for MemoryStore {
    async fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        self.check_catalogue()?;
        Ok(self.lock().recipes.clone())
    }

    async fn recipe_exists(&self, recipe_id: DbId) -> Result<bool, StoreError> {
        self.check_catalogue()?;
        Ok(self.lock().recipes.iter().any(|r| r.id == recipe_id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[tokio::test]
    async fn upsert_keeps_created_at() {
        let store = MemoryStore::new();
        let first = store.upsert_preferences(1, &[2]).await.unwrap();
        let second = store.upsert_preferences(1, &[3, 4]).await.unwrap();
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(second.preferred_categories, vec![3, 4]);
    }

    #[tokio::test]
    async fn last_cooked_takes_latest_per_recipe() {
        let store = MemoryStore::new();
        let now = Utc::now();
        store.record_cooked_at(1, 10, now - Duration::days(40));
        store.record_cooked_at(1, 10, now - Duration::days(3));
        store.record_cooked_at(1, 11, now - Duration::days(8));
        store.record_cooked_at(2, 10, now);

        let latest = store.last_cooked_times(1).await.unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[&10], now - Duration::days(3));
        assert_eq!(latest[&11], now - Duration::days(8));
    }

    #[tokio::test]
    async fn history_is_newest_first_and_limited() {
        let store = MemoryStore::new();
        let now = Utc::now();
        for days in [5, 1, 9, 3] {
            store.record_cooked_at(1, days, now - Duration::days(days));
        }
        let history = store.cooking_history(1, 3).await.unwrap();
        let recipes: Vec<DbId> = history.iter().map(|e| e.recipe_id).collect();
        assert_eq!(recipes, vec![1, 3, 5]);
    }

    #[tokio::test]
    async fn append_rejects_missing_recipe() {
        let store = MemoryStore::new();
        store.add_recipe(1, "Toast", None);

        let result = store.append_cooking_event(4, 2, None).await;
        assert!(matches!(result, Err(StoreError::RecipeNotFound(2))));
        assert!(store.cooking_events().is_empty());

        let event = store.append_cooking_event(4, 1, Some(3)).await.unwrap();
        assert_eq!(event.recipe_id, 1);
    }

    #[tokio::test]
    async fn dangling_category_leaves_recipe_uncategorised() {
        let store = MemoryStore::new();
        store.add_category(1, "Soup");
        store.add_recipe(1, "Minestrone", Some(1));
        store.add_recipe(2, "Mystery", Some(99));

        let recipes = store.list_recipes().await.unwrap();
        assert_eq!(recipes[0].category_id, Some(1));
        assert_eq!(recipes[1].category_id, None);
        assert!(recipes[1].category.is_none());
    }

    #[tokio::test]
    async fn injected_log_failure() {
        let store = MemoryStore::new();
        store.fail_recommendation_log(true);
        assert!(store
            .append_recommendation_log(1, &[1, 2], Algorithm::Hybrid)
            .await
            .is_err());
        store.fail_recommendation_log(false);
        assert_eq!(
            store
                .append_recommendation_log(1, &[1, 2], Algorithm::Hybrid)
                .await
                .unwrap(),
            2
        );
        assert_eq!(store.recommendation_log().len(), 2);
    }
}
