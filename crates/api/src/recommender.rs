//! Recommendation service: the operations behind every authenticated route.
//!
//! Handlers stay thin and call into [`RecommendationService`], which owns the
//! validation order, reads from the store ports, runs the scoring engine, and
//! hands log rows to the background logger.

use std::sync::Arc;

use chrono::Utc;
use mealplan_core::cooking::{validate_rating, validate_recipe_id, validate_user_id};
use mealplan_core::error::CoreError;
use mealplan_core::preferences::{normalize_categories, PreferenceSet};
use mealplan_core::recommendation::{
    parse_limit_lenient, parse_limit_strict, Algorithm, RecommendationResponse,
};
use mealplan_core::scoring::{self, ScoringInput};
use mealplan_core::types::DbId;
use mealplan_db::models::cooking::{CookingEvent, CreateCookingEvent};
use mealplan_db::models::preferences::Preferences;

use crate::background::recommendation_log::{LogJob, RecommendationLogger};
use crate::error::AppResult;
use crate::store::{CatalogueReader, HistoryStore};

/// Raw recommendation query parameters.
#[derive(Debug, Clone, Default)]
pub struct RecommendationQuery {
    pub algorithm: Option<String>,
    pub limit: Option<String>,
    /// Reject unknown algorithms and out-of-range limits instead of coercing.
    pub strict: bool,
}

#[derive(Clone)]
pub struct RecommendationService {
    history: Arc<dyn HistoryStore>,
    catalogue: Arc<dyn CatalogueReader>,
    logger: RecommendationLogger,
}

impl RecommendationService {
    pub fn new(
        history: Arc<dyn HistoryStore>,
        catalogue: Arc<dyn CatalogueReader>,
        logger: RecommendationLogger,
    ) -> Self {
        Self {
            history,
            catalogue,
            logger,
        }
    }

    /// Rank the catalogue for a user.
    ///
    /// The clock is sampled once so every recipe in the response is scored
    /// against the same instant. Logging is queued after ranking and never
    /// affects the response.
    pub async fn recommend(
        &self,
        user_id: DbId,
        query: &RecommendationQuery,
    ) -> AppResult<RecommendationResponse> {
        validate_user_id(user_id)?;

        let (algorithm, limit) = if query.strict {
            (
                Algorithm::parse_strict(query.algorithm.as_deref())?,
                parse_limit_strict(query.limit.as_deref())?,
            )
        } else {
            (
                Algorithm::coerce(query.algorithm.as_deref()),
                parse_limit_lenient(query.limit.as_deref()),
            )
        };

        let now = Utc::now();

        let preferences = match algorithm {
            Algorithm::TimeDecay => PreferenceSet::Absent,
            Algorithm::Preference | Algorithm::Hybrid => {
                let stored = self.history.get_preferences(user_id).await?;
                let categories = stored.as_ref().map(|p| p.preferred_categories.as_slice());
                PreferenceSet::from_stored(categories)
            }
        };
        if algorithm == Algorithm::Preference && preferences.is_absent() {
            return Err(CoreError::PreferencesNotSet.into());
        }

        let last_cooked = self.history.last_cooked_times(user_id).await?;
        let recipes = self.catalogue.list_recipes().await?;

        let input = ScoringInput {
            recipes: &recipes,
            last_cooked: &last_cooked,
            preferences: &preferences,
            now,
        };
        let ranking = scoring::rank(algorithm, &input, limit, &mut rand::rng());

        tracing::debug!(
            user_id,
            algorithm = %algorithm,
            limit,
            total_scored = ranking.total_scored,
            returned = ranking.recipes.len(),
            mode = ?ranking.mode,
            "Generated recommendations"
        );

        if !ranking.recipes.is_empty() {
            self.logger.enqueue(LogJob {
                user_id,
                recipe_ids: ranking.recipes.iter().map(|r| r.recipe.id).collect(),
                algorithm,
            });
        }

        Ok(RecommendationResponse {
            recipes: ranking.recipes,
            algorithm,
            generated_at: now,
            total_scored: ranking.total_scored,
        })
    }

    /// The user's preferences, or an unsaved empty value when none exist.
    pub async fn preferences(&self, user_id: DbId) -> AppResult<Preferences> {
        validate_user_id(user_id)?;
        let stored = self.history.get_preferences(user_id).await?;
        Ok(stored.unwrap_or_else(|| Preferences::empty(user_id, Utc::now())))
    }

    /// Replace the user's preferred categories.
    ///
    /// Non-positive and duplicate ids are dropped before storing. Ids are not
    /// checked against the catalogue.
    pub async fn update_preferences(
        &self,
        user_id: DbId,
        categories: &[DbId],
    ) -> AppResult<Preferences> {
        validate_user_id(user_id)?;
        let normalized = normalize_categories(categories);
        let prefs = self.history.upsert_preferences(user_id, &normalized).await?;
        tracing::info!(
            user_id,
            categories = normalized.len(),
            "Preferences updated"
        );
        Ok(prefs)
    }

    /// Record that the user cooked a recipe.
    pub async fn log_cooking(
        &self,
        user_id: DbId,
        input: &CreateCookingEvent,
    ) -> AppResult<CookingEvent> {
        validate_user_id(user_id)?;
        validate_recipe_id(input.recipe_id)?;
        validate_rating(input.rating)?;

        if !self.catalogue.recipe_exists(input.recipe_id).await? {
            return Err(CoreError::RecipeNotFound(input.recipe_id).into());
        }

        let event = self
            .history
            .append_cooking_event(user_id, input.recipe_id, input.rating)
            .await?;
        tracing::info!(
            user_id,
            recipe_id = input.recipe_id,
            rating = ?input.rating,
            "Cooking logged"
        );
        Ok(event)
    }

    /// The user's cooking events, newest first.
    ///
    /// The limit follows the lenient recommendation rules.
    pub async fn cooking_history(
        &self,
        user_id: DbId,
        limit: Option<&str>,
    ) -> AppResult<Vec<CookingEvent>> {
        validate_user_id(user_id)?;
        let limit = parse_limit_lenient(limit);
        Ok(self.history.cooking_history(user_id, limit).await?)
    }
}
