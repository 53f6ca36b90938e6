//! Recipe scoring engine.
//!
//! Scores every recipe in the catalogue for one user, orders them by score
//! descending, breaks ties uniformly at random, truncates to the requested
//! limit, and attaches a human-readable reason to each pick.
//!
//! The engine is pure: the caller loads the catalogue, the user's
//! last-cooked map, and the preference state, and samples `now` once so
//! every `days_since` in a ranking is computed against the same instant.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::preferences::PreferenceSet;
use crate::recipe::Recipe;
use crate::recommendation::Algorithm;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Time score for a recipe the user has never cooked.
pub const TIME_SCORE_NEVER_COOKED: f64 = 0.5;
/// Time score for a recipe cooked within the last week.
pub const TIME_SCORE_RECENT: f64 = 0.1;
/// Time score for a recipe cooked one week to one month ago.
pub const TIME_SCORE_REVISIT: f64 = 0.7;
/// Time score for a recipe cooked one to three months ago.
pub const TIME_SCORE_MISSING: f64 = 1.0;
/// Time score for a recipe last cooked three or more months ago.
pub const TIME_SCORE_LONG_AGO: f64 = 1.2;

/// Band edges in whole days.
pub const RECENT_DAYS: i64 = 7;
pub const REVISIT_DAYS: i64 = 30;
pub const LONG_AGO_DAYS: i64 = 90;

/// Preference score when the recipe's category is preferred.
pub const PREF_SCORE_MATCH: f64 = 1.0;
/// Preference score when the user has preferences but not this category.
pub const PREF_SCORE_MISS: f64 = 0.3;
/// Preference score for every recipe when the user has no preferences row.
pub const PREF_SCORE_NEUTRAL: f64 = 0.7;

/// Hybrid weights.
pub const HYBRID_TIME_WEIGHT: f64 = 0.6;
pub const HYBRID_PREF_WEIGHT: f64 = 0.4;

/// Score given to every recipe when the preference algorithm has nothing to
/// match against and falls back to a random pick.
pub const RANDOM_FALLBACK_SCORE: f64 = 0.5;

/// Scores are rounded to this many decimal places.
const SCORE_PRECISION: f64 = 10_000.0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which formula produced a score. Selects the reason wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    TimeDecay,
    Preference,
    Hybrid,
    /// The preference algorithm found no preferred recipes.
    RandomFallback,
}

/// Everything the engine needs for one ranking.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub recipes: &'a [Recipe],
    pub last_cooked: &'a HashMap<DbId, Timestamp>,
    pub preferences: &'a PreferenceSet,
    pub now: Timestamp,
}

/// A recipe with its score and reason.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub score: f64,
    pub last_cooked_at: Option<Timestamp>,
    pub days_since_cooked: Option<i64>,
    pub reason: String,
}

/// Output of [`rank`].
#[derive(Debug, Clone)]
pub struct Ranking {
    pub recipes: Vec<ScoredRecipe>,
    /// How many recipes were scored before truncation.
    pub total_scored: usize,
    pub mode: ScoringMode,
}

/// A scored recipe before its reason is rendered.
struct Candidate<'a> {
    recipe: &'a Recipe,
    score: f64,
    last_cooked_at: Option<Timestamp>,
    days_since: Option<i64>,
}

// ---------------------------------------------------------------------------
// Per-recipe signals
// ---------------------------------------------------------------------------

/// Whole days between `cooked_at` and `now`, truncated.
///
/// Timestamps in the future count as zero days.
pub fn days_since(now: Timestamp, cooked_at: Timestamp) -> i64 {
    (now - cooked_at).num_days().max(0)
}

/// Time-decay score for a recipe, given whole days since it was last cooked.
pub fn time_score(days_since: Option<i64>) -> f64 {
    match days_since {
        None => TIME_SCORE_NEVER_COOKED,
        Some(d) if d < RECENT_DAYS => TIME_SCORE_RECENT,
        Some(d) if d < REVISIT_DAYS => TIME_SCORE_REVISIT,
        Some(d) if d < LONG_AGO_DAYS => TIME_SCORE_MISSING,
        Some(_) => TIME_SCORE_LONG_AGO,
    }
}

/// Preference score for a recipe category.
pub fn preference_score(preferences: &PreferenceSet, category_id: Option<DbId>) -> f64 {
    match preferences {
        PreferenceSet::Absent => PREF_SCORE_NEUTRAL,
        _ if preferences.contains(category_id) => PREF_SCORE_MATCH,
        _ => PREF_SCORE_MISS,
    }
}

/// Weighted combination of the time and preference scores.
pub fn hybrid_score(time: f64, preference: f64) -> f64 {
    HYBRID_TIME_WEIGHT * time + HYBRID_PREF_WEIGHT * preference
}

fn round_score(score: f64) -> f64 {
    (score * SCORE_PRECISION).round() / SCORE_PRECISION
}

// ---------------------------------------------------------------------------
// Reasons
// ---------------------------------------------------------------------------

/// Human-readable explanation for a pick.
pub fn reason(mode: ScoringMode, days_since: Option<i64>, category_name: &str) -> String {
    match mode {
        ScoringMode::TimeDecay => match days_since {
            None => "New recipe to try".to_string(),
            Some(d) if d < RECENT_DAYS => "Recently enjoyed".to_string(),
            Some(d) if d < REVISIT_DAYS => "Time to revisit".to_string(),
            Some(d) if d < LONG_AGO_DAYS => "You might be missing this".to_string(),
            Some(_) => "Long time favorite".to_string(),
        },
        ScoringMode::Preference => format!("Based on your preferences for {category_name}"),
        ScoringMode::Hybrid => match days_since {
            Some(d) if d > REVISIT_DAYS => {
                format!("Perfect time to revisit this {category_name} favorite")
            }
            _ => format!("Great match for your {category_name} preference"),
        },
        ScoringMode::RandomFallback => format!("Discover something new in {category_name}"),
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Score, order, and truncate the catalogue for one user.
///
/// Under [`Algorithm::Preference`] only recipes in a preferred category are
/// candidates; if there are none (empty preference set, or no recipe in any
/// preferred category) every recipe is scored with
/// [`RANDOM_FALLBACK_SCORE`] instead.
pub fn rank<R: Rng + ?Sized>(
    algorithm: Algorithm,
    input: &ScoringInput<'_>,
    limit: usize,
    rng: &mut R,
) -> Ranking {
    let (mode, mut candidates) = match algorithm {
        Algorithm::TimeDecay => (
            ScoringMode::TimeDecay,
            score_all(input, |c| time_score(c.days_since)),
        ),
        Algorithm::Hybrid => (
            ScoringMode::Hybrid,
            score_all(input, |c| {
                hybrid_score(
                    time_score(c.days_since),
                    preference_score(input.preferences, c.recipe.category_id),
                )
            }),
        ),
        Algorithm::Preference => {
            let matched: Vec<Candidate<'_>> = score_all(input, |_| PREF_SCORE_MATCH)
                .into_iter()
                .filter(|c| input.preferences.contains(c.recipe.category_id))
                .collect();
            if matched.is_empty() {
                (
                    ScoringMode::RandomFallback,
                    score_all(input, |_| RANDOM_FALLBACK_SCORE),
                )
            } else {
                (ScoringMode::Preference, matched)
            }
        }
    };

    let total_scored = candidates.len();

    // Shuffle, then stable-sort: equal scores keep their shuffled order.
    candidates.shuffle(rng);
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(limit);

    let recipes = candidates
        .into_iter()
        .map(|c| {
            let category = c.recipe.category_or_sentinel();
            ScoredRecipe {
                reason: reason(mode, c.days_since, &category.name),
                recipe: Recipe {
                    category: Some(category),
                    ..c.recipe.clone()
                },
                score: c.score,
                last_cooked_at: c.last_cooked_at,
                days_since_cooked: c.days_since,
            }
        })
        .collect();

    Ranking {
        recipes,
        total_scored,
        mode,
    }
}

/// Build a candidate per recipe and score it with `score_fn`.
fn score_all<'a, F>(input: &ScoringInput<'a>, score_fn: F) -> Vec<Candidate<'a>>
where
    F: Fn(&Candidate<'a>) -> f64,
{
    input
        .recipes
        .iter()
        .map(|recipe| {
            let last_cooked_at = input.last_cooked.get(&recipe.id).copied();
            let mut candidate = Candidate {
                recipe,
                score: 0.0,
                last_cooked_at,
                days_since: last_cooked_at.map(|at| days_since(input.now, at)),
            };
            candidate.score = round_score(score_fn(&candidate));
            candidate
        })
        .collect()
}
