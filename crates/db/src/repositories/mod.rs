//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod cooking_event_repo;
pub mod preferences_repo;
pub mod recipe_repo;
pub mod recommendation_log_repo;

pub use cooking_event_repo::CookingEventRepo;
pub use preferences_repo::PreferencesRepo;
pub use recipe_repo::RecipeRepo;
pub use recommendation_log_repo::RecommendationLogRepo;
