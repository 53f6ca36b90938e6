use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("User id must be positive, got {0}")]
    UserInvalid(DbId),

    #[error("Recipe with id {0} not found")]
    RecipeNotFound(DbId),

    #[error("Preferences have not been set for this user")]
    PreferencesNotSet,

    #[error("Unknown algorithm '{0}'. Must be one of: preference, time_decay, hybrid")]
    InvalidAlgorithm(String),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(i32),

    #[error("Limit must be an integer between 1 and 50, got '{0}'")]
    InvalidLimit(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
