//! Cooking-event validation.

use crate::error::CoreError;
use crate::types::DbId;

/// Lowest accepted rating.
pub const MIN_RATING: i32 = 1;

/// Highest accepted rating.
pub const MAX_RATING: i32 = 5;

/// Validate an optional rating. `None` is always accepted.
pub fn validate_rating(rating: Option<i32>) -> Result<(), CoreError> {
    match rating {
        Some(r) if !(MIN_RATING..=MAX_RATING).contains(&r) => Err(CoreError::InvalidRating(r)),
        _ => Ok(()),
    }
}

/// Validate that a referenced recipe id is positive.
///
/// Non-positive ids cannot exist in the catalogue, so they are reported the
/// same way as a missing recipe.
pub fn validate_recipe_id(recipe_id: DbId) -> Result<(), CoreError> {
    if recipe_id > 0 {
        Ok(())
    } else {
        Err(CoreError::RecipeNotFound(recipe_id))
    }
}

/// Validate that a user id extracted from a token is positive.
pub fn validate_user_id(user_id: DbId) -> Result<(), CoreError> {
    if user_id > 0 {
        Ok(())
    } else {
        Err(CoreError::UserInvalid(user_id))
    }
}
