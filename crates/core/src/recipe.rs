//! Catalogue entities as seen by the recommender.
//!
//! The catalogue service owns these records; the recommender only reads
//! them, so there are no create or update DTOs here.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Id of the synthetic category used for recipes without one.
pub const UNCATEGORIZED_ID: DbId = 0;

/// Display name of the synthetic category used for recipes without one.
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

/// A recipe category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
}

impl Category {
    /// The sentinel `{id: 0, name: "Uncategorized"}` category.
    pub fn uncategorized() -> Self {
        Self {
            id: UNCATEGORIZED_ID,
            name: UNCATEGORIZED_NAME.to_string(),
            description: None,
        }
    }
}

/// A recipe joined with its optional category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "recipe_id")]
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub category: Option<Category>,
}

impl Recipe {
    /// Name of the recipe's category, or `"Uncategorized"` when it has none.
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED_NAME)
    }

    /// The recipe's category, substituting the sentinel when absent.
    pub fn category_or_sentinel(&self) -> Category {
        self.category.clone().unwrap_or_else(Category::uncategorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(category: Option<Category>) -> Recipe {
        Recipe {
            id: 1,
            name: "Shakshuka".to_string(),
            description: None,
            category_id: category.as_ref().map(|c| c.id),
            category,
        }
    }

    #[test]
    fn category_name_falls_back_to_uncategorized() {
        assert_eq!(recipe(None).category_name(), "Uncategorized");
    }

    #[test]
    fn category_name_uses_joined_category() {
        let cat = Category {
            id: 3,
            name: "Breakfast".to_string(),
            description: Some("Morning food".to_string()),
        };
        assert_eq!(recipe(Some(cat)).category_name(), "Breakfast");
    }

    #[test]
    fn sentinel_has_id_zero() {
        let sentinel = recipe(None).category_or_sentinel();
        assert_eq!(sentinel.id, 0);
        assert_eq!(sentinel.name, "Uncategorized");
        assert!(sentinel.description.is_none());
    }

    #[test]
    fn recipe_id_serialises_as_recipe_id() {
        let json = serde_json::to_value(recipe(None)).unwrap();
        assert_eq!(json["recipe_id"], 1);
        assert!(json.get("id").is_none());
    }
}
