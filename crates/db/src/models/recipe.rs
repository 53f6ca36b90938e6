//! Catalogue read model.

use mealplan_core::recipe::{Category, Recipe};
use mealplan_core::types::DbId;
use sqlx::FromRow;

/// A `recipes` row left-joined with its `categories` row.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    pub category_description: Option<String>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(Category {
                id,
                name,
                description: row.category_description,
            }),
            _ => None,
        };
        Recipe {
            id: row.id,
            name: row.name,
            description: row.description,
            category_id: row.category_id,
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category_id: Option<DbId>, category_name: Option<&str>) -> RecipeRow {
        RecipeRow {
            id: 7,
            name: "Pad Thai".to_string(),
            description: Some("Noodles".to_string()),
            category_id,
            category_name: category_name.map(str::to_string),
            category_description: None,
        }
    }

    #[test]
    fn joined_row_embeds_category() {
        let recipe = Recipe::from(row(Some(2), Some("Thai")));
        let category = recipe.category.expect("category should be embedded");
        assert_eq!(category.id, 2);
        assert_eq!(category.name, "Thai");
        assert_eq!(recipe.category_id, Some(2));
    }

    #[test]
    fn row_without_category_has_none() {
        let recipe = Recipe::from(row(None, None));
        assert!(recipe.category.is_none());
        assert_eq!(recipe.category_name(), "Uncategorized");
    }
}
