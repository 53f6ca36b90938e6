//! User category preferences.
//!
//! A user either has no preferences row at all, a row with an empty category
//! list, or a row with one or more categories. The three cases score
//! differently, so they are kept apart in [`PreferenceSet`] instead of being
//! collapsed into an empty list.

use std::collections::HashSet;

use crate::types::DbId;

/// Normalise a client-supplied category list.
///
/// Drops non-positive ids and duplicates, keeping the first occurrence of
/// each id in its original position.
pub fn normalize_categories(input: &[DbId]) -> Vec<DbId> {
    let mut seen = HashSet::with_capacity(input.len());
    input
        .iter()
        .copied()
        .filter(|id| *id > 0 && seen.insert(*id))
        .collect()
}

/// The preference signal for a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceSet {
    /// No preferences row exists for the user.
    Absent,
    /// A row exists but lists no categories.
    Empty,
    /// A row exists with at least one category.
    Categories(HashSet<DbId>),
}

impl PreferenceSet {
    /// Build from an optional stored category list.
    ///
    /// `None` means no row was found.
    pub fn from_stored(categories: Option<&[DbId]>) -> Self {
        match categories {
            None => Self::Absent,
            Some(ids) => {
                let set: HashSet<DbId> = ids.iter().copied().filter(|id| *id > 0).collect();
                if set.is_empty() {
                    Self::Empty
                } else {
                    Self::Categories(set)
                }
            }
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Whether the recipe category is one the user prefers.
    ///
    /// Uncategorised recipes never match.
    pub fn contains(&self, category_id: Option<DbId>) -> bool {
        match (self, category_id) {
            (Self::Categories(set), Some(id)) => set.contains(&id),
            _ => false,
        }
    }
}
