//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row and, where clients write to the table, a `Deserialize` DTO.

pub mod cooking;
pub mod preferences;
pub mod recipe;
pub mod recommendation_log;
