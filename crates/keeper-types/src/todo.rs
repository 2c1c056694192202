//! Todo types

use serde::{Deserialize, Serialize};

/// A persisted todo item.
///
/// Field names are capitalized on the wire (`Id`, `Title`, `Description`,
/// `Completed`) and clients depend on that exact casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Todo {
    /// Store-assigned, never changes after creation
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl Todo {
    /// Attach an id to the caller-supplied fields.
    pub fn from_input(id: i64, input: TodoInput) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            completed: input.completed,
        }
    }
}

/// Request body for create and update.
///
/// Accepts both the capitalized and the lower-case field names. Any `Id`
/// in the body is ignored; missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoInput {
    #[serde(rename = "Title", alias = "title")]
    pub title: String,
    #[serde(rename = "Description", alias = "description")]
    pub description: String,
    #[serde(rename = "Completed", alias = "completed")]
    pub completed: bool,
}

impl TodoInput {
    pub fn new(title: impl Into<String>, description: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            completed,
        }
    }
}
