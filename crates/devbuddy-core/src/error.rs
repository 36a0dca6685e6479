//! Error types for devbuddy-core

use thiserror::Error;

/// Result type alias using devbuddy-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in devbuddy-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Notebook not found
    #[error("Notebook not found: {0}")]
    NotebookNotFound(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// Task not found
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Task category not found
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Bookmark or bookmark category not found
    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),

    /// Another notebook already uses this name (case-insensitive)
    #[error("A notebook named \"{0}\" already exists")]
    DuplicateNotebook(String),

    /// Another category already uses this name (case-insensitive)
    #[error("A category with the name \"{0}\" already exists")]
    DuplicateCategory(String),

    /// Another category already uses this id
    #[error("A category with the id \"{0}\" already exists")]
    DuplicateCategoryId(String),

    /// The default notebook cannot be deleted
    #[error("Cannot delete the default \"General\" notebook")]
    ProtectedNotebook,

    /// The default category cannot be deleted
    #[error("Cannot delete the default \"General\" category")]
    ProtectedCategory,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_category_message_quotes_name() {
        let error = Error::DuplicateCategory("work".to_string());
        assert_eq!(
            error.to_string(),
            "A category with the name \"work\" already exists"
        );
    }
}
