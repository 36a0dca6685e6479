use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] devbuddy_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No note content provided")]
    EmptyContent,
    #[error("Edited note content cannot be empty")]
    EmptyEditedContent,
    #[error("Task title cannot be empty")]
    EmptyTitle,
    #[error("{0} cannot be empty")]
    EmptyIdentifier(&'static str),
    #[error("Search query cannot be empty")]
    EmptySearchQuery,
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
}
