//! Notebook model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{lenient_text, lenient_timestamp};
use crate::util::{generate_id, normalize_text_option};

/// Id of the permanent notebook seeded on first run.
pub const DEFAULT_NOTEBOOK_ID: &str = "general";

const DEFAULT_NAME: &str = "Untitled";
const DEFAULT_COLOR: &str = "#6B7280";
const DEFAULT_ICON: &str = "📒";

/// A named collection of notes, backed by one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "NotebookRecord")]
pub struct Notebook {
    /// Unique identifier, also the directory name
    pub id: String,
    /// Display name, unique case-insensitively
    pub name: String,
    pub description: String,
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notebook {
    /// The permanent `general` notebook.
    #[must_use]
    pub fn default_notebook() -> Self {
        let now = Utc::now();
        Self {
            id: DEFAULT_NOTEBOOK_ID.to_string(),
            name: "General".to_string(),
            description: "Default notebook".to_string(),
            color: "#3B82F6".to_string(),
            icon: DEFAULT_ICON.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a notebook from creation input, generating an id when absent.
    #[must_use]
    pub fn from_input(input: NewNotebook) -> Self {
        let now = Utc::now();
        Self {
            id: normalize_text_option(input.id).unwrap_or_else(generate_id),
            name: normalize_text_option(input.name).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            description: input.description.unwrap_or_default(),
            color: normalize_text_option(input.color).unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            icon: normalize_text_option(input.icon).unwrap_or_else(|| DEFAULT_ICON.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive name comparison used for uniqueness checks.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

/// Input for creating a notebook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotebook {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl NewNotebook {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Partial update of a notebook; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl NotebookUpdate {
    /// Apply the update and refresh `updated_at`.
    pub fn apply_to(self, notebook: &mut Notebook) {
        if let Some(name) = normalize_text_option(self.name) {
            notebook.name = name;
        }
        if let Some(description) = self.description {
            notebook.description = description;
        }
        if let Some(color) = normalize_text_option(self.color) {
            notebook.color = color;
        }
        if let Some(icon) = normalize_text_option(self.icon) {
            notebook.icon = icon;
        }
        notebook.updated_at = Utc::now();
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotebookRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    color: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    icon: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    updated_at: Option<DateTime<Utc>>,
}

impl From<NotebookRecord> for Notebook {
    fn from(record: NotebookRecord) -> Self {
        let now = Utc::now();
        Self {
            id: normalize_text_option(record.id).unwrap_or_else(generate_id),
            name: normalize_text_option(record.name).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            description: record.description.unwrap_or_default(),
            color: normalize_text_option(record.color)
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            icon: normalize_text_option(record.icon).unwrap_or_else(|| DEFAULT_ICON.to_string()),
            created_at: record.created_at.unwrap_or(now),
            updated_at: record.updated_at.unwrap_or(now),
        }
    }
}
