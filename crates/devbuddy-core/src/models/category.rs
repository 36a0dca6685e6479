//! Task category model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{lenient_text, lenient_timestamp};
use crate::util::{generate_id, normalize_text_option, slugify};

/// Id of the permanent category seeded on first run.
pub const DEFAULT_CATEGORY_ID: &str = "general";

const DEFAULT_COLOR: &str = "#6B7280";
const DEFAULT_ICON: &str = "📁";

/// A named grouping of tasks, backed by one YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CategoryRecord")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// The permanent `general` category.
    #[must_use]
    pub fn default_category() -> Self {
        let now = Utc::now();
        Self {
            id: DEFAULT_CATEGORY_ID.to_string(),
            name: "General".to_string(),
            description: "General and miscellaneous tasks".to_string(),
            color: "#3B82F6".to_string(),
            icon: "📋".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a category from validated input.
    ///
    /// The id is slugified from the name when not supplied; a name with no
    /// slug-able characters gets a generated id instead.
    #[must_use]
    pub fn from_input(name: String, input: NewCategory) -> Self {
        let now = Utc::now();
        let id = normalize_text_option(input.id)
            .or_else(|| Some(slugify(&name)).filter(|slug| !slug.is_empty()))
            .unwrap_or_else(generate_id);
        Self {
            id,
            name,
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

/// Input for creating a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl NewCategory {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial update of a category; the id is immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl CategoryUpdate {
    pub fn apply_to(self, category: &mut Category) {
        if let Some(name) = normalize_text_option(self.name) {
            category.name = name;
        }
        if let Some(description) = self.description {
            category.description = description;
        }
        if let Some(color) = normalize_text_option(self.color) {
            category.color = color;
        }
        if let Some(icon) = normalize_text_option(self.icon) {
            category.icon = icon;
        }
        category.updated_at = Utc::now();
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryRecord {
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

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        let now = Utc::now();
        let name = normalize_text_option(record.name);
        let id = normalize_text_option(record.id)
            .or_else(|| name.as_deref().map(slugify).filter(|slug| !slug.is_empty()))
            .unwrap_or_else(generate_id);
        Self {
            name: name.unwrap_or_else(|| id.clone()),
            id,
            description: record.description.unwrap_or_default(),
            color: normalize_text_option(record.color)
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            icon: normalize_text_option(record.icon).unwrap_or_else(|| DEFAULT_ICON.to_string()),
            created_at: record.created_at.unwrap_or(now),
            updated_at: record.updated_at.unwrap_or(now),
        }
    }
}
