//! Bookmark models
//!
//! Bookmarks live in one YAML document of categories, each holding an
//! ordered list of links.

use serde::{Deserialize, Serialize};

use crate::storage::lenient_text;
use crate::util::{generate_id, normalize_text_option};

/// A saved link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BookmarkRecord")]
pub struct Bookmark {
    pub id: String,
    pub name: String,
    pub url: String,
    pub icon: String,
    pub description: String,
}

impl Bookmark {
    fn new(id: &str, name: &str, url: &str, icon: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            icon: icon.to_string(),
            description: description.to_string(),
        }
    }

    #[must_use]
    pub fn from_input(input: NewBookmark) -> Self {
        Self {
            id: normalize_text_option(input.id).unwrap_or_else(|| prefixed_id("bookmark")),
            name: input.name.unwrap_or_default(),
            url: input.url.unwrap_or_default(),
            icon: input.icon.unwrap_or_default(),
            description: input.description.unwrap_or_default(),
        }
    }
}

/// A titled group of bookmarks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BookmarkCategoryRecord")]
pub struct BookmarkCategory {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub bookmarks: Vec<Bookmark>,
}

impl BookmarkCategory {
    #[must_use]
    pub fn from_input(input: NewBookmarkCategory) -> Self {
        Self {
            id: normalize_text_option(input.id).unwrap_or_else(|| prefixed_id("category")),
            name: input.name.unwrap_or_default(),
            icon: input.icon.unwrap_or_default(),
            color: input.color.unwrap_or_default(),
            bookmarks: Vec::new(),
        }
    }

    /// Category wrapping bookmarks migrated from the legacy flat list.
    #[must_use]
    pub fn migrated(bookmarks: Vec<Bookmark>) -> Self {
        Self {
            id: "general".to_string(),
            name: "General".to_string(),
            icon: "bookmark".to_string(),
            color: "#6b7280".to_string(),
            bookmarks,
        }
    }
}

/// The whole bookmarks file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarksDocument {
    #[serde(default)]
    pub categories: Vec<BookmarkCategory>,
}

impl BookmarksDocument {
    /// Starter document written on first run.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            categories: vec![
                BookmarkCategory {
                    id: "development".to_string(),
                    name: "Development".to_string(),
                    icon: "code".to_string(),
                    color: "#3b82f6".to_string(),
                    bookmarks: vec![
                        Bookmark::new(
                            "dev-local",
                            "Local Dev",
                            "http://localhost:3000",
                            "rocket",
                            "Local development environment",
                        ),
                        Bookmark::new(
                            "dev-docs",
                            "Documentation",
                            "http://localhost:3000/docs",
                            "book",
                            "Local documentation",
                        ),
                    ],
                },
                BookmarkCategory {
                    id: "environments".to_string(),
                    name: "Environments".to_string(),
                    icon: "server".to_string(),
                    color: "#10b981".to_string(),
                    bookmarks: vec![
                        Bookmark::new(
                            "staging",
                            "Staging",
                            "https://staging.yourapp.com",
                            "server",
                            "Staging environment",
                        ),
                        Bookmark::new(
                            "production",
                            "Production",
                            "https://yourapp.com",
                            "globe",
                            "Production environment",
                        ),
                    ],
                },
                BookmarkCategory {
                    id: "tools".to_string(),
                    name: "Tools".to_string(),
                    icon: "wrench".to_string(),
                    color: "#f59e0b".to_string(),
                    bookmarks: vec![
                        Bookmark::new(
                            "jira",
                            "Jira",
                            "https://jira.atlassian.net",
                            "git-branch",
                            "Project management",
                        ),
                        Bookmark::new(
                            "github",
                            "GitHub",
                            "https://github.com",
                            "git-pull-request",
                            "Code repository",
                        ),
                    ],
                },
            ],
        }
    }

    pub fn category_mut(&mut self, id: &str) -> Option<&mut BookmarkCategory> {
        self.categories.iter_mut().find(|category| category.id == id)
    }

    /// Whether any category holds a bookmark with this id.
    pub fn contains_bookmark(&self, id: &str) -> bool {
        self.categories
            .iter()
            .flat_map(|category| &category.bookmarks)
            .any(|bookmark| bookmark.id == id)
    }

    /// Give every category and bookmark stored without an id a fresh one.
    ///
    /// Returns whether anything changed, so the caller can persist it.
    pub fn assign_missing_ids(&mut self) -> bool {
        let mut changed = false;
        for category in &mut self.categories {
            if category.id.is_empty() {
                category.id = prefixed_id("category");
                changed = true;
            }
            for bookmark in category.bookmarks.iter_mut().filter(|b| b.id.is_empty()) {
                bookmark.id = prefixed_id("bookmark");
                changed = true;
            }
        }
        changed
    }
}

/// On-disk shapes accepted when reading the bookmarks file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredBookmarks {
    Document(BookmarksDocument),
    Legacy(Vec<Bookmark>),
}

/// A bookmark annotated with the category it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedBookmark {
    #[serde(flatten)]
    pub bookmark: Bookmark,
    /// Category display name
    pub category: String,
    pub category_id: String,
    pub category_color: String,
}

/// Input for a new bookmark category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookmarkCategory {
    pub id: Option<String>,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// Partial update of a bookmark category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkCategoryUpdate {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl BookmarkCategoryUpdate {
    pub fn apply_to(self, category: &mut BookmarkCategory) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(icon) = self.icon {
            category.icon = icon;
        }
        if let Some(color) = self.color {
            category.color = color;
        }
    }
}

/// Input for a new bookmark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookmark {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

/// Partial update of a bookmark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkUpdate {
    pub name: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

impl BookmarkUpdate {
    pub fn apply_to(self, bookmark: &mut Bookmark) {
        if let Some(name) = self.name {
            bookmark.name = name;
        }
        if let Some(url) = self.url {
            bookmark.url = url;
        }
        if let Some(icon) = self.icon {
            bookmark.icon = icon;
        }
        if let Some(description) = self.description {
            bookmark.description = description;
        }
    }
}

fn prefixed_id(prefix: &str) -> String {
    format!("{prefix}-{}", generate_id())
}

#[derive(Deserialize)]
struct BookmarkRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    icon: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    description: Option<String>,
}

impl From<BookmarkRecord> for Bookmark {
    fn from(record: BookmarkRecord) -> Self {
        Self {
            id: normalize_text_option(record.id).unwrap_or_default(),
            name: record.name.unwrap_or_default(),
            url: record.url.unwrap_or_default(),
            icon: record.icon.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
struct BookmarkCategoryRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    icon: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    color: Option<String>,
    #[serde(default)]
    bookmarks: Option<Vec<Bookmark>>,
}

impl From<BookmarkCategoryRecord> for BookmarkCategory {
    fn from(record: BookmarkCategoryRecord) -> Self {
        Self {
            id: normalize_text_option(record.id).unwrap_or_default(),
            name: record.name.unwrap_or_default(),
            icon: record.icon.unwrap_or_default(),
            color: record.color.unwrap_or_default(),
            bookmarks: record.bookmarks.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seeded_document_has_three_categories() {
        let document = BookmarksDocument::seeded();
        let ids = document
            .categories
            .iter()
            .map(|category| category.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["development", "environments", "tools"]);
        assert!(document.categories.iter().all(|c| c.bookmarks.len() == 2));
    }

    #[test]
    fn stored_bookmarks_accepts_both_shapes() {
        let current: StoredBookmarks =
            serde_yaml::from_str("categories:\n  - id: work\n    name: Work\n").unwrap();
        assert!(matches!(current, StoredBookmarks::Document(ref doc) if doc.categories.len() == 1));

        let legacy: StoredBookmarks =
            serde_yaml::from_str("- name: Docs\n  url: https://docs.rs\n").unwrap();
        let StoredBookmarks::Legacy(bookmarks) = legacy else {
            panic!("expected legacy list");
        };
        assert_eq!(bookmarks[0].url, "https://docs.rs");
        assert!(bookmarks[0].id.is_empty());
    }

    #[test]
    fn from_input_generates_prefixed_ids() {
        let category = BookmarkCategory::from_input(NewBookmarkCategory::default());
        assert!(category.id.starts_with("category-"));

        let bookmark = Bookmark::from_input(NewBookmark {
            id: Some("rust".to_string()),
            ..NewBookmark::default()
        });
        assert_eq!(bookmark.id, "rust");
    }

    #[test]
    fn categorized_bookmark_flattens_fields() {
        let hit = CategorizedBookmark {
            bookmark: Bookmark::new("gh", "GitHub", "https://github.com", "", ""),
            category: "Tools".to_string(),
            category_id: "tools".to_string(),
            category_color: "#f59e0b".to_string(),
        };
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["url"], "https://github.com");
        assert_eq!(json["categoryId"], "tools");
    }
}
