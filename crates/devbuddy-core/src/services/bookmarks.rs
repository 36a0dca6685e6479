//! Categorized bookmarks kept in a single YAML document.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{
    Bookmark, BookmarkCategory, BookmarkCategoryUpdate, BookmarkUpdate, BookmarksDocument,
    CategorizedBookmark, NewBookmark, NewBookmarkCategory, StoredBookmarks,
};
use crate::storage::{read_yaml, write_yaml};

/// File-backed bookmark store.
#[derive(Debug, Clone)]
pub struct BookmarksService {
    path: PathBuf,
}

impl BookmarksService {
    /// Open the store backed by the document at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            path: std::path::absolute(path.as_ref())?,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document.
    ///
    /// A missing file is seeded with the starter categories. A legacy
    /// top-level list is wrapped in a `general` category and written back.
    pub fn get_bookmarks(&self) -> Result<BookmarksDocument> {
        if !self.path.exists() {
            let seeded = BookmarksDocument::seeded();
            self.save(&seeded)?;
            return Ok(seeded);
        }

        match read_yaml::<StoredBookmarks>(&self.path) {
            Ok(Some(StoredBookmarks::Document(mut document))) => {
                if document.assign_missing_ids() {
                    tracing::info!("Assigned missing bookmark ids in {}", self.path.display());
                    self.save(&document)?;
                }
                Ok(document)
            }
            Ok(Some(StoredBookmarks::Legacy(bookmarks))) => {
                tracing::info!("Migrating legacy bookmark list in {}", self.path.display());
                let mut migrated = BookmarksDocument {
                    categories: vec![BookmarkCategory::migrated(bookmarks)],
                };
                migrated.assign_missing_ids();
                self.save(&migrated)?;
                Ok(migrated)
            }
            Ok(None) => Ok(BookmarksDocument::seeded()),
            Err(error) => {
                tracing::warn!("Failed to load bookmarks from {}: {error}", self.path.display());
                Ok(BookmarksDocument::seeded())
            }
        }
    }

    /// Every bookmark, annotated with its category.
    pub fn get_all_bookmarks(&self) -> Result<Vec<CategorizedBookmark>> {
        Ok(self
            .get_bookmarks()?
            .categories
            .into_iter()
            .flat_map(|category| {
                let BookmarkCategory {
                    id,
                    name,
                    color,
                    bookmarks,
                    ..
                } = category;
                bookmarks.into_iter().map(move |bookmark| CategorizedBookmark {
                    bookmark,
                    category: name.clone(),
                    category_id: id.clone(),
                    category_color: color.clone(),
                })
            })
            .collect())
    }

    pub fn get_bookmark(&self, id: &str) -> Result<Option<CategorizedBookmark>> {
        Ok(self
            .get_all_bookmarks()?
            .into_iter()
            .find(|entry| entry.bookmark.id == id))
    }

    pub fn add_category(&self, input: NewBookmarkCategory) -> Result<BookmarkCategory> {
        let mut document = self.get_bookmarks()?;
        let category = BookmarkCategory::from_input(input);
        if document.categories.iter().any(|existing| existing.id == category.id) {
            return Err(Error::InvalidInput(format!(
                "Bookmark category '{}' already exists",
                category.id
            )));
        }
        document.categories.push(category.clone());
        self.save(&document)?;
        Ok(category)
    }

    pub fn update_category(
        &self,
        category_id: &str,
        update: BookmarkCategoryUpdate,
    ) -> Result<BookmarkCategory> {
        let mut document = self.get_bookmarks()?;
        let category = document
            .category_mut(category_id)
            .ok_or_else(|| Error::BookmarkNotFound(category_id.to_string()))?;
        update.apply_to(category);
        let updated = category.clone();
        self.save(&document)?;
        Ok(updated)
    }

    /// Delete a category and every bookmark in it.
    pub fn delete_category(&self, category_id: &str) -> Result<()> {
        let mut document = self.get_bookmarks()?;
        let before = document.categories.len();
        document
            .categories
            .retain(|category| category.id != category_id);
        if document.categories.len() == before {
            return Err(Error::BookmarkNotFound(category_id.to_string()));
        }
        self.save(&document)
    }

    pub fn add_bookmark(&self, category_id: &str, input: NewBookmark) -> Result<Bookmark> {
        let mut document = self.get_bookmarks()?;
        let bookmark = Bookmark::from_input(input);
        if document.contains_bookmark(&bookmark.id) {
            return Err(Error::InvalidInput(format!(
                "Bookmark '{}' already exists",
                bookmark.id
            )));
        }
        let category = document
            .category_mut(category_id)
            .ok_or_else(|| Error::BookmarkNotFound(category_id.to_string()))?;
        category.bookmarks.push(bookmark.clone());
        self.save(&document)?;
        Ok(bookmark)
    }

    pub fn update_bookmark(
        &self,
        category_id: &str,
        bookmark_id: &str,
        update: BookmarkUpdate,
    ) -> Result<Bookmark> {
        let mut document = self.get_bookmarks()?;
        let bookmark = document
            .category_mut(category_id)
            .and_then(|category| {
                category
                    .bookmarks
                    .iter_mut()
                    .find(|bookmark| bookmark.id == bookmark_id)
            })
            .ok_or_else(|| Error::BookmarkNotFound(bookmark_id.to_string()))?;
        update.apply_to(bookmark);
        let updated = bookmark.clone();
        self.save(&document)?;
        Ok(updated)
    }

    pub fn delete_bookmark(&self, category_id: &str, bookmark_id: &str) -> Result<()> {
        let mut document = self.get_bookmarks()?;
        let category = document
            .category_mut(category_id)
            .ok_or_else(|| Error::BookmarkNotFound(category_id.to_string()))?;
        let before = category.bookmarks.len();
        category
            .bookmarks
            .retain(|bookmark| bookmark.id != bookmark_id);
        if category.bookmarks.len() == before {
            return Err(Error::BookmarkNotFound(bookmark_id.to_string()));
        }
        self.save(&document)
    }

    fn save(&self, document: &BookmarksDocument) -> Result<()> {
        write_yaml(&self.path, document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn service() -> (TempDir, BookmarksService) {
        let dir = tempfile::tempdir().unwrap();
        let service = BookmarksService::open(dir.path().join("bookmarks.yaml")).unwrap();
        (dir, service)
    }

    #[test]
    fn missing_file_is_seeded() {
        let (_dir, service) = service();
        let document = service.get_bookmarks().unwrap();

        assert_eq!(document, BookmarksDocument::seeded());
        assert!(service.path().exists());
        assert_eq!(service.get_all_bookmarks().unwrap().len(), 6);
    }

    #[test]
    fn legacy_list_is_migrated_and_persisted() {
        let (_dir, service) = service();
        fs::write(
            service.path(),
            "- id: docs\n  name: Docs\n  url: https://docs.rs\n",
        )
        .unwrap();

        let document = service.get_bookmarks().unwrap();
        assert_eq!(document.categories.len(), 1);
        assert_eq!(document.categories[0].id, "general");
        assert_eq!(document.categories[0].bookmarks[0].id, "docs");

        let raw = fs::read_to_string(service.path()).unwrap();
        assert!(raw.starts_with("categories:"));
    }

    #[test]
    fn entries_stored_without_ids_keep_their_repaired_ids() {
        let (_dir, service) = service();
        fs::write(
            service.path(),
            "categories:\n  - name: Reading\n    bookmarks:\n      - name: Blog\n        url: https://blog.rust-lang.org\n",
        )
        .unwrap();

        let first = service.get_bookmarks().unwrap();
        let category_id = first.categories[0].id.clone();
        let bookmark_id = first.categories[0].bookmarks[0].id.clone();
        assert!(category_id.starts_with("category-"));
        assert!(bookmark_id.starts_with("bookmark-"));
        assert_eq!(service.get_bookmarks().unwrap(), first);

        service.delete_bookmark(&category_id, &bookmark_id).unwrap();
        assert!(service.get_bookmarks().unwrap().categories[0]
            .bookmarks
            .is_empty());
    }

    #[test]
    fn generated_bookmark_ids_are_unique() {
        let (_dir, service) = service();
        let first = service.add_bookmark("tools", NewBookmark::default()).unwrap();
        let second = service.add_bookmark("tools", NewBookmark::default()).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn add_bookmark_rejects_duplicate_id() {
        let (_dir, service) = service();
        let result = service.add_bookmark(
            "development",
            NewBookmark {
                id: Some("github".to_string()),
                ..NewBookmark::default()
            },
        );
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(service.get_all_bookmarks().unwrap().len(), 6);
    }

    #[test]
    fn get_bookmark_annotates_category() {
        let (_dir, service) = service();
        let entry = service.get_bookmark("github").unwrap().unwrap();

        assert_eq!(entry.bookmark.url, "https://github.com");
        assert_eq!(entry.category, "Tools");
        assert_eq!(entry.category_id, "tools");
        assert_eq!(entry.category_color, "#f59e0b");
        assert_eq!(service.get_bookmark("missing").unwrap(), None);
    }

    #[test]
    fn add_update_and_delete_bookmark() {
        let (_dir, service) = service();
        let added = service
            .add_bookmark(
                "tools",
                NewBookmark {
                    name: Some("crates.io".to_string()),
                    url: Some("https://crates.io".to_string()),
                    ..NewBookmark::default()
                },
            )
            .unwrap();
        assert!(added.id.starts_with("bookmark-"));

        let updated = service
            .update_bookmark(
                "tools",
                &added.id,
                BookmarkUpdate {
                    description: Some("Rust packages".to_string()),
                    ..BookmarkUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "crates.io");
        assert_eq!(updated.description, "Rust packages");

        service.delete_bookmark("tools", &added.id).unwrap();
        assert_eq!(service.get_bookmark(&added.id).unwrap(), None);
    }

    #[test]
    fn category_lifecycle() {
        let (_dir, service) = service();
        let category = service
            .add_category(NewBookmarkCategory {
                id: Some("reading".to_string()),
                name: Some("Reading".to_string()),
                ..NewBookmarkCategory::default()
            })
            .unwrap();

        let renamed = service
            .update_category(
                &category.id,
                BookmarkCategoryUpdate {
                    name: Some("Reading list".to_string()),
                    ..BookmarkCategoryUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(renamed.name, "Reading list");

        service.delete_category(&category.id).unwrap();
        assert_eq!(service.get_bookmarks().unwrap().categories.len(), 3);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let (_dir, service) = service();
        assert!(matches!(
            service.add_bookmark("ghost", NewBookmark::default()),
            Err(Error::BookmarkNotFound(_))
        ));
        assert!(matches!(
            service.update_bookmark("tools", "ghost", BookmarkUpdate::default()),
            Err(Error::BookmarkNotFound(_))
        ));
        assert!(matches!(
            service.delete_bookmark("tools", "ghost"),
            Err(Error::BookmarkNotFound(_))
        ));
        assert!(matches!(
            service.delete_category("ghost"),
            Err(Error::BookmarkNotFound(_))
        ));
        assert!(matches!(
            service.update_category("ghost", BookmarkCategoryUpdate::default()),
            Err(Error::BookmarkNotFound(_))
        ));
    }
}
