//! Data models for DevBuddy

mod bookmark;
mod category;
mod note;
mod notebook;
mod task;

pub use bookmark::{
    Bookmark, BookmarkCategory, BookmarkCategoryUpdate, BookmarkUpdate, BookmarksDocument,
    CategorizedBookmark, NewBookmark, NewBookmarkCategory,
};
pub(crate) use bookmark::StoredBookmarks;
pub use category::{Category, CategoryUpdate, NewCategory, DEFAULT_CATEGORY_ID};
pub use note::{NewNote, Note, NoteSearchHit, NoteUpdate};
pub use notebook::{NewNotebook, Notebook, NotebookUpdate, DEFAULT_NOTEBOOK_ID};
pub use task::{NewTask, Priority, Task, TaskStats, TaskUpdate};
