//! File-backed services over the DevBuddy data directories.
//!
//! Every service is a plain struct holding its root path. Each call reads
//! the files it needs, applies the change and writes the whole file back.

mod bookmarks;
mod notes;
mod tasks;

pub use bookmarks::BookmarksService;
pub use notes::NotesService;
pub use tasks::TasksService;

use crate::config::StorageConfig;
use crate::error::Result;

/// All services opened against one storage configuration.
#[derive(Debug, Clone)]
pub struct Services {
    pub notes: NotesService,
    pub tasks: TasksService,
    pub bookmarks: BookmarksService,
}

impl Services {
    pub fn open(config: &StorageConfig) -> Result<Self> {
        Ok(Self {
            notes: NotesService::open(&config.notes_dir)?,
            tasks: TasksService::open(&config.tasks_dir)?,
            bookmarks: BookmarksService::open(&config.bookmarks_path)?,
        })
    }
}
