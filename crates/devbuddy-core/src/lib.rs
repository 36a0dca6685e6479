//! devbuddy-core - Core library for DevBuddy
//!
//! This crate contains the models, YAML storage layer and services for
//! notes, tasks and bookmarks used by the `devbuddy` command-line client.

pub mod assets;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod util;

pub use config::StorageConfig;
pub use error::{Error, Result};
pub use models::{Category, Note, Notebook, Priority, Task};
pub use services::{BookmarksService, NotesService, Services, TasksService};
