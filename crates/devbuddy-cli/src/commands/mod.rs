pub mod bookmark;
pub mod category;
pub mod common;
pub mod completions;
pub mod config;
pub mod export;
pub mod note;
pub mod notebook;
pub mod search;
pub mod stats;
pub mod task;
