use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use devbuddy_core::Priority;

#[derive(Parser)]
#[command(name = "devbuddy")]
#[command(about = "Notes, tasks and bookmarks for developers, stored as local YAML files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base directory holding `.devbuddy/` (defaults to DEVBUDDY_HOME or the home directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub home: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage notebooks
    #[command(alias = "nb")]
    Notebook {
        #[command(subcommand)]
        command: NotebookCommands,
    },
    /// Manage notes inside a notebook
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Search notes across all notebooks
    Search {
        /// Search query
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage task categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Show task statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage bookmarks
    Bookmark {
        #[command(subcommand)]
        command: BookmarkCommands,
    },
    /// Export notes
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Only export this notebook
        #[arg(long, value_name = "ID")]
        notebook: Option<String>,
        /// Optional output file or directory (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Show resolved storage locations
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl From<ExportFormat> for devbuddy_core::export::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
    Urgent,
}

impl From<PriorityArg> for Priority {
    fn from(priority: PriorityArg) -> Self {
        match priority {
            PriorityArg::Low => Self::Low,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::High => Self::High,
            PriorityArg::Urgent => Self::Urgent,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum TaskStatus {
    Completed,
    Pending,
    Overdue,
    DueToday,
}

/// Shared appearance flags for notebooks and categories.
#[derive(Args, Debug, Default, Clone)]
pub struct AppearanceArgs {
    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,
    /// Display color, e.g. #3B82F6
    #[arg(long)]
    pub color: Option<String>,
    /// Display icon (emoji)
    #[arg(long)]
    pub icon: Option<String>,
}

#[derive(Subcommand)]
pub enum NotebookCommands {
    /// List notebooks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a notebook
    Add {
        /// Notebook name
        name: String,
        /// Explicit notebook id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        appearance: AppearanceArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update notebook metadata
    Update {
        /// Notebook id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        appearance: AppearanceArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a notebook with all its notes and assets
    Delete {
        /// Notebook id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum NoteCommands {
    /// List notes of a notebook, most recent first
    List {
        /// Notebook id
        #[arg(short, long, default_value = "general")]
        notebook: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a note
    Show {
        /// Note id
        id: String,
        /// Notebook id
        #[arg(short, long, default_value = "general")]
        notebook: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a note (content from arguments, stdin or $EDITOR)
    #[command(alias = "new")]
    Add {
        /// Note content
        content: Vec<String>,
        /// Notebook id
        #[arg(short, long, default_value = "general")]
        notebook: String,
        /// Note title
        #[arg(short, long)]
        title: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit a note; opens $EDITOR when no field flags are given
    Edit {
        /// Note id
        id: String,
        /// Notebook id
        #[arg(short, long, default_value = "general")]
        notebook: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// Replacement content
        #[arg(long)]
        content: Option<String>,
        /// Replacement tags (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Option<Vec<String>>,
    },
    /// Delete a note and the assets only it references
    Delete {
        /// Note id
        id: String,
        /// Notebook id
        #[arg(short, long, default_value = "general")]
        notebook: String,
    },
    /// Copy a file into the notebook's assets
    Attach {
        /// File to copy
        file: PathBuf,
        /// Notebook id
        #[arg(short, long, default_value = "general")]
        notebook: String,
        /// Append a markdown image reference to this note
        #[arg(long, value_name = "NOTE_ID")]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks
    List {
        /// Only tasks in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only tasks with this priority
        #[arg(short, long, value_enum)]
        priority: Option<PriorityArg>,
        /// Only tasks in this state
        #[arg(short, long, value_enum)]
        status: Option<TaskStatus>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a task
    Show {
        /// Task id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a task
    #[command(alias = "new")]
    Add {
        /// Task title
        title: Vec<String>,
        /// Longer description
        #[arg(short, long)]
        description: Option<String>,
        /// Priority
        #[arg(short, long, value_enum)]
        priority: Option<PriorityArg>,
        /// Category id (general when omitted or unknown)
        #[arg(short, long)]
        category: Option<String>,
        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_name = "DATE")]
        due: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update a task
    Update {
        /// Task id
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New priority
        #[arg(short, long, value_enum)]
        priority: Option<PriorityArg>,
        /// Move to this category
        #[arg(short, long)]
        category: Option<String>,
        /// New due date
        #[arg(long, value_name = "DATE", conflicts_with = "clear_due")]
        due: Option<String>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
        /// Replacement tags (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Option<Vec<String>>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Flip a task between done and pending
    Toggle {
        /// Task id
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task id
        id: String,
    },
    /// List the available priorities
    Priorities,
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List task categories
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a category
    Add {
        /// Category name
        name: String,
        /// Explicit id (slugified from the name when omitted)
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        appearance: AppearanceArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update a category
    Update {
        /// Category id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        appearance: AppearanceArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a category and its tasks
    Delete {
        /// Category id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum BookmarkCommands {
    /// List every bookmark with its category
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a bookmark
    Show {
        /// Bookmark id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a bookmark to a category
    Add {
        /// Bookmark category id
        category: String,
        /// Display name
        name: String,
        /// Target URL
        url: String,
        /// Explicit bookmark id
        #[arg(long)]
        id: Option<String>,
        /// Icon name
        #[arg(long)]
        icon: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a bookmark
    Update {
        /// Bookmark category id
        category: String,
        /// Bookmark id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a bookmark
    Delete {
        /// Bookmark category id
        category: String,
        /// Bookmark id
        id: String,
    },
    /// Manage bookmark categories
    Category {
        #[command(subcommand)]
        command: BookmarkCategoryCommands,
    },
}

#[derive(Subcommand)]
pub enum BookmarkCategoryCommands {
    /// List bookmark categories
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a bookmark category
    Add {
        /// Display name
        name: String,
        /// Explicit id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Update a bookmark category
    Update {
        /// Category id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a bookmark category and its bookmarks
    Delete {
        /// Category id
        id: String,
    },
}
