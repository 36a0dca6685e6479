use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use devbuddy_core::models::{Bookmark, CategorizedBookmark};
use devbuddy_core::{Category, Note, Notebook, Services, StorageConfig, Task};
use serde::Serialize;

use crate::error::CliError;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

/// Storage roots for this invocation; `--home` wins over the environment.
pub fn resolve_storage_config(home: Option<&Path>) -> Result<StorageConfig, CliError> {
    match home {
        Some(home) => Ok(StorageConfig::under(home)),
        None => Ok(StorageConfig::from_env()?),
    }
}

pub fn open_services(config: &StorageConfig) -> Result<Services, CliError> {
    Ok(Services::open(config)?)
}

pub fn short_id(id: &str) -> String {
    id.chars().take(13).collect()
}

pub fn format_notebook_lines(notebooks: &[Notebook]) -> Vec<String> {
    notebooks
        .iter()
        .map(|notebook| {
            let line = format!("{} {:<20}  {}", notebook.icon, notebook.name, notebook.id);
            if notebook.description.is_empty() {
                line
            } else {
                format!("{line}  - {}", notebook.description)
            }
        })
        .collect()
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    notes
        .iter()
        .map(|note| {
            let short_id = short_id(&note.id);
            let title = truncate(&note.title, 40);
            let relative_time = format_relative_time(note.updated_at.timestamp_millis(), now_ms);
            let tags = render_tags(&note.tags);

            if tags.is_empty() {
                format!("{short_id:<13}  {title:<40}  {relative_time}")
            } else {
                format!("{short_id:<13}  {title:<40}  {relative_time:<10}  {tags}")
            }
        })
        .collect()
}

pub fn format_task_lines(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .map(|task| {
            let mark = if task.completed { "x" } else { " " };
            let mut line = format!(
                "[{mark}] {:<13}  {:<6}  {:<40}  {}",
                short_id(&task.id),
                task.priority,
                truncate(&task.title, 40),
                task.category
            );
            if let Some(due) = task.due_date.as_deref() {
                line.push_str(&format!("  due {due}"));
            }
            let tags = render_tags(&task.tags);
            if !tags.is_empty() {
                line.push_str("  ");
                line.push_str(&tags);
            }
            line
        })
        .collect()
}

pub fn format_category_lines(categories: &[Category]) -> Vec<String> {
    categories
        .iter()
        .map(|category| format!("{} {:<20}  {}", category.icon, category.name, category.id))
        .collect()
}

pub fn format_bookmark_lines(bookmarks: &[CategorizedBookmark]) -> Vec<String> {
    bookmarks
        .iter()
        .map(|entry| {
            format!(
                "{:<14}  {:<20}  {}",
                entry.category_id,
                truncate(&entry.bookmark.name, 20),
                entry.bookmark.url
            )
        })
        .collect()
}

pub fn format_bookmark(bookmark: &Bookmark) -> String {
    if bookmark.description.is_empty() {
        format!("{}  {}  {}", bookmark.id, bookmark.name, bookmark.url)
    } else {
        format!(
            "{}  {}  {}  - {}",
            bookmark.id, bookmark.name, bookmark.url, bookmark.description
        )
    }
}

pub fn render_tags(tags: &[String]) -> String {
    let mut tags = tags.to_vec();
    tags.sort();
    tags.into_iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

/// Note content from arguments, then piped stdin, then `$EDITOR`.
pub fn resolve_note_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    if let Some(content) = capture_editor_input()? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_search_query(query: &str) -> Result<String, CliError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptySearchQuery)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn normalize_identifier(id: &str, kind: &'static str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyIdentifier(kind))
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn capture_editor_input() -> Result<Option<String>, CliError> {
    capture_editor_input_with_initial("")
}

pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let note_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&note_content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let mut command = Command::new(program);
            command.args(parts).arg(file_path);

            let status = command.status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("devbuddy-note-{}-{now}.md", std::process::id()))
}
