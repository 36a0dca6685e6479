//! Note export rendering shared by the CLI commands.

use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Note, Notebook};

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// A note paired with the notebook it was read from.
#[derive(Debug, Clone, Copy)]
pub struct NotebookNote<'a> {
    pub notebook: &'a Notebook,
    pub note: &'a Note,
}

/// Serializable note representation used in JSON and Markdown exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportNote {
    pub id: String,
    pub notebook_id: String,
    pub notebook_name: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    pub tags: Vec<String>,
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Convert a note into an export record with stable tag ordering.
#[must_use]
pub fn note_to_export_item(entry: NotebookNote<'_>) -> ExportNote {
    let mut tags = entry.note.tags.clone();
    tags.sort();

    ExportNote {
        id: entry.note.id.clone(),
        notebook_id: entry.notebook.id.clone(),
        notebook_name: entry.notebook.name.clone(),
        title: entry.note.title.clone(),
        content: entry.note.content.clone(),
        created_at: timestamp(entry.note.created_at),
        updated_at: timestamp(entry.note.updated_at),
        tags,
    }
}

/// Render notes as pretty-printed JSON.
pub fn render_json_export(notes: &[NotebookNote<'_>]) -> serde_json::Result<String> {
    let items = notes
        .iter()
        .map(|entry| note_to_export_item(*entry))
        .collect::<Vec<ExportNote>>();
    serde_json::to_string_pretty(&items)
}

/// Render notes in Markdown with frontmatter blocks.
#[must_use]
pub fn render_markdown_export(notes: &[NotebookNote<'_>]) -> String {
    let mut output = String::new();

    for (index, entry) in notes.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let export_note = note_to_export_item(*entry);
        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", export_note.id);
        let _ = writeln!(output, "notebook: {}", export_note.notebook_id);
        let _ = writeln!(output, "title: {:?}", export_note.title);
        let _ = writeln!(output, "created_at: {}", export_note.created_at);
        let _ = writeln!(output, "updated_at: {}", export_note.updated_at);
        if export_note.tags.is_empty() {
            let _ = writeln!(output, "tags: []");
        } else {
            let _ = writeln!(output, "tags:");
            for tag in export_note.tags {
                let _ = writeln!(output, "  - {tag}");
            }
        }
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        output.push_str(&export_note.content);
        output.push('\n');
    }

    output
}

/// Render notes based on selected export format.
pub fn render_notes_export(
    notes: &[NotebookNote<'_>],
    format: ExportFormat,
) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(notes),
        ExportFormat::Markdown => Ok(render_markdown_export(notes)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("devbuddy-notes-{timestamp_ms}.{}", format.extension())
}
