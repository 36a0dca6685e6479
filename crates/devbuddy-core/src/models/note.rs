//! Note model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{lenient_string_list, lenient_text, lenient_timestamp};
use crate::util::{generate_id, normalize_text_option};

const DEFAULT_TITLE: &str = "Untitled";

/// A markdown note belonging to exactly one notebook.
///
/// Stored as `<notebook>/<id>.yml`. A record without an `id` deserializes
/// with an empty id; the notes service substitutes the file stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "NoteRecord")]
pub struct Note {
    /// Unique identifier (`<unix-ms>-<random>`)
    pub id: String,
    pub title: String,
    /// Markdown content, may reference notebook assets
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Build a new note with a generated id and fresh timestamps.
    #[must_use]
    pub fn from_input(input: NewNote) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            title: normalize_text_option(input.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            content: input.content.unwrap_or_default(),
            tags: input.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive substring match on title, content and tags.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Input for creating a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update of a note; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NoteUpdate {
    /// Apply the update and refresh `updated_at`.
    pub fn apply_to(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        if let Some(tags) = self.tags {
            note.tags = tags;
        }
        note.updated_at = Utc::now();
    }

    /// Whether the update carries no changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none()
    }
}

/// A search match annotated with its notebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSearchHit {
    #[serde(flatten)]
    pub note: Note,
    pub notebook_id: String,
    pub notebook_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    content: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    updated_at: Option<DateTime<Utc>>,
}

impl From<NoteRecord> for Note {
    fn from(record: NoteRecord) -> Self {
        let now = Utc::now();
        Self {
            id: normalize_text_option(record.id).unwrap_or_default(),
            title: record
                .title
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            content: record.content.unwrap_or_default(),
            tags: record.tags,
            created_at: record.created_at.unwrap_or(now),
            updated_at: record.updated_at.unwrap_or(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_input_generates_id_and_defaults() {
        let note = Note::from_input(NewNote::default());
        assert_eq!(note.title, "Untitled");
        assert_eq!(note.content, "");
        assert!(note.tags.is_empty());
        assert!(note.id.contains('-'));
    }

    #[test]
    fn matches_title_content_and_tags() {
        let note = Note::from_input(NewNote {
            title: Some("Sprint Plan".to_string()),
            content: Some("Ship the Parser".to_string()),
            tags: vec!["Backend".to_string()],
        });
        assert!(note.matches("sprint"));
        assert!(note.matches("parser"));
        assert!(note.matches("backend"));
        assert!(!note.matches("frontend"));
    }

    #[test]
    fn update_replaces_supplied_fields() {
        let mut note = Note::from_input(NewNote {
            title: Some("Draft".to_string()),
            content: Some("old".to_string()),
            tags: vec!["a".to_string()],
        });
        NoteUpdate {
            content: Some("new".to_string()),
            ..NoteUpdate::default()
        }
        .apply_to(&mut note);

        assert_eq!(note.title, "Draft");
        assert_eq!(note.content, "new");
        assert_eq!(note.tags, vec!["a"]);
    }

    #[test]
    fn deserialize_tolerates_sparse_records() {
        let note: Note = serde_yaml::from_str("content: hello\ntags: not-a-list\n").unwrap();
        assert_eq!(note.id, "");
        assert_eq!(note.title, "Untitled");
        assert_eq!(note.content, "hello");
        assert!(note.tags.is_empty());
    }

    #[test]
    fn search_hit_flattens_note_fields() {
        let note = Note::from_input(NewNote {
            title: Some("Plan".to_string()),
            ..NewNote::default()
        });
        let hit = NoteSearchHit {
            note,
            notebook_id: "work".to_string(),
            notebook_name: "Work".to_string(),
        };
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["title"], "Plan");
        assert_eq!(json["notebookId"], "work");
        assert_eq!(json["notebookName"], "Work");
    }
}
