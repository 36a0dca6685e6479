use std::path::{Path, PathBuf};

use devbuddy_core::models::{NewNote, NoteUpdate};
use devbuddy_core::{Error, Note, NotesService};

use crate::cli::NoteCommands;
use crate::commands::common::{
    capture_editor_input_with_initial, format_note_lines, format_timestamp, normalize_identifier,
    print_json, print_lines, render_tags, resolve_note_content,
};
use crate::error::CliError;

pub fn run_note(command: NoteCommands, notes: &NotesService) -> Result<(), CliError> {
    match command {
        NoteCommands::List { notebook, json } => {
            let listed = notes.get_notes(&notebook)?;
            if json {
                print_json(&listed)?;
            } else {
                print_lines(&format_note_lines(&listed));
            }
        }
        NoteCommands::Show { id, notebook, json } => {
            let note = load_note(notes, &notebook, &id)?;
            if json {
                print_json(&note)?;
            } else {
                println!("{}", render_note(&note));
            }
        }
        NoteCommands::Add {
            content,
            notebook,
            title,
            tags,
            json,
        } => {
            let content = resolve_note_content(&content)?;
            let note = run_note_add(notes, &notebook, title, content, tags)?;
            if json {
                print_json(&note)?;
            } else {
                println!("{}", note.id);
            }
        }
        NoteCommands::Edit {
            id,
            notebook,
            title,
            content,
            tags,
        } => {
            let update = NoteUpdate {
                title,
                content,
                tags,
            };
            let note = if update.is_empty() {
                run_note_edit_in_editor(notes, &notebook, &id)?
            } else {
                run_note_edit(notes, &notebook, &id, update)?
            };
            println!("{}", note.id);
        }
        NoteCommands::Delete { id, notebook } => {
            let id = normalize_identifier(&id, "Note ID")?;
            notes.delete_note(&notebook, &id)?;
            println!("{id}");
        }
        NoteCommands::Attach {
            file,
            notebook,
            note,
        } => {
            let (path, reference) = run_note_attach(notes, &notebook, &file, note.as_deref())?;
            println!("{}", path.display());
            if note.is_none() {
                println!("{reference}");
            }
        }
    }

    Ok(())
}

pub fn run_note_add(
    notes: &NotesService,
    notebook_id: &str,
    title: Option<String>,
    content: String,
    tags: Vec<String>,
) -> Result<Note, CliError> {
    Ok(notes.create_note(
        notebook_id,
        NewNote {
            title,
            content: Some(content),
            tags,
        },
    )?)
}

pub fn run_note_edit(
    notes: &NotesService,
    notebook_id: &str,
    note_id: &str,
    update: NoteUpdate,
) -> Result<Note, CliError> {
    let note_id = normalize_identifier(note_id, "Note ID")?;
    Ok(notes.update_note(notebook_id, &note_id, update)?)
}

fn run_note_edit_in_editor(
    notes: &NotesService,
    notebook_id: &str,
    note_id: &str,
) -> Result<Note, CliError> {
    let note = load_note(notes, notebook_id, note_id)?;

    let Some(edited_content) = capture_editor_input_with_initial(&note.content)? else {
        return Err(CliError::EmptyEditedContent);
    };

    if edited_content == note.content {
        return Ok(note);
    }

    run_note_edit(
        notes,
        notebook_id,
        &note.id,
        NoteUpdate {
            content: Some(edited_content),
            ..NoteUpdate::default()
        },
    )
}

/// Copy `file` into the notebook's assets and return the stored path with
/// a markdown reference to it. With `note_id`, the reference is appended to
/// that note.
pub fn run_note_attach(
    notes: &NotesService,
    notebook_id: &str,
    file: &Path,
    note_id: Option<&str>,
) -> Result<(PathBuf, String), CliError> {
    let bytes = std::fs::read(file)?;
    let extension = file.extension().and_then(|ext| ext.to_str());
    let path = notes.save_asset(notebook_id, &bytes, extension)?;

    let label = file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let reference = format!("![{label}]({})", path.display());

    if let Some(note_id) = note_id {
        let note = load_note(notes, notebook_id, note_id)?;
        let content = if note.content.is_empty() {
            reference.clone()
        } else {
            format!("{}\n\n{reference}", note.content)
        };
        run_note_edit(
            notes,
            notebook_id,
            &note.id,
            NoteUpdate {
                content: Some(content),
                ..NoteUpdate::default()
            },
        )?;
    }

    Ok((path, reference))
}

fn load_note(notes: &NotesService, notebook_id: &str, note_id: &str) -> Result<Note, CliError> {
    let note_id = normalize_identifier(note_id, "Note ID")?;
    notes
        .get_note(notebook_id, &note_id)?
        .ok_or_else(|| CliError::from(Error::NoteNotFound(note_id)))
}

pub fn render_note(note: &Note) -> String {
    let mut rendered = format!(
        "# {}\n\nid: {}\nupdated: {}\n",
        note.title,
        note.id,
        format_timestamp(note.updated_at)
    );
    let tags = render_tags(&note.tags);
    if !tags.is_empty() {
        rendered.push_str("tags: ");
        rendered.push_str(&tags);
        rendered.push('\n');
    }
    rendered.push('\n');
    rendered.push_str(&note.content);
    rendered
}
