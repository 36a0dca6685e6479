use std::path::{Path, PathBuf};

use chrono::Utc;
use devbuddy_core::export::{render_notes_export, suggested_export_file_name, NotebookNote};
use devbuddy_core::{Error, Note, Notebook, NotesService};

use crate::cli::ExportFormat;
use crate::error::CliError;

pub fn run_export(
    format: ExportFormat,
    notebook_id: Option<&str>,
    output_path: Option<&Path>,
    notes: &NotesService,
) -> Result<(), CliError> {
    let rendered = render_export(format, notebook_id, notes)?;

    if let Some(path) = output_path {
        let path = resolve_output_path(path, format);
        std::fs::write(&path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}

pub fn render_export(
    format: ExportFormat,
    notebook_id: Option<&str>,
    notes: &NotesService,
) -> Result<String, CliError> {
    let notebooks = match notebook_id {
        Some(id) => vec![notes
            .get_notebook(id)?
            .ok_or_else(|| Error::NotebookNotFound(id.to_string()))?],
        None => notes.get_notebooks()?,
    };

    let mut loaded = Vec::<(&Notebook, Vec<Note>)>::new();
    for notebook in &notebooks {
        loaded.push((notebook, notes.get_notes(&notebook.id)?));
    }
    let entries = loaded
        .iter()
        .flat_map(|(notebook, notes)| {
            let notebook: &Notebook = notebook;
            notes.iter().map(move |note| NotebookNote { notebook, note })
        })
        .collect::<Vec<_>>();

    Ok(render_notes_export(&entries, format.into())?)
}

/// A directory target gets a generated file name inside it.
fn resolve_output_path(path: &Path, format: ExportFormat) -> PathBuf {
    if path.is_dir() {
        path.join(suggested_export_file_name(
            format.into(),
            Utc::now().timestamp_millis(),
        ))
    } else {
        path.to_path_buf()
    }
}
