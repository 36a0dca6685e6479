use devbuddy_core::models::NoteSearchHit;
use devbuddy_core::NotesService;

use crate::commands::common::{normalize_search_query, print_json, print_lines, short_id, truncate};
use crate::error::CliError;

pub fn run_search(query: &str, as_json: bool, notes: &NotesService) -> Result<(), CliError> {
    let hits = search(query, notes)?;

    if as_json {
        print_json(&hits)?;
    } else {
        print_lines(&format_search_lines(&hits));
    }

    Ok(())
}

pub fn search(query: &str, notes: &NotesService) -> Result<Vec<NoteSearchHit>, CliError> {
    let normalized_query = normalize_search_query(query)?;
    Ok(notes.search_notes(&normalized_query)?)
}

pub fn format_search_lines(hits: &[NoteSearchHit]) -> Vec<String> {
    hits.iter()
        .map(|hit| {
            format!(
                "{:<13}  {:<16}  {}",
                short_id(&hit.note.id),
                truncate(&hit.notebook_name, 16),
                truncate(&hit.note.title, 60)
            )
        })
        .collect()
}
