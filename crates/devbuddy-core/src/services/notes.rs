//! Notebooks, notes and their pasted assets.
//!
//! Layout under the notes root:
//!
//! ```text
//! index.yml                      notebook list
//! <notebook>/<note>.yml          one file per note
//! <notebook>/assets/asset-*.ext  images and videos referenced from notes
//! ```
//!
//! Assets have no index of their own. Whether an asset is still needed is
//! decided by re-scanning the content of every note in the notebook.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::assets::extract_asset_references;
use crate::error::{Error, Result};
use crate::models::{
    NewNote, NewNotebook, Note, NoteSearchHit, NoteUpdate, Notebook, NotebookUpdate,
    DEFAULT_NOTEBOOK_ID,
};
use crate::storage::{ensure_dir, list_yaml_files, read_yaml, write_yaml};
use crate::util::{random_suffix, validate_path_id};

const INDEX_FILE: &str = "index.yml";
const ASSETS_DIR: &str = "assets";
const NOTE_EXTENSION: &str = "yml";
const DEFAULT_ASSET_EXTENSION: &str = "png";

/// File-backed notebook and note store.
#[derive(Debug, Clone)]
pub struct NotesService {
    root: PathBuf,
}

impl NotesService {
    /// Open the store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = std::path::absolute(root.as_ref())?;
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ------------------------------------------------------------------
    // Notebooks
    // ------------------------------------------------------------------

    /// List notebooks, seeding the default notebook on first run.
    pub fn get_notebooks(&self) -> Result<Vec<Notebook>> {
        let index = self.index_path();
        if !index.exists() {
            let defaults = vec![Notebook::default_notebook()];
            self.save_notebooks(&defaults)?;
            self.ensure_notebook_dir(DEFAULT_NOTEBOOK_ID)?;
            return Ok(defaults);
        }

        match read_yaml::<Vec<Notebook>>(&index) {
            Ok(Some(notebooks)) => Ok(notebooks),
            Ok(None) => Ok(vec![Notebook::default_notebook()]),
            Err(error) => {
                tracing::warn!("Failed to load notebooks from {}: {error}", index.display());
                Ok(vec![Notebook::default_notebook()])
            }
        }
    }

    /// Find a notebook by id.
    pub fn get_notebook(&self, id: &str) -> Result<Option<Notebook>> {
        Ok(self
            .get_notebooks()?
            .into_iter()
            .find(|notebook| notebook.id == id))
    }

    /// Create a notebook and its directory.
    pub fn create_notebook(&self, input: NewNotebook) -> Result<Notebook> {
        let mut notebooks = self.get_notebooks()?;

        if let Some(name) = input.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            if notebooks.iter().any(|notebook| notebook.has_name(name)) {
                return Err(Error::DuplicateNotebook(name.to_string()));
            }
        }

        let notebook = Notebook::from_input(input);
        validate_path_id(&notebook.id, "Notebook")?;
        if notebooks.iter().any(|existing| existing.id == notebook.id) {
            return Err(Error::InvalidInput(format!(
                "Notebook id '{}' already exists",
                notebook.id
            )));
        }

        notebooks.push(notebook.clone());
        self.save_notebooks(&notebooks)?;
        self.ensure_notebook_dir(&notebook.id)?;
        tracing::info!("Created notebook {} ({})", notebook.id, notebook.name);
        Ok(notebook)
    }

    /// Update notebook metadata.
    pub fn update_notebook(&self, id: &str, update: NotebookUpdate) -> Result<Notebook> {
        let mut notebooks = self.get_notebooks()?;
        let index = notebooks
            .iter()
            .position(|notebook| notebook.id == id)
            .ok_or_else(|| Error::NotebookNotFound(id.to_string()))?;

        if let Some(name) = update.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            let taken = notebooks
                .iter()
                .any(|notebook| notebook.id != id && notebook.has_name(name));
            if taken {
                return Err(Error::DuplicateNotebook(name.to_string()));
            }
        }

        update.apply_to(&mut notebooks[index]);
        self.save_notebooks(&notebooks)?;
        Ok(notebooks.swap_remove(index))
    }

    /// Delete a notebook with all of its notes and assets.
    pub fn delete_notebook(&self, id: &str) -> Result<()> {
        if id == DEFAULT_NOTEBOOK_ID {
            return Err(Error::ProtectedNotebook);
        }

        let notebooks = self.get_notebooks()?;
        let remaining = notebooks
            .iter()
            .filter(|notebook| notebook.id != id)
            .cloned()
            .collect::<Vec<_>>();
        if remaining.len() == notebooks.len() {
            return Err(Error::NotebookNotFound(id.to_string()));
        }
        self.save_notebooks(&remaining)?;

        let dir = self.notebook_dir(id)?;
        match fs::remove_dir_all(&dir) {
            Ok(()) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => return Err(error.into()),
        }
        tracing::info!("Deleted notebook {id}");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Notes
    // ------------------------------------------------------------------

    /// Notes of a notebook, most recently updated first.
    ///
    /// Files that fail to parse are skipped with a warning.
    pub fn get_notes(&self, notebook_id: &str) -> Result<Vec<Note>> {
        let dir = self.ensure_notebook_dir(notebook_id)?;
        let mut notes = Vec::new();

        for path in list_yaml_files(&dir)? {
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match read_yaml::<Note>(&path) {
                Ok(note) => notes.push(with_fallback_id(note, stem)),
                Err(error) => {
                    tracing::warn!("Skipping unreadable note {}: {error}", path.display());
                }
            }
        }

        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(notes)
    }

    /// Load one note, `None` when it does not exist.
    pub fn get_note(&self, notebook_id: &str, note_id: &str) -> Result<Option<Note>> {
        let path = self.note_path(notebook_id, note_id)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(with_fallback_id(read_yaml::<Note>(&path)?, note_id)))
    }

    /// Create a note in `notebook_id`.
    pub fn create_note(&self, notebook_id: &str, input: NewNote) -> Result<Note> {
        self.ensure_notebook_dir(notebook_id)?;
        let note = Note::from_input(input);
        write_yaml(&self.note_path(notebook_id, &note.id)?, &note)?;
        Ok(note)
    }

    /// Update a note and delete assets it no longer references.
    ///
    /// An asset dropped from this note survives when any other note in the
    /// notebook still references it.
    pub fn update_note(
        &self,
        notebook_id: &str,
        note_id: &str,
        update: NoteUpdate,
    ) -> Result<Note> {
        let path = self.note_path(notebook_id, note_id)?;
        let mut note = self
            .get_note(notebook_id, note_id)?
            .ok_or_else(|| Error::NoteNotFound(note_id.to_string()))?;

        let assets_dir = self.assets_dir(notebook_id)?;
        let previous = extract_asset_references(&note.content, &assets_dir);
        update.apply_to(&mut note);
        let current = extract_asset_references(&note.content, &assets_dir);

        write_yaml(&path, &note)?;

        let dropped = previous.difference(&current).cloned().collect::<BTreeSet<_>>();
        self.remove_unreferenced_assets(notebook_id, note_id, &dropped);
        Ok(note)
    }

    /// Delete a note and the assets only it referenced.
    pub fn delete_note(&self, notebook_id: &str, note_id: &str) -> Result<()> {
        let path = self.note_path(notebook_id, note_id)?;
        if !path.exists() {
            return Err(Error::NoteNotFound(note_id.to_string()));
        }

        match self.get_note(notebook_id, note_id) {
            Ok(Some(note)) => {
                let assets_dir = self.assets_dir(notebook_id)?;
                let assets = extract_asset_references(&note.content, &assets_dir);
                self.remove_unreferenced_assets(notebook_id, note_id, &assets);
            }
            Ok(None) => {}
            Err(error) => {
                tracing::warn!("Skipping asset cleanup for unreadable note {note_id}: {error}");
            }
        }

        fs::remove_file(&path)?;
        tracing::info!("Deleted note {notebook_id}/{note_id}");
        Ok(())
    }

    /// Case-insensitive search over title, content and tags in every notebook.
    pub fn search_notes(&self, query: &str) -> Result<Vec<NoteSearchHit>> {
        let needle = query.to_lowercase();
        let mut hits = Vec::new();

        for notebook in self.get_notebooks()? {
            let notes = match self.get_notes(&notebook.id) {
                Ok(notes) => notes,
                Err(error) => {
                    tracing::warn!("Skipping notebook {} in search: {error}", notebook.id);
                    continue;
                }
            };
            hits.extend(
                notes
                    .into_iter()
                    .filter(|note| note.matches(&needle))
                    .map(|note| NoteSearchHit {
                        note,
                        notebook_id: notebook.id.clone(),
                        notebook_name: notebook.name.clone(),
                    }),
            );
        }

        Ok(hits)
    }

    // ------------------------------------------------------------------
    // Assets
    // ------------------------------------------------------------------

    /// Directory holding a notebook's assets. Not created by this call.
    pub fn assets_dir(&self, notebook_id: &str) -> Result<PathBuf> {
        Ok(self.notebook_dir(notebook_id)?.join(ASSETS_DIR))
    }

    /// Write an asset and return its absolute path.
    ///
    /// `extension` is reduced to ASCII alphanumerics and lowercased; it
    /// defaults to `png` when absent or empty after sanitizing.
    pub fn save_asset(
        &self,
        notebook_id: &str,
        bytes: &[u8],
        extension: Option<&str>,
    ) -> Result<PathBuf> {
        let dir = ensure_dir(&self.assets_dir(notebook_id)?)?;
        let extension = sanitize_extension(extension);
        let file_name = format!(
            "asset-{}-{}.{extension}",
            Utc::now().timestamp_millis(),
            random_suffix(6)
        );
        let path = dir.join(file_name);
        fs::write(&path, bytes)?;
        tracing::debug!("Saved asset {}", path.display());
        Ok(path)
    }

    /// Whether any note other than `exclude_note_id` references `asset`.
    pub fn is_asset_referenced_elsewhere(
        &self,
        notebook_id: &str,
        asset: &Path,
        exclude_note_id: &str,
    ) -> Result<bool> {
        let assets_dir = self.assets_dir(notebook_id)?;
        Ok(self
            .get_notes(notebook_id)?
            .iter()
            .filter(|note| note.id != exclude_note_id)
            .any(|note| extract_asset_references(&note.content, &assets_dir).contains(asset)))
    }

    fn remove_unreferenced_assets(
        &self,
        notebook_id: &str,
        note_id: &str,
        candidates: &BTreeSet<PathBuf>,
    ) {
        for asset in candidates {
            match self.is_asset_referenced_elsewhere(notebook_id, asset, note_id) {
                Ok(true) => continue,
                Ok(false) => {}
                Err(error) => {
                    tracing::warn!("Keeping asset {}: {error}", asset.display());
                    continue;
                }
            }
            match fs::remove_file(asset) {
                Ok(()) => tracing::debug!("Removed orphaned asset {}", asset.display()),
                Err(error) if error.kind() == io::ErrorKind::NotFound => {}
                Err(error) => {
                    tracing::warn!("Failed to remove asset {}: {error}", asset.display());
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Paths
    // ------------------------------------------------------------------

    fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    fn save_notebooks(&self, notebooks: &[Notebook]) -> Result<()> {
        write_yaml(&self.index_path(), notebooks)
    }

    fn notebook_dir(&self, notebook_id: &str) -> Result<PathBuf> {
        validate_path_id(notebook_id, "Notebook")?;
        Ok(self.root.join(notebook_id))
    }

    fn ensure_notebook_dir(&self, notebook_id: &str) -> Result<PathBuf> {
        ensure_dir(&self.notebook_dir(notebook_id)?)
    }

    fn note_path(&self, notebook_id: &str, note_id: &str) -> Result<PathBuf> {
        validate_path_id(note_id, "Note")?;
        Ok(self
            .notebook_dir(notebook_id)?
            .join(format!("{note_id}.{NOTE_EXTENSION}")))
    }
}

/// Notes saved without an `id` (or empty files) take their file stem.
fn with_fallback_id(note: Option<Note>, stem: &str) -> Note {
    let mut note = note.unwrap_or_else(|| Note {
        id: String::new(),
        ..Note::from_input(NewNote::default())
    });
    if note.id.is_empty() {
        note.id = stem.to_string();
    }
    note
}

fn sanitize_extension(extension: Option<&str>) -> String {
    let cleaned = extension
        .unwrap_or(DEFAULT_ASSET_EXTENSION)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    if cleaned.is_empty() {
        DEFAULT_ASSET_EXTENSION.to_string()
    } else {
        cleaned
    }
}
