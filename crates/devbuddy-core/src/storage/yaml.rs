use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Create `dir` and its parents when missing, returning it for chaining.
pub fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    Ok(dir.to_path_buf())
}

/// Read and parse a YAML document.
///
/// Returns `Ok(None)` when the file does not exist or holds an empty/null
/// document; other IO and parse failures are errors.
pub fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error.into()),
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    Ok(serde_yaml::from_str::<Option<T>>(&raw)?)
}

/// Serialize `value` as YAML and overwrite `path`.
pub fn write_yaml<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let serialized = serde_yaml::to_string(value)?;
    fs::write(path, serialized)?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

/// List `*.yml` files directly inside `dir`, sorted by file name.
pub fn list_yaml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "yml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn read_yaml_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let value: Option<Vec<String>> = read_yaml(&dir.path().join("missing.yml")).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn read_yaml_empty_document_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.yml");
        fs::write(&path, "\n").unwrap();
        let value: Option<Vec<String>> = read_yaml(&path).unwrap();
        assert_eq!(value, None);

        fs::write(&path, "null\n").unwrap();
        let value: Option<Vec<String>> = read_yaml(&path).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn write_then_read_preserves_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("list.yml");
        write_yaml(&path, &vec!["a".to_string(), "b".to_string()]).unwrap();

        let value: Option<Vec<String>> = read_yaml(&path).unwrap();
        assert_eq!(value, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn list_yaml_files_skips_other_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.yml"), "x: 1").unwrap();
        fs::write(dir.path().join("a.yml"), "x: 1").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("assets")).unwrap();

        let files = list_yaml_files(dir.path()).unwrap();
        let names = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a.yml", "b.yml"]);
    }
}
