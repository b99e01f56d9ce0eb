//! Document Loading
//!
//! Reads schema and recipe files from disk. Decoding failures of a recipe
//! are input errors for that one document, not for the session.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Extensions picked up when validating a directory.
pub const RECIPE_EXTENSIONS: [&str; 2] = ["rcip", "json"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A recipe file after the load attempt.
#[derive(Debug)]
pub struct LoadedDocument {
    /// File name, used to label results.
    pub name: String,
    pub document: Result<Value, LoadError>,
}

pub fn load_json(path: &Path) -> Result<Value, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    Ok(serde_json::from_str(&content)?)
}

pub fn load_document(path: &Path) -> LoadedDocument {
    LoadedDocument {
        name: display_name(path),
        document: load_json(path),
    }
}

/// Recipe files directly inside `dir`, sorted by path.
pub fn discover_recipe_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = vec![];
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_recipe = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| RECIPE_EXTENSIONS.contains(&e));
        if is_recipe && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.rcip"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let files = discover_recipe_files(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|p| display_name(p)).collect();
        assert_eq!(names, vec!["a.json", "b.rcip"]);
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.rcip");
        assert!(matches!(load_json(&missing), Err(LoadError::NotFound(_))));

        let broken = dir.path().join("broken.rcip");
        fs::write(&broken, "{ not json").unwrap();
        let loaded = load_document(&broken);
        assert_eq!(loaded.name, "broken.rcip");
        let err = loaded.document.unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON: "));
    }

    #[test]
    fn test_discover_missing_directory() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            discover_recipe_files(&dir.path().join("nope")),
            Err(LoadError::Io { .. })
        ));
    }
}
