//! Catalog loading from JSON part files
//!
//! Each file holds a JSON array of part records. Files are concatenated in
//! the order given and validated as a whole.

use rust_embed::Embed;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::core::catalog::{CatalogError, PartCatalog};
use crate::core::part::Part;

/// Built-in catalog files, one per weapon class
pub const EMBEDDED_FILES: &[&str] = &[
    "pistols_parts.json",
    "smg_parts.json",
    "shotguns_parts.json",
    "sniper_parts.json",
    "rifle_parts.json",
];

#[derive(Embed)]
#[folder = "catalog/"]
struct EmbeddedCatalog;

/// Errors raised while loading part files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid part data in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Embedded catalog file missing: {0}")]
    MissingEmbedded(String),

    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Parse a JSON array of parts; `origin` names the source in errors
pub fn parse_parts(content: &str, origin: &Path) -> Result<Vec<Part>, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::Parse {
        path: origin.to_path_buf(),
        source,
    })
}

/// Read the parts of one file
pub fn load_parts(path: &Path) -> Result<Vec<Part>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parts = parse_parts(&content, path)?;
    tracing::debug!(path = %path.display(), parts = parts.len(), "loaded part file");
    Ok(parts)
}

/// Load and validate a catalog from files, in order
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<PartCatalog, LoadError> {
    let mut parts = Vec::new();
    for path in paths {
        parts.extend(load_parts(path.as_ref())?);
    }
    finish(parts, "files")
}

/// Load every `*.json` file below `dir`, sorted by path
pub fn load_dir(dir: &Path) -> Result<PartCatalog, LoadError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| LoadError::Io {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
            source: e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    load_all(&files)
}

/// Load the catalog compiled into the binary
pub fn load_embedded() -> Result<PartCatalog, LoadError> {
    let mut parts = Vec::new();
    for name in EMBEDDED_FILES {
        let file =
            EmbeddedCatalog::get(name).ok_or_else(|| LoadError::MissingEmbedded(name.to_string()))?;
        let content = String::from_utf8_lossy(&file.data);
        parts.extend(parse_parts(&content, Path::new(name))?);
    }
    finish(parts, "embedded")
}

fn finish(parts: Vec<Part>, source: &str) -> Result<PartCatalog, LoadError> {
    let catalog = PartCatalog::new(parts)?;
    tracing::info!(source, parts = catalog.len(), "catalog loaded");
    Ok(catalog)
}
