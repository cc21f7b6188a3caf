//! Snapshot document loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::SnapshotDocument;
use crate::config::validation::{validate_document, ValidationError};

/// Error type for document loading.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "IO error: {}", e),
            LoadError::Parse(e) => write!(f, "Parse error: {}", e),
            LoadError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::Validation(_) => None,
        }
    }
}

/// Parse and validate a snapshot document from TOML text.
pub fn parse_document(content: &str) -> Result<SnapshotDocument, LoadError> {
    let doc: SnapshotDocument = toml::from_str(content).map_err(LoadError::Parse)?;

    validate_document(&doc).map_err(LoadError::Validation)?;

    Ok(doc)
}

/// Load and validate a snapshot document from a TOML file.
pub fn load_document(path: &Path) -> Result<SnapshotDocument, LoadError> {
    let content = fs::read_to_string(path).map_err(LoadError::Io)?;
    let doc = parse_document(&content)?;

    tracing::debug!(
        path = %path.display(),
        connections = doc.connections.len(),
        clusters = doc.clusters.len(),
        "Snapshot document loaded"
    );
    Ok(doc)
}
