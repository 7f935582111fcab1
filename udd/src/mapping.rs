//! UDD-to-FSD section mapping
//!
//! Loads the JSON rule table that maps a UDD section name to the ordered
//! list of FSD section numbers considered relevant to it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors from mapping table loading
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("Mapping file not found at: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read mapping file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse mapping file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only rule table: UDD section name -> ordered FSD section numbers
#[derive(Debug, Clone, Default)]
pub struct SectionMapping {
    map: HashMap<String, Vec<String>>,
}

impl SectionMapping {
    /// Load the mapping from a JSON object file, failing fast when missing
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MappingError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "SectionMapping::load: called");
        if !path.exists() {
            return Err(MappingError::MissingFile(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|source| MappingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map: HashMap<String, Vec<String>> = serde_json::from_str(&text).map_err(|source| MappingError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(entries = map.len(), "SectionMapping::load: parsed");
        Ok(Self { map })
    }

    /// Build a mapping directly from a map (for tests and callers with
    /// already-parsed rules)
    pub fn from_map(map: HashMap<String, Vec<String>>) -> Self {
        Self { map }
    }

    /// FSD section numbers mapped to a UDD section; empty when unmapped
    pub fn numbers_for(&self, udd_section: &str) -> &[String] {
        self.map.get(udd_section).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of UDD sections with mapping entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when no UDD section has mapping entries
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
