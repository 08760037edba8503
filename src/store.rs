//! JSON persistence for the link store.
//!
//! The store is a single pretty-printed JSON array of link records,
//! loaded once at session start and rewritten in full at session end.
//! The on-disk form is canonical (4-space indentation, fixed key order)
//! so that rewrites of an unchanged store are byte-identical and diffs
//! stay readable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use thiserror::Error;
use tokio::fs;

use crate::domain::{LinkOptions, LinkRecord};

/// Errors raised while loading or saving the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read link store at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Link store at {} is not a valid link array: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize link store: {0}")]
    Encode(serde_json::Error),

    #[error("Failed to write link store at {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Ordered collection of link records, appends only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkStore {
    records: Vec<LinkRecord>,
}

impl LinkStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from disk.
    ///
    /// The file must already exist; a fresh store is never created here.
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| StoreError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let store: Self =
            serde_json::from_str(&content).map_err(|source| StoreError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(links = store.len(), path = %path.display(), "Loaded link store");
        Ok(store)
    }

    /// Save the store to disk, replacing the prior content entirely
    pub async fn save(&self, path: &Path) -> Result<(), StoreError> {
        let content = self.to_canonical_bytes()?;
        fs::write(path, content)
            .await
            .map_err(|source| StoreError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(links = self.len(), path = %path.display(), "Saved link store");
        Ok(())
    }

    /// Canonical serialized form: 4-space indentation, stable key order
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, StoreError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer).map_err(StoreError::Encode)?;
        Ok(buf)
    }

    /// Append one record, preserving insertion order
    pub fn append(&mut self, record: LinkRecord) {
        self.records.push(record);
    }

    /// All records in insertion order
    pub fn records(&self) -> &[LinkRecord] {
        &self.records
    }

    /// Records sorted by interest, then level, then type
    pub fn sorted_by_options(&self) -> Vec<&LinkRecord> {
        let mut records: Vec<_> = self.records.iter().collect();
        records.sort_by(|a, b| a.cmp_by_options(b));
        records
    }

    /// A random record matching all three options, if any exists
    pub fn random_matching(&self, options: &LinkOptions) -> Option<&LinkRecord> {
        use rand::seq::IndexedRandom;

        let matches: Vec<&LinkRecord> = self
            .records
            .iter()
            .filter(|r| r.options == *options)
            .collect();

        matches.choose(&mut rand::rng()).copied()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
