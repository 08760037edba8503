//! Vocabulary loading for the categorical link fields.
//!
//! Each categorical field (level, interest, type) has a closed set of
//! permitted values maintained in an external JSON document. Two source
//! shapes are accepted:
//! - a flat array of strings, used directly
//! - an array of objects each carrying a `value` key, from which the
//!   permitted value is extracted (extra keys are ignored)
//!
//! Vocabularies are loaded once at session start and are immutable for
//! the duration of the session. Membership is exact, case-sensitive
//! string equality.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

use crate::config::ResolvedConfig;

/// Errors raised while loading a vocabulary source
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Vocabulary '{name}' is unreadable at {}: {source}", .path.display())]
    Unreadable {
        name: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Vocabulary '{name}' is not valid JSON: {source}")]
    Parse {
        name: String,
        source: serde_json::Error,
    },

    #[error("Vocabulary '{name}' is malformed: {reason}")]
    Malformed { name: String, reason: String },
}

/// A named, ordered set of permitted values for one categorical field
#[derive(Debug, Clone)]
pub struct Vocabulary {
    name: String,
    values: Vec<String>,
}

impl Vocabulary {
    /// Create a vocabulary from already-validated values
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Load a vocabulary from a JSON document on disk
    pub async fn load(name: &str, path: &Path) -> Result<Self, VocabularyError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| VocabularyError::Unreadable {
                name: name.to_string(),
                path: path.to_path_buf(),
                source,
            })?;

        let vocab = Self::from_json(name, &content)?;
        tracing::debug!(
            vocabulary = name,
            values = vocab.values.len(),
            "Loaded vocabulary"
        );
        Ok(vocab)
    }

    /// Parse a vocabulary from JSON text, accepting both source shapes
    pub fn from_json(name: &str, content: &str) -> Result<Self, VocabularyError> {
        let document: serde_json::Value =
            serde_json::from_str(content).map_err(|source| VocabularyError::Parse {
                name: name.to_string(),
                source,
            })?;

        let entries = document
            .as_array()
            .ok_or_else(|| VocabularyError::Malformed {
                name: name.to_string(),
                reason: "document is not an array".to_string(),
            })?;

        let mut values = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let value = match entry {
                serde_json::Value::String(s) => s.as_str(),
                serde_json::Value::Object(fields) => fields
                    .get("value")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| VocabularyError::Malformed {
                        name: name.to_string(),
                        reason: format!("entry {} has no string 'value' key", index),
                    })?,
                _ => {
                    return Err(VocabularyError::Malformed {
                        name: name.to_string(),
                        reason: format!("entry {} is neither a string nor an object", index),
                    })
                }
            };
            values.push(value.to_string());
        }

        Ok(Self::new(name, values))
    }

    /// Exact membership test (case-sensitive)
    pub fn contains(&self, candidate: &str) -> bool {
        self.values.iter().any(|v| v == candidate)
    }

    /// Field name this vocabulary validates
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Permitted values in source order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Values joined for prompt display ("none OR some OR lots")
    pub fn display_list(&self) -> String {
        self.values.join(" OR ")
    }
}

/// The three session vocabularies, loaded together at startup
#[derive(Debug, Clone)]
pub struct Vocabularies {
    pub level: Vocabulary,
    pub interest: Vocabulary,
    pub resource_type: Vocabulary,
}

impl Vocabularies {
    /// Load all three vocabularies from the configured paths
    pub async fn load(config: &ResolvedConfig) -> Result<Self, VocabularyError> {
        Ok(Self {
            level: Vocabulary::load("level", &config.levels_path).await?,
            interest: Vocabulary::load("interest", &config.interests_path).await?,
            resource_type: Vocabulary::load("type", &config.resource_types_path).await?,
        })
    }
}
