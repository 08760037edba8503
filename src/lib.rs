//! linkstash - Interactive link metadata collector
//!
//! A command-line tool that collects structured metadata about web links
//! (URL, title, and three categorical attributes) in an interactive
//! terminal session, validates the categorical fields against externally
//! maintained vocabularies, persists records to a JSON store, and can
//! publish the updated store to a contributor branch.
//!
//! # Architecture
//!
//! One sequential flow per session:
//! - Vocabularies are loaded once at startup and stay immutable
//! - The collector re-prompts until every field is valid; invalid input
//!   is never an error
//! - The store is loaded once, mutated in memory by appends only, and
//!   rewritten in full at session end in a stable, diffable form
//! - The optional publish step runs git as an opaque subprocess
//!
//! # Modules
//!
//! - `cli`: Command-line interface
//! - `collector`: Interactive prompt loops
//! - `config`: Path and publish configuration
//! - `domain`: Data structures (LinkRecord, LinkOptions)
//! - `publish`: Git branch/commit/push sequence
//! - `store`: JSON persistence for the link store
//! - `vocab`: Vocabulary loading for the categorical fields
//!
//! # Usage
//!
//! ```bash
//! # Collect links and publish them on a contributor branch
//! linkstash add --publish
//!
//! # Browse the store
//! linkstash list
//! linkstash random --level some --interest web --type article
//! ```

pub mod cli;
pub mod collector;
pub mod config;
pub mod domain;
pub mod publish;
pub mod store;
pub mod vocab;

// Re-export main types at crate root for convenience
pub use collector::Collector;
pub use config::{PublishSettings, ResolvedConfig};
pub use domain::{LinkOptions, LinkRecord};
pub use publish::{CommandRunner, GitRunner, PublishError, Publisher};
pub use store::{LinkStore, StoreError};
pub use vocab::{Vocabularies, Vocabulary, VocabularyError};
