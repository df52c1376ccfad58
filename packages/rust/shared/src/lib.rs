//! Shared types, error model, and configuration for readme-indexer.
//!
//! This crate is the foundation depended on by all other readme-indexer crates.
//! It provides:
//! - [`ReadmeIndexerError`] — the unified error type
//! - Domain types ([`Category`], [`Note`], [`Article`], [`ArticleMeta`])
//! - Configuration ([`AppConfig`], [`NotesConfig`], [`TocConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, NOTES_END_TAG, NOTES_START_TAG, NotesConfig, NotesSection,
    TocConfig, TocSection, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{ReadmeIndexerError, Result};
pub use types::{Article, ArticleMeta, Category, CategoryInfo, Note};
