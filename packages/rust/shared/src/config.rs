//! Configuration for readme-indexer.
//!
//! An optional `readme-indexer.toml` lives in the repository root.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReadmeIndexerError, Result};

/// Configuration file name, looked up in the root directory.
pub const CONFIG_FILE_NAME: &str = "readme-indexer.toml";

/// Literal tag opening the notes region.
pub const NOTES_START_TAG: &str = "<!-- NOTES_START -->";

/// Literal tag closing the notes region.
pub const NOTES_END_TAG: &str = "<!-- NOTES_END -->";

// ---------------------------------------------------------------------------
// Config structs (matching readme-indexer.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Notes indexer settings.
    #[serde(default)]
    pub notes: NotesSection,

    /// Article TOC builder settings.
    #[serde(default)]
    pub toc: TocSection,
}

/// `[notes]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesSection {
    /// Directory of notes, relative to the root.
    #[serde(default = "default_notes_dir")]
    pub dir: String,

    /// README file holding the notes region, relative to the root.
    #[serde(default = "default_readme")]
    pub readme: String,

    /// Line written when there are no notes.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for NotesSection {
    fn default() -> Self {
        Self {
            dir: default_notes_dir(),
            readme: default_readme(),
            placeholder: default_placeholder(),
        }
    }
}

fn default_notes_dir() -> String {
    "notes".into()
}
fn default_readme() -> String {
    "README.md".into()
}
fn default_placeholder() -> String {
    "_No notes yet._".into()
}

/// `[toc]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocSection {
    /// Root of the category directories, relative to the root.
    #[serde(default = "default_articles_dir")]
    pub articles_dir: String,

    /// README file holding the category tables, relative to the root.
    #[serde(default = "default_readme")]
    pub readme: String,

    /// File names skipped inside category directories (case-insensitive).
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    /// Heading text that new category sections are inserted under.
    #[serde(default = "default_anchor_heading")]
    pub anchor_heading: String,
}

impl Default for TocSection {
    fn default() -> Self {
        Self {
            articles_dir: default_articles_dir(),
            readme: default_readme(),
            ignore: default_ignore(),
            anchor_heading: default_anchor_heading(),
        }
    }
}

fn default_articles_dir() -> String {
    "articles".into()
}
fn default_ignore() -> Vec<String> {
    vec!["README.md".into(), "TEMPLATE.md".into(), "template.md".into()]
}
fn default_anchor_heading() -> String {
    "Featured Articles".into()
}

// ---------------------------------------------------------------------------
// Runtime configs (merged from config file + root directory)
// ---------------------------------------------------------------------------

/// Runtime configuration for the notes indexer.
#[derive(Debug, Clone)]
pub struct NotesConfig {
    /// Repository root; note links are made relative to it.
    pub root: PathBuf,
    /// Absolute (or root-joined) notes directory.
    pub notes_dir: PathBuf,
    /// README path.
    pub readme_path: PathBuf,
    /// Placeholder line for an empty index.
    pub placeholder: String,
}

impl NotesConfig {
    pub fn new(root: impl Into<PathBuf>, config: &AppConfig) -> Self {
        let root = root.into();
        Self {
            notes_dir: root.join(&config.notes.dir),
            readme_path: root.join(&config.notes.readme),
            placeholder: config.notes.placeholder.clone(),
            root,
        }
    }
}

/// Runtime configuration for the article TOC builder.
#[derive(Debug, Clone)]
pub struct TocConfig {
    /// Working root; article links are made relative to it.
    pub root: PathBuf,
    /// Directory holding one subdirectory per category.
    pub articles_dir: PathBuf,
    /// README path.
    pub readme_path: PathBuf,
    /// Lower-cased file names to skip.
    pub ignore: Vec<String>,
    /// Heading text new sections are inserted under.
    pub anchor_heading: String,
}

impl TocConfig {
    pub fn new(root: impl Into<PathBuf>, config: &AppConfig) -> Self {
        let root = root.into();
        Self {
            articles_dir: root.join(&config.toc.articles_dir),
            readme_path: root.join(&config.toc.readme),
            ignore: config.toc.ignore.iter().map(|n| n.to_lowercase()).collect(),
            anchor_heading: config.toc.anchor_heading.clone(),
            root,
        }
    }

    /// Whether a file name is on the ignore list.
    pub fn is_ignored(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.ignore.iter().any(|n| *n == lower)
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file inside `root`.
pub fn config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load the config from `root`. Returns defaults if the file does not exist.
pub fn load_config(root: &Path) -> Result<AppConfig> {
    let path = config_file_path(root);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ReadmeIndexerError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        ReadmeIndexerError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Write a default config file into `root`.
/// Refuses to overwrite an existing file. Returns the path written.
pub fn init_config(root: &Path) -> Result<PathBuf> {
    let path = config_file_path(root);
    if path.exists() {
        return Err(ReadmeIndexerError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| ReadmeIndexerError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ReadmeIndexerError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_serializes() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).expect("serialize");
        assert!(toml_str.contains("articles_dir"));
        assert!(toml_str.contains("Featured Articles"));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let toml_str = r#"
[notes]
dir = "journal"

[toc]
ignore = ["DRAFT.md"]
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.notes.dir, "journal");
        assert_eq!(config.notes.readme, "README.md");
        assert_eq!(config.toc.articles_dir, "articles");
        assert_eq!(config.toc.ignore, vec!["DRAFT.md".to_string()]);
    }

    #[test]
    fn runtime_configs_join_root() {
        let app = AppConfig::default();
        let notes = NotesConfig::new("/repo", &app);
        assert_eq!(notes.notes_dir, PathBuf::from("/repo/notes"));
        assert_eq!(notes.readme_path, PathBuf::from("/repo/README.md"));

        let toc = TocConfig::new("/repo", &app);
        assert_eq!(toc.articles_dir, PathBuf::from("/repo/articles"));
        assert!(toc.is_ignored("readme.md"));
        assert!(toc.is_ignored("Template.md"));
        assert!(!toc.is_ignored("intro.md"));
    }

    #[test]
    fn missing_config_file_means_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let config = load_config(dir.path()).expect("defaults");
        assert_eq!(config.notes.placeholder, "_No notes yet._");
    }

    #[test]
    fn malformed_config_is_reported() {
        let dir = TempDir::new().expect("tempdir");
        let path = config_file_path(dir.path());
        std::fs::write(&path, "[notes\ndir = 3").expect("write");

        let err = load_config(dir.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn init_writes_defaults_once() {
        let dir = TempDir::new().expect("tempdir");
        let path = init_config(dir.path()).expect("init");
        let config = load_config_from(&path).expect("reload");
        assert_eq!(config.toc.anchor_heading, "Featured Articles");

        let err = init_config(dir.path()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
