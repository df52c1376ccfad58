//! Notes indexer.
//!
//! Lists the Markdown files directly under the notes directory, newest file
//! name first, and writes them as a bullet list into the README's notes block.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use readme_indexer_markdown::note_title;
use readme_indexer_shared::{Note, NotesConfig, ReadmeIndexerError, Result};

use crate::readme::replace_notes_block;
use crate::relative_link;

/// Result of a notes indexer run.
#[derive(Debug)]
pub struct NotesReport {
    /// Number of notes listed (0 when the placeholder was written).
    pub note_count: usize,
    /// README that was rewritten.
    pub readme_path: PathBuf,
}

/// Collect the notes under `config.notes_dir`, sorted by file name descending.
///
/// A missing directory yields an empty list.
pub fn collect_notes(config: &NotesConfig) -> Result<Vec<Note>> {
    if !config.notes_dir.is_dir() {
        debug!(dir = %config.notes_dir.display(), "notes directory not found");
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(&config.notes_dir)
        .map_err(|e| ReadmeIndexerError::io(&config.notes_dir, e))?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ReadmeIndexerError::io(&config.notes_dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

    let mut notes = Vec::with_capacity(files.len());
    for path in &files {
        notes.push(Note {
            title: read_note_title(path)?,
            path: relative_link(path, &config.root),
        });
    }
    Ok(notes)
}

/// Render the notes list, or the placeholder when there are no notes.
pub fn build_notes_list(config: &NotesConfig) -> Result<String> {
    let notes = collect_notes(config)?;
    Ok(render_notes(&notes, &config.placeholder))
}

fn render_notes(notes: &[Note], placeholder: &str) -> String {
    if notes.is_empty() {
        return placeholder.to_string();
    }
    notes
        .iter()
        .map(Note::to_bullet)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rebuild the notes block in the README.
///
/// Fails without writing when either notes tag is missing.
#[instrument(skip_all, fields(readme = %config.readme_path.display()))]
pub fn update_notes(config: &NotesConfig) -> Result<NotesReport> {
    let notes = collect_notes(config)?;
    let block = render_notes(&notes, &config.placeholder);

    let content = std::fs::read_to_string(&config.readme_path)
        .map_err(|e| ReadmeIndexerError::io(&config.readme_path, e))?;
    let updated = replace_notes_block(&content, &block, &config.readme_path)?;

    std::fs::write(&config.readme_path, updated)
        .map_err(|e| ReadmeIndexerError::io(&config.readme_path, e))?;

    info!(notes = notes.len(), "notes index updated");

    Ok(NotesReport {
        note_count: notes.len(),
        readme_path: config.readme_path.clone(),
    })
}

/// Title of a single note file, from its first line.
pub fn read_note_title(path: &Path) -> Result<String> {
    let first_line = read_first_line(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(note_title(&first_line, &stem))
}

/// First line of a file; bytes that are not valid UTF-8 are dropped.
fn read_first_line(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| ReadmeIndexerError::io(path, e))?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text.lines().next().unwrap_or_default().to_string()),
        Err(err) => {
            debug!(path = %path.display(), "note is not valid UTF-8, decoding leniently");
            let bytes = err.into_bytes();
            let line = bytes.split(|b| *b == b'\n').next().unwrap_or_default();
            Ok(line.utf8_chunks().map(|chunk| chunk.valid()).collect())
        }
    }
}
