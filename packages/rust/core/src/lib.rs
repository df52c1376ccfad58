//! README index generation for readme-indexer.
//!
//! Two independent runs live here:
//! - [`notes::update_notes`] rewrites the notes block from a flat notes directory
//! - [`toc::update_toc`] rewrites the per-category article tables

use std::path::Path;

pub mod articles;
pub mod notes;
pub mod readme;
pub mod toc;

/// Link target for `path` relative to `root`, always with forward slashes.
///
/// Paths outside `root` are returned as given.
pub(crate) fn relative_link(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.to_string_lossy().replace('\\', "/"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_link_uses_forward_slashes() {
        let root = Path::new("/repo");
        assert_eq!(
            relative_link(Path::new("/repo/notes/2024-01-01-a.md"), root),
            "notes/2024-01-01-a.md"
        );
        assert_eq!(relative_link(Path::new("other/file.md"), root), "other/file.md");
    }
}
