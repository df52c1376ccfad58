//! Article discovery and per-file metadata loading.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use readme_indexer_markdown::extract_article_meta;
use readme_indexer_shared::{Article, ArticleMeta, Category, ReadmeIndexerError, Result, TocConfig};

use crate::relative_link;

/// Description given to articles whose file could not be read.
pub const FALLBACK_DESCRIPTION: &str = "Description unavailable.";

/// Everything found under the articles root.
#[derive(Debug, Default)]
pub struct ArticleScan {
    /// Articles in discovery order (category directory, then file name).
    pub articles: Vec<Article>,
    /// Files that fell back to default metadata.
    pub degraded: Vec<PathBuf>,
}

/// Walk `config.articles_dir` and load every article in a known category.
///
/// Fails only when the articles root itself is missing or unreadable. A file
/// that cannot be read is logged and listed with default metadata.
pub fn scan_articles(config: &TocConfig, now: NaiveDateTime) -> Result<ArticleScan> {
    if !config.articles_dir.is_dir() {
        return Err(ReadmeIndexerError::MissingSource {
            path: config.articles_dir.clone(),
        });
    }

    let mut scan = ArticleScan::default();

    for dir in sorted_entries(&config.articles_dir)? {
        if !dir.is_dir() {
            continue;
        }
        let name = file_name(&dir);
        let Some(category) = Category::from_slug(&name) else {
            debug!(dir = %dir.display(), "skipping unknown category directory");
            continue;
        };

        for path in sorted_entries(&dir)? {
            let file = file_name(&path);
            if !path.is_file() || !file.ends_with(".md") || config.is_ignored(&file) {
                continue;
            }

            match load_article(&path, category, &config.root, now) {
                Ok(article) => scan.articles.push(article),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "failed to load article, using defaults");
                    scan.articles.push(fallback_article(&path, category, &config.root, now));
                    scan.degraded.push(path);
                }
            }
        }
    }

    debug!(
        articles = scan.articles.len(),
        degraded = scan.degraded.len(),
        "article scan complete"
    );
    Ok(scan)
}

/// Read one article and extract its metadata.
pub fn load_article(
    path: &Path,
    category: Category,
    root: &Path,
    now: NaiveDateTime,
) -> Result<Article> {
    let content = std::fs::read_to_string(path).map_err(|e| ReadmeIndexerError::io(path, e))?;
    let link = relative_link(path, root);
    let meta = extract_article_meta(&content, &link, now);

    Ok(Article {
        category,
        path: link,
        meta,
    })
}

/// Placeholder entry for an article that could not be loaded.
pub fn fallback_article(path: &Path, category: Category, root: &Path, now: NaiveDateTime) -> Article {
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name(path));

    Article {
        category,
        path: relative_link(path, root),
        meta: ArticleMeta {
            title,
            date: now,
            description: FALLBACK_DESCRIPTION.to_string(),
        },
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| ReadmeIndexerError::io(dir, e))?;
    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| ReadmeIndexerError::io(dir, e))?;
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
