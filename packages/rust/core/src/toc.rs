//! Article table-of-contents builder.
//!
//! Scans the category directories, renders one Markdown table per category
//! (newest article first), and splices the tables into the README.
//!
//! Run order: scan → extract → group/sort → render → splice → write. A
//! missing articles root aborts before the README is touched; anything that
//! goes wrong with a single article only degrades that article's row.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use readme_indexer_shared::{Article, Category, ReadmeIndexerError, Result, TocConfig};

use crate::articles::scan_articles;
use crate::readme::{SpliceOutcome, TABLE_HEADER, TABLE_SEPARATOR, splice_category};

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Result of a TOC run.
#[derive(Debug, Serialize)]
pub struct TocReport {
    /// Articles listed across all categories.
    pub article_count: usize,
    /// Files listed with default metadata.
    pub degraded: Vec<PathBuf>,
    /// One entry per non-empty category, in rendering order.
    pub sections: Vec<SectionReport>,
    /// README that was rewritten.
    pub readme_path: PathBuf,
}

/// How a single category table ended up in the README.
#[derive(Debug, Serialize)]
pub struct SectionReport {
    pub category: Category,
    pub articles: usize,
    pub outcome: SpliceOutcome,
}

// ---------------------------------------------------------------------------
// Grouping & rendering
// ---------------------------------------------------------------------------

/// Sort articles most recent first. Equal dates keep their relative order.
pub fn sort_articles(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.meta.date.cmp(&a.meta.date));
}

/// Group articles by category, each group sorted most recent first.
pub fn group_by_category(articles: &[Article]) -> BTreeMap<Category, Vec<&Article>> {
    let mut groups: BTreeMap<Category, Vec<&Article>> = BTreeMap::new();
    for article in articles {
        groups.entry(article.category).or_default().push(article);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| b.meta.date.cmp(&a.meta.date));
    }
    groups
}

/// Render the heading and table for one category.
///
/// ```text
/// ### 🤖 Robotics
/// | Date | Title | Description |
/// |------|-------|-------------|
/// | 2024-01-15 | [Visual SLAM](articles/robotics/slam.md) | ... |
/// ```
pub fn render_category_table(category: Category, articles: &[&Article]) -> String {
    let mut table = format!("{}\n{TABLE_HEADER}\n{TABLE_SEPARATOR}\n", category.heading());
    for article in articles {
        table.push_str(&format!(
            "| {} | [{}]({}) | {} |\n",
            article.meta.date_str(),
            article.meta.title,
            article.path,
            article.meta.description
        ));
    }
    table
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Rebuild every category table in the README.
#[instrument(skip_all, fields(articles_dir = %config.articles_dir.display()))]
pub fn update_toc(config: &TocConfig) -> Result<TocReport> {
    update_toc_at(config, Local::now().naive_local())
}

/// Same as [`update_toc`] with an explicit "now" for undated articles.
pub fn update_toc_at(config: &TocConfig, now: NaiveDateTime) -> Result<TocReport> {
    let scan = match scan_articles(config, now) {
        Ok(scan) => scan,
        Err(err) => {
            error!(error = %err, "cannot build table of contents");
            return Err(err);
        }
    };

    let mut articles = scan.articles;
    sort_articles(&mut articles);
    let groups = group_by_category(&articles);

    let mut content = std::fs::read_to_string(&config.readme_path)
        .map_err(|e| {
            error!(readme = %config.readme_path.display(), error = %e, "failed to read README");
            ReadmeIndexerError::io(&config.readme_path, e)
        })?
        .replace("\r\n", "\n");

    let mut sections = Vec::with_capacity(groups.len());
    for (category, group) in &groups {
        let table = render_category_table(*category, group);
        let (updated, outcome) =
            splice_category(&content, *category, &table, &config.anchor_heading);
        if outcome == SpliceOutcome::Skipped {
            warn!(
                %category,
                anchor = %config.anchor_heading,
                "no existing section or anchor heading, category not written"
            );
        }
        content = updated;
        sections.push(SectionReport {
            category: *category,
            articles: group.len(),
            outcome,
        });
    }

    std::fs::write(&config.readme_path, content).map_err(|e| {
        error!(readme = %config.readme_path.display(), error = %e, "failed to write README");
        ReadmeIndexerError::io(&config.readme_path, e)
    })?;

    info!(
        articles = articles.len(),
        degraded = scan.degraded.len(),
        "README table of contents updated"
    );

    Ok(TocReport {
        article_count: articles.len(),
        degraded: scan.degraded,
        sections,
        readme_path: config.readme_path.clone(),
    })
}
