//! Locating and rewriting the generated regions of a README.
//!
//! Two kinds of region are handled:
//! - the notes block between [`NOTES_START_TAG`] and [`NOTES_END_TAG`]
//! - per-category tables introduced by `### <emoji> <title>` and the table header
//!
//! Category sections are found by their exact heading + header text. A
//! heading whose emoji or title drifted from the category table is not
//! recognised and the section is treated as absent.

use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use readme_indexer_shared::{
    Category, NOTES_END_TAG, NOTES_START_TAG, ReadmeIndexerError, Result,
};

/// First line of every category table.
pub const TABLE_HEADER: &str = "| Date | Title | Description |";

/// Separator row under [`TABLE_HEADER`].
pub const TABLE_SEPARATOR: &str = "|------|-------|-------------|";

const DETAILS_CLOSE: &str = "</details>";

// ---------------------------------------------------------------------------
// Notes block
// ---------------------------------------------------------------------------

/// Replace everything between the notes tags with `block`.
///
/// The tags are kept and the block is padded by one blank line on each side,
/// so applying the same block twice yields identical text. `readme` is only
/// used for error reporting.
pub fn replace_notes_block(content: &str, block: &str, readme: &Path) -> Result<String> {
    let Some(start) = content.find(NOTES_START_TAG) else {
        return Err(ReadmeIndexerError::missing_marker(NOTES_START_TAG, readme));
    };
    let inner_start = start + NOTES_START_TAG.len();

    let Some(end_offset) = content[inner_start..].find(NOTES_END_TAG) else {
        if content[..start].contains(NOTES_END_TAG) {
            return Err(ReadmeIndexerError::validation(format!(
                "{NOTES_END_TAG} appears before {NOTES_START_TAG} in {}",
                readme.display()
            )));
        }
        return Err(ReadmeIndexerError::missing_marker(NOTES_END_TAG, readme));
    };
    let inner_end = inner_start + end_offset;

    let mut out = String::with_capacity(content.len() + block.len());
    out.push_str(&content[..inner_start]);
    out.push_str("\n\n");
    out.push_str(block);
    out.push_str("\n\n");
    out.push_str(&content[inner_end..]);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Category sections
// ---------------------------------------------------------------------------

/// What happened to one category while splicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "count")]
pub enum SpliceOutcome {
    /// Existing sections were overwritten (number of sections).
    Replaced(usize),
    /// A new collapsible section was inserted under the anchor heading.
    Inserted,
    /// Neither a section nor the anchor heading was found.
    Skipped,
}

/// Byte ranges of every existing section for `category`.
///
/// A section runs from its heading to the next `###`, the closing
/// `</details>` of a collapsible wrapper, or the end of the document. A
/// single newline at the very end of the document is left outside.
pub fn find_category_sections(content: &str, category: Category) -> Vec<Range<usize>> {
    let needle = format!("{}\n{TABLE_HEADER}", category.heading());
    let mut ranges = Vec::new();
    let mut from = 0;

    while let Some(offset) = content[from..].find(&needle) {
        let start = from + offset;
        let body = start + needle.len();
        let end = section_end(content, body);
        ranges.push(start..end);
        from = end.max(body);
    }

    ranges
}

fn section_end(content: &str, from: usize) -> usize {
    let rest = &content[from..];
    let next = [rest.find("###"), rest.find(DETAILS_CLOSE)]
        .into_iter()
        .flatten()
        .min();

    match next {
        Some(offset) => from + offset,
        None if content.ends_with('\n') => content.len() - 1,
        None => content.len(),
    }
}

/// Put a rendered category `table` into `content`.
///
/// Existing sections are replaced wholesale. Otherwise the table is wrapped
/// in a `<details>` block right after the first level 1 or 2 heading that
/// mentions `anchor`. Without either, `content` is returned unchanged.
pub fn splice_category(
    content: &str,
    category: Category,
    table: &str,
    anchor: &str,
) -> (String, SpliceOutcome) {
    let ranges = find_category_sections(content, category);

    if !ranges.is_empty() {
        let replacement = format!("{table}\n");
        let mut out = content.to_string();
        for range in ranges.iter().rev() {
            out.replace_range(range.clone(), &replacement);
        }
        debug!(%category, sections = ranges.len(), "replaced category section");
        return (out, SpliceOutcome::Replaced(ranges.len()));
    }

    let Some(at) = anchor_insert_point(content, anchor) else {
        debug!(%category, anchor, "no section and no anchor heading");
        return (content.to_string(), SpliceOutcome::Skipped);
    };

    let mut section = format!(
        "\n<details>\n<summary>{} {}</summary>\n\n{table}\n{DETAILS_CLOSE}\n",
        category.emoji(),
        category.title()
    );
    let at = if content[at..].starts_with('\n') {
        at + 1
    } else {
        section.insert(0, '\n');
        at
    };

    let mut out = content.to_string();
    out.insert_str(at, &section);
    debug!(%category, "inserted collapsible section");
    (out, SpliceOutcome::Inserted)
}

/// End of the first `#`/`##` heading line containing `anchor`.
fn anchor_insert_point(content: &str, anchor: &str) -> Option<usize> {
    static HEADING_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?m)^#{1,2}[ \t]+([^\n]*)$").expect("valid regex"));

    HEADING_RE
        .captures_iter(content)
        .find(|caps| caps[1].contains(anchor))
        .and_then(|caps| caps.get(0))
        .map(|m| m.end())
}
