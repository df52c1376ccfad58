//! Metadata extraction from Markdown notes and articles.
//!
//! Everything here works on text already read from disk; callers own the I/O.
//! Patterns are compiled once and shared.

mod date;

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use tracing::{debug, warn};

use readme_indexer_shared::ArticleMeta;

pub use date::{DATE_FORMATS, parse_published_date, parse_published_datetime};

/// Title used when an article has no `# ` heading.
pub const UNTITLED: &str = "Untitled";

/// Descriptions longer than this many characters are truncated.
pub const DESCRIPTION_MAX_CHARS: usize = 100;

const ELLIPSIS: &str = "...";

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

/// Derive a note's display title from its first line.
///
/// A heading (`#`, `##`, ...) loses its marker characters; an empty result,
/// or an empty first line, falls back to `stem`.
pub fn note_title(first_line: &str, stem: &str) -> String {
    let line = first_line.trim();

    let title = if line.starts_with('#') {
        line.trim_start_matches('#').trim()
    } else {
        line
    };

    if title.is_empty() {
        stem.to_string()
    } else {
        title.to_string()
    }
}

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

/// Extract title, publication date, and description from an article body.
///
/// `source` names the file in warnings. `now` is used when the date is
/// missing or unparseable.
pub fn extract_article_meta(content: &str, source: &str, now: NaiveDateTime) -> ArticleMeta {
    static TITLE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").expect("valid regex"));
    static PUBLISHED_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\*Published: ([^*]+)\*").expect("valid regex"));

    let content = content.replace("\r\n", "\n");

    let title = TITLE_RE
        .captures(&content)
        .map(|caps| caps[1].trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    let date = match PUBLISHED_RE.captures(&content) {
        Some(caps) => {
            let raw = &caps[1];
            match parse_published_datetime(raw) {
                Some(date) => date,
                None => {
                    warn!(
                        file = source,
                        value = raw.trim(),
                        "unparseable publication date, using current date"
                    );
                    now
                }
            }
        }
        None => {
            debug!(file = source, "no publication marker, using current date");
            now
        }
    };

    let description = extract_description(&content)
        .map(|d| truncate_description(&d))
        .unwrap_or_default();

    ArticleMeta {
        title,
        date,
        description,
    }
}

/// First paragraph following the first `## ` heading, newlines folded to spaces.
fn extract_description(content: &str) -> Option<String> {
    static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?ms)^## .*?\n\n(.+?)(?:\n\n|\z)").expect("valid regex")
    });

    DESCRIPTION_RE
        .captures(content)
        .map(|caps| caps[1].replace('\n', " ").trim().to_string())
}

/// Cap a description at [`DESCRIPTION_MAX_CHARS`] characters.
///
/// Longer text keeps its first 97 characters followed by `...`.
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_MAX_CHARS {
        return text.to_string();
    }

    let keep = DESCRIPTION_MAX_CHARS - ELLIPSIS.len();
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 6, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("valid timestamp")
    }

    const ARTICLE: &str = "# Visual SLAM in Practice\n\n\
*Published: January 15, 2024*\n\n\
## Introduction\n\n\
Simultaneous localization and mapping\nlets a robot build a map.\n\n\
More text here.\n";

    #[test]
    fn note_title_strips_heading_markers() {
        assert_eq!(note_title("# Alpha", "2024-01-02-a"), "Alpha");
        assert_eq!(note_title("###   Deep heading  ", "x"), "Deep heading");
        assert_eq!(note_title("#", "2024-01-02-a"), "2024-01-02-a");
    }

    #[test]
    fn note_title_uses_plain_first_line() {
        assert_eq!(note_title("  hello  ", "b"), "hello");
        assert_eq!(note_title("", "2024-01-01-b"), "2024-01-01-b");
        assert_eq!(note_title("   ", "stem"), "stem");
    }

    #[test]
    fn extracts_full_article_metadata() {
        let meta = extract_article_meta(ARTICLE, "slam.md", fixed_now());
        assert_eq!(meta.title, "Visual SLAM in Practice");
        assert_eq!(meta.date_str(), "2024-01-15");
        assert_eq!(
            meta.description,
            "Simultaneous localization and mapping lets a robot build a map."
        );
    }

    #[test]
    fn missing_fields_fall_back() {
        let meta = extract_article_meta("just some text\n", "bare.md", fixed_now());
        assert_eq!(meta.title, UNTITLED);
        assert_eq!(meta.date, fixed_now());
        assert_eq!(meta.description, "");
    }

    #[test]
    fn invalid_date_uses_now() {
        let content = "# Bad Date\n\n*Published: 2024-13-45*\n";
        let meta = extract_article_meta(content, "bad.md", fixed_now());
        assert_eq!(meta.date, fixed_now());
        assert_eq!(meta.title, "Bad Date");
    }

    /// Run `f` with a subscriber that writes plain-text logs into a buffer.
    fn capture_logs(f: impl FnOnce()) -> String {
        use std::sync::{Arc, Mutex};

        #[derive(Clone)]
        struct Buffer(Arc<Mutex<Vec<u8>>>);

        impl std::io::Write for Buffer {
            fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
                self.0.lock().expect("log buffer").extend_from_slice(data);
                Ok(data.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let buffer = Buffer(Arc::new(Mutex::new(Vec::new())));
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().expect("log buffer").clone();
        String::from_utf8(bytes).expect("utf-8 logs")
    }

    #[test]
    fn invalid_date_warning_names_file_and_value() {
        let content = "# Bad Date\n\n*Published: 2024-13-45*\n";
        let logs = capture_logs(|| {
            extract_article_meta(content, "articles/robotics/bad.md", fixed_now());
        });
        assert!(logs.contains("WARN"), "logs: {logs}");
        assert!(logs.contains("articles/robotics/bad.md"), "logs: {logs}");
        assert!(logs.contains("2024-13-45"), "logs: {logs}");
    }

    #[test]
    fn crlf_content_is_normalized() {
        let content = ARTICLE.replace('\n', "\r\n");
        let meta = extract_article_meta(&content, "slam.md", fixed_now());
        assert_eq!(meta.title, "Visual SLAM in Practice");
        assert!(meta.description.starts_with("Simultaneous localization"));
    }

    #[test]
    fn description_is_last_paragraph_at_end_of_file() {
        let content = "# T\n\n## Overview\n\nOnly paragraph";
        let meta = extract_article_meta(content, "t.md", fixed_now());
        assert_eq!(meta.description, "Only paragraph");
    }

    #[test]
    fn truncation_keeps_short_text() {
        let exact = "a".repeat(DESCRIPTION_MAX_CHARS);
        assert_eq!(truncate_description(&exact), exact);
    }

    #[test]
    fn truncation_adds_ellipsis() {
        let long = "b".repeat(150);
        let out = truncate_description(&long);
        assert_eq!(out.chars().count(), DESCRIPTION_MAX_CHARS);
        assert!(out.ends_with("..."));
        assert!(out.starts_with(&"b".repeat(97)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "é".repeat(120);
        let out = truncate_description(&long);
        assert_eq!(out.chars().count(), DESCRIPTION_MAX_CHARS);
    }
}
