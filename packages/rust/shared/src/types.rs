//! Core domain types for the notes and article indexes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The fixed set of article categories.
///
/// Declaration order is the order category tables are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    MachineLearning,
    ComputerVision,
    Robotics,
    HighPerformanceComputing,
    Programming,
}

/// Static display data for a [`Category`].
#[derive(Debug, Clone, Copy)]
pub struct CategoryInfo {
    /// Directory name under the articles root.
    pub slug: &'static str,
    /// Emoji shown in front of the section heading.
    pub emoji: &'static str,
    /// Human-readable section title.
    pub title: &'static str,
}

static CATEGORY_TABLE: [(Category, CategoryInfo); 5] = [
    (
        Category::MachineLearning,
        CategoryInfo {
            slug: "machine-learning",
            emoji: "🧠",
            title: "Machine Learning",
        },
    ),
    (
        Category::ComputerVision,
        CategoryInfo {
            slug: "computer-vision",
            emoji: "\u{1F441}\u{FE0F}",
            title: "Computer Vision",
        },
    ),
    (
        Category::Robotics,
        CategoryInfo {
            slug: "robotics",
            emoji: "🤖",
            title: "Robotics",
        },
    ),
    (
        Category::HighPerformanceComputing,
        CategoryInfo {
            slug: "high-performance-computing",
            emoji: "⚡",
            title: "High-Performance Computing",
        },
    ),
    (
        Category::Programming,
        CategoryInfo {
            slug: "programming",
            emoji: "💻",
            title: "Programming",
        },
    ),
];

impl Category {
    /// Every category, in rendering order.
    pub const ALL: [Category; 5] = [
        Category::MachineLearning,
        Category::ComputerVision,
        Category::Robotics,
        Category::HighPerformanceComputing,
        Category::Programming,
    ];

    /// Static display data for this category.
    pub fn info(self) -> &'static CategoryInfo {
        // The table is indexed in declaration order.
        &CATEGORY_TABLE[self as usize].1
    }

    pub fn slug(self) -> &'static str {
        self.info().slug
    }

    pub fn emoji(self) -> &'static str {
        self.info().emoji
    }

    pub fn title(self) -> &'static str {
        self.info().title
    }

    /// The `### <emoji> <title>` heading line (without newline).
    pub fn heading(self) -> String {
        format!("### {} {}", self.emoji(), self.title())
    }

    /// Look up a category by its directory name.
    pub fn from_slug(slug: &str) -> Option<Self> {
        CATEGORY_TABLE
            .iter()
            .find(|(_, info)| info.slug == slug)
            .map(|(category, _)| *category)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for Category {
    type Err = crate::ReadmeIndexerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| {
            crate::ReadmeIndexerError::validation(format!("unknown category '{s}'"))
        })
    }
}

// ---------------------------------------------------------------------------
// Note
// ---------------------------------------------------------------------------

/// A single entry of the notes list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Display title derived from the first line.
    pub title: String,
    /// Path relative to the repository root, forward slashes.
    pub path: String,
}

impl Note {
    /// Render as a Markdown bullet: `- [title](path)`.
    pub fn to_bullet(&self) -> String {
        format!("- [{}]({})", self.title, self.path)
    }
}

// ---------------------------------------------------------------------------
// Article
// ---------------------------------------------------------------------------

/// Metadata extracted from an article body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleMeta {
    /// Text of the first `# ` heading.
    pub title: String,
    /// Publication date, or the time of the run when unknown.
    pub date: NaiveDateTime,
    /// First paragraph after the first `## ` heading, truncated.
    pub description: String,
}

impl ArticleMeta {
    /// Date column value (`YYYY-MM-DD`).
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// An article discovered under a category directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub category: Category,
    /// Link target relative to the working root (e.g. `articles/robotics/slam.md`).
    pub path: String,
    pub meta: ArticleMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_table_lookup() {
        for category in Category::ALL {
            assert_eq!(Category::from_slug(category.slug()), Some(category));
        }
        assert_eq!(Category::from_slug("cooking"), None);
        assert_eq!(Category::Robotics.heading(), "### 🤖 Robotics");
        assert_eq!(
            Category::HighPerformanceComputing.title(),
            "High-Performance Computing"
        );
    }

    #[test]
    fn category_from_str_rejects_unknown() {
        let parsed: Category = "programming".parse().expect("known slug");
        assert_eq!(parsed, Category::Programming);
        assert!("Programming".parse::<Category>().is_err());
    }

    #[test]
    fn category_order_follows_declaration() {
        let mut shuffled = vec![Category::Programming, Category::MachineLearning, Category::Robotics];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Category::MachineLearning, Category::Robotics, Category::Programming]
        );
    }

    #[test]
    fn note_bullet_format() {
        let note = Note {
            title: "Alpha".into(),
            path: "notes/2024-01-02-a.md".into(),
        };
        assert_eq!(note.to_bullet(), "- [Alpha](notes/2024-01-02-a.md)");
    }
}
