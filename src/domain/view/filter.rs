use crate::domain::news::{Article, CategoryKey};
use serde::{Serialize, Serializer};
use std::fmt;

pub const ALL_CATEGORIES: &str = "All";

/// Category predicate of the view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelector {
    #[default]
    All,
    /// Canonical category label, matched exactly.
    Label(String),
}

impl CategorySelector {
    /// `"All"` selects everything, a category key resolves to its label, and
    /// anything else is kept as a label verbatim.
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            return CategorySelector::All;
        }
        match value.parse::<CategoryKey>() {
            Ok(key) => CategorySelector::Label(key.label().to_string()),
            Err(_) => CategorySelector::Label(value.to_string()),
        }
    }

    pub fn matches(&self, category: CategoryKey) -> bool {
        match self {
            Self::All => true,
            Self::Label(label) => category.label() == label,
        }
    }
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl Serialize for CategorySelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn matches_search(article: &Article, needle: &str) -> bool {
    article
        .title
        .as_deref()
        .map(|title| title.to_lowercase().contains(needle))
        .unwrap_or(false)
}

/// Articles passing both the category and the title-search predicate, in
/// their original order. Search text is trimmed and matched case-insensitively;
/// an empty search matches everything.
pub fn filter_articles(
    articles: &[Article],
    selector: &CategorySelector,
    search_text: &str,
) -> Vec<Article> {
    let needle = search_text.trim().to_lowercase();

    articles
        .iter()
        .filter(|article| selector.matches(article.source_category))
        .filter(|article| needle.is_empty() || matches_search(article, &needle))
        .cloned()
        .collect()
}
