use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of one of the fixed news categories.
///
/// Variant order is the declared category order; merged results and status
/// maps iterate in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Apple,
    Tesla,
    Business,
    Techcrunch,
    Wsj,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 5] = [
        CategoryKey::Apple,
        CategoryKey::Tesla,
        CategoryKey::Business,
        CategoryKey::Techcrunch,
        CategoryKey::Wsj,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Tesla => "tesla",
            Self::Business => "business",
            Self::Techcrunch => "techcrunch",
            Self::Wsj => "wsj",
        }
    }

    /// Canonical display label, also the value the view filter matches on.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Apple => "Apple",
            Self::Tesla => "Tesla",
            Self::Business => "Business",
            Self::Techcrunch => "TechCrunch",
            Self::Wsj => "Wall Street Journal",
        }
    }

    /// Endpoint and query string relative to the provider base URL.
    pub fn provider_query(&self) -> &'static str {
        match self {
            Self::Apple => "everything?q=apple&from=2023-01-01&sortBy=popularity",
            Self::Tesla => "everything?q=tesla&from=2023-01-01&sortBy=publishedAt",
            Self::Business => "top-headlines?country=us&category=business",
            Self::Techcrunch => "top-headlines?sources=techcrunch",
            Self::Wsj => "everything?domains=wsj.com",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for CategoryKey {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A topical bucket mapped to one upstream query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub key: CategoryKey,
    pub label: &'static str,
    pub provider_query: &'static str,
}

impl From<CategoryKey> for Category {
    fn from(key: CategoryKey) -> Self {
        Self {
            key,
            label: key.label(),
            provider_query: key.provider_query(),
        }
    }
}

/// An article tagged with the category it was fetched for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub source_name: Option<String>,
    pub source_category: CategoryKey,
}

/// Article as NewsAPI returns it. Every field is optional upstream.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub author: Option<String>,
    pub source: Option<RawSource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl RawArticle {
    pub fn into_article(self, category: CategoryKey) -> Article {
        Article {
            title: self.title,
            description: self.description,
            url: self.url.unwrap_or_default(),
            image_url: self.url_to_image,
            published_at: self
                .published_at
                .as_deref()
                .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                .map(|ts| ts.with_timezone(&Utc)),
            author: self.author,
            source_name: self.source.and_then(|s| s.name),
            source_category: category,
        }
    }
}
