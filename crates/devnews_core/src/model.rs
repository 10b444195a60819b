use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Categories offered by the category picker. Items may carry others.
pub const CATEGORIES: [&str; 7] = [
    "AI Models",
    "Research",
    "Tools",
    "Ethics",
    "Performance",
    "Security",
    "Frameworks",
];

/// Identifier of a news item, unique only within the result set that produced it.
///
/// The service sends either a string (uuid) or an integer; both normalize to text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NewsItemId(String);

impl NewsItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NewsItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for NewsItemId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for NewsItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NewsItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Unsigned(value) => Self(value.to_string()),
            RawId::Signed(value) => Self(value.to_string()),
        })
    }
}

/// One generated news summary. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: NewsItemId,
    pub title: String,
    pub summary: String,
    pub category: String,
    #[serde(default)]
    pub insight: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default)]
    pub full_content: String,
}

impl NewsItem {
    /// Text placed on the clipboard when the item is shared.
    pub fn share_text(&self) -> &str {
        self.source_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(&self.title)
    }
}

/// Ordered items produced by one successful generation call.
pub type ResultSet = Vec<NewsItem>;

#[cfg(test)]
mod tests {
    use super::{NewsItem, NewsItemId};

    #[test]
    fn numeric_and_text_ids_normalize_to_text() {
        let numeric: NewsItemId = serde_json::from_str("7").unwrap();
        let text: NewsItemId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(numeric, text);
        assert_eq!(numeric.as_str(), "7");
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let item: NewsItem = serde_json::from_str(
            r#"{"id":1,"title":"A","summary":"foo","category":"Tools","insight":"x","code":"fn main(){}"}"#,
        )
        .unwrap();
        assert_eq!(item.id, NewsItemId::from(1));
        assert_eq!(item.source_url, None);
        assert!(item.full_content.is_empty());
    }

    #[test]
    fn camel_case_fields_are_read() {
        let item: NewsItem = serde_json::from_str(
            r#"{"id":"abc","title":"T","summary":"S","category":"Research","sourceUrl":"https://x.dev","fullContent":"body"}"#,
        )
        .unwrap();
        assert_eq!(item.source_url.as_deref(), Some("https://x.dev"));
        assert_eq!(item.full_content, "body");
        assert_eq!(item.share_text(), "https://x.dev");
    }

    #[test]
    fn share_text_falls_back_to_title() {
        let item: NewsItem = serde_json::from_str(
            r#"{"id":"abc","title":"Title","summary":"S","category":"Research","sourceUrl":" "}"#,
        )
        .unwrap();
        assert_eq!(item.share_text(), "Title");
    }
}
