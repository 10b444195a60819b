use chrono::{DateTime, Utc};

use crate::{format_age, NewsItem, NewsItemId, RequestStatus, TaskHistoryEntry, TaskId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status: RequestStatus,
    pub topic: String,
    /// Current result set after search and category filtering.
    pub items: Vec<NewsItem>,
    pub total_items: usize,
    /// Results exist but the filter hides all of them.
    pub no_matches: bool,
    pub search_text: String,
    pub selected_categories: Vec<String>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub copied_items: Vec<NewsItemId>,
    pub article_copied: bool,
    pub expanded: Vec<NewsItemId>,
    pub open_article: Option<NewsItem>,
    pub diagnostics: Vec<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn is_generating(&self) -> bool {
        self.status == RequestStatus::InFlight
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub id: TaskId,
    pub topic: String,
    pub age: String,
    pub result_count: usize,
    /// Title and category of each preview item.
    pub preview: Vec<(String, String)>,
}

impl HistoryRowView {
    pub fn from_entry(entry: &TaskHistoryEntry, now: DateTime<Utc>) -> Self {
        Self {
            id: entry.id,
            topic: entry.topic.clone(),
            age: format_age(entry.created_at, now),
            result_count: entry.result_count,
            preview: entry
                .preview_items
                .iter()
                .map(|item| (item.title.clone(), item.category.clone()))
                .collect(),
        }
    }
}
