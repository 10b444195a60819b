use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::NewsItem;

/// Maximum number of entries kept in the task history.
pub const HISTORY_LIMIT: usize = 20;
/// Number of leading items snapshotted into each entry.
pub const PREVIEW_LIMIT: usize = 3;

/// Creation-time derived identifier; larger means more recent.
pub type TaskId = u64;
/// Largest id a stored entry may carry: any millisecond timestamp fits below it.
pub const MAX_TASK_ID: TaskId = i64::MAX as TaskId;

/// Durable record of one completed generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHistoryEntry {
    pub id: TaskId,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub result_count: usize,
    pub preview_items: Vec<NewsItem>,
}

impl TaskHistoryEntry {
    /// Builds an entry whose id is derived from `created_at`, bumped past
    /// `newest` so ids stay strictly increasing even within one millisecond.
    pub fn new(
        topic: impl Into<String>,
        items: &[NewsItem],
        created_at: DateTime<Utc>,
        newest: Option<TaskId>,
    ) -> Self {
        let millis = u64::try_from(created_at.timestamp_millis()).unwrap_or(0);
        let id = match newest {
            Some(prev) if prev >= millis => prev.saturating_add(1),
            _ => millis,
        };
        Self {
            id,
            topic: topic.into(),
            created_at,
            result_count: items.len(),
            preview_items: items.iter().take(PREVIEW_LIMIT).cloned().collect(),
        }
    }
}

/// Entries ordered newest first, never longer than [`HISTORY_LIMIT`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskHistory {
    entries: Vec<TaskHistoryEntry>,
}

impl TaskHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a history from stored entries, keeping the newest ones.
    pub fn from_entries(mut entries: Vec<TaskHistoryEntry>) -> Self {
        entries.sort_by(|a, b| b.id.cmp(&a.id));
        entries.truncate(HISTORY_LIMIT);
        Self { entries }
    }

    pub fn entries(&self) -> &[TaskHistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn newest(&self) -> Option<&TaskHistoryEntry> {
        self.entries.first()
    }

    pub fn get(&self, id: TaskId) -> Option<&TaskHistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Prepends an entry and drops the oldest past the limit.
    pub fn push_front(&mut self, entry: TaskHistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// Returns `true` when an entry was removed.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Short relative age used by history rows.
pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - created_at).num_minutes();
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else if minutes < 10080 {
        format!("{}d ago", minutes / 1440)
    } else {
        created_at.format("%Y-%m-%d").to_string()
    }
}
