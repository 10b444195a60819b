use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::NewsItemId;

/// How long a copied flag stays set.
pub const COPIED_FLAG_WINDOW: Duration = Duration::from_secs(2);
/// How long the global confirmation message stays visible.
pub const MESSAGE_WINDOW: Duration = Duration::from_secs(3);

pub const CODE_COPIED_MESSAGE: &str = "Code copied ✅";
pub const LINK_SHARED_MESSAGE: &str = "Link shared! 📋";
pub const HISTORY_LOADED_MESSAGE: &str = "Task loaded from history 📋";
pub const HISTORY_CLEARED_MESSAGE: &str = "Task history cleared 🗑️";

/// What a copy action applied to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CopyScope {
    /// The open whole-article view.
    Article,
    Item(NewsItemId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TransientMessage {
    text: String,
    expires_at: Instant,
}

/// Self-expiring copy feedback. Readers pass the current instant; nothing
/// has to be cleared by hand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClipboardNotifier {
    copied: BTreeMap<CopyScope, Instant>,
    message: Option<TransientMessage>,
}

impl ClipboardNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_copied(&mut self, scope: CopyScope, now: Instant) {
        self.copied.insert(scope, now + COPIED_FLAG_WINDOW);
    }

    pub fn is_copied(&self, scope: &CopyScope, now: Instant) -> bool {
        self.copied
            .get(scope)
            .is_some_and(|expires_at| now < *expires_at)
    }

    /// Drops a flag early, e.g. when the item is collapsed or the article closes.
    pub fn reset(&mut self, scope: &CopyScope) {
        self.copied.remove(scope);
    }

    /// Replaces any visible message and restarts its window.
    pub fn show_message(&mut self, text: impl Into<String>, now: Instant) {
        self.message = Some(TransientMessage {
            text: text.into(),
            expires_at: now + MESSAGE_WINDOW,
        });
    }

    pub fn message(&self, now: Instant) -> Option<&str> {
        self.message
            .as_ref()
            .filter(|message| now < message.expires_at)
            .map(|message| message.text.as_str())
    }

    /// Item ids whose copied flag is currently set.
    pub fn copied_items(&self, now: Instant) -> Vec<NewsItemId> {
        self.copied
            .iter()
            .filter(|(_, expires_at)| now < **expires_at)
            .filter_map(|(scope, _)| match scope {
                CopyScope::Item(id) => Some(id.clone()),
                CopyScope::Article => None,
            })
            .collect()
    }

    pub fn clear_flags(&mut self) {
        self.copied.clear();
    }

    /// Forgets expired entries. Returns `true` if anything was dropped.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.copied.len();
        self.copied.retain(|_, expires_at| now < *expires_at);
        let mut changed = self.copied.len() != before;
        if self
            .message
            .as_ref()
            .is_some_and(|message| now >= message.expires_at)
        {
            self.message = None;
            changed = true;
        }
        changed
    }
}
