use std::collections::BTreeSet;
use std::time::Instant;

use crate::filter::apply_filter;
use crate::view_model::AppViewModel;
use crate::{
    ClipboardNotifier, CopyScope, DiagnosticLog, ErrorInfo, FilterState, NewsItem, NewsItemId,
    RequestState, ResultSet,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    topic_input: String,
    request: RequestState,
    filter: FilterState,
    notifier: ClipboardNotifier,
    diagnostics: DiagnosticLog,
    error_banner: Option<String>,
    expanded: BTreeSet<NewsItemId>,
    open_article: Option<NewsItemId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self, now: Instant) -> AppViewModel {
        let results = self.request.results();
        let items = apply_filter(results, &self.filter);
        AppViewModel {
            status: self.request.status(),
            topic: self.topic_input.clone(),
            no_matches: items.is_empty() && !results.is_empty(),
            items,
            total_items: results.len(),
            search_text: self.filter.search_text.clone(),
            selected_categories: self.filter.selected_categories.iter().cloned().collect(),
            error: self.error_banner.clone(),
            message: self.notifier.message(now).map(str::to_string),
            copied_items: self.notifier.copied_items(now),
            article_copied: self.notifier.is_copied(&CopyScope::Article, now),
            expanded: self.expanded.iter().cloned().collect(),
            open_article: self.open_article_item().cloned(),
            diagnostics: self.diagnostics.lines().to_vec(),
            dirty: self.dirty,
        }
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn notifier(&self) -> &ClipboardNotifier {
        &self.notifier
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    pub fn topic(&self) -> &str {
        &self.topic_input
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    pub fn item(&self, id: &NewsItemId) -> Option<&NewsItem> {
        self.request.results().iter().find(|item| &item.id == id)
    }

    pub fn open_article_item(&self) -> Option<&NewsItem> {
        self.open_article.as_ref().and_then(|id| self.item(id))
    }

    pub fn is_expanded(&self, id: &NewsItemId) -> bool {
        self.expanded.contains(id)
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_topic(&mut self, topic: String) {
        self.topic_input = topic;
        self.mark_dirty();
    }

    /// Moves to `InFlight`, dropping the previous result set and any error.
    pub(crate) fn begin_request(&mut self, topic: &str) {
        self.request = RequestState::InFlight;
        self.error_banner = None;
        self.expanded.clear();
        self.open_article = None;
        self.notifier.clear_flags();
        self.diagnostics
            .push(format!("Generating news for \"{topic}\""));
        self.mark_dirty();
    }

    pub(crate) fn complete_request(&mut self, items: ResultSet) {
        self.diagnostics
            .push(format!("Successfully loaded {} news items", items.len()));
        self.request = RequestState::Succeeded(items);
        self.mark_dirty();
    }

    pub(crate) fn fail_request(&mut self, info: ErrorInfo) {
        self.diagnostics.push(format!("Error details: {info}"));
        self.error_banner = Some(format!("Error: {info}"));
        self.request = RequestState::Failed(info);
        self.mark_dirty();
    }

    pub(crate) fn push_diagnostic(&mut self, line: impl Into<String>) {
        self.diagnostics.push(line);
        self.mark_dirty();
    }

    pub(crate) fn clear_diagnostics(&mut self) {
        if !self.diagnostics.is_empty() {
            self.diagnostics.clear();
            self.mark_dirty();
        }
    }

    pub(crate) fn dismiss_error(&mut self) {
        if self.error_banner.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn filter_mut(&mut self) -> &mut FilterState {
        self.mark_dirty();
        &mut self.filter
    }

    pub(crate) fn notifier_mut(&mut self) -> &mut ClipboardNotifier {
        self.mark_dirty();
        &mut self.notifier
    }

    pub(crate) fn toggle_expanded(&mut self, id: NewsItemId) {
        self.notifier.reset(&CopyScope::Item(id.clone()));
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
        self.mark_dirty();
    }

    pub(crate) fn set_open_article(&mut self, id: Option<NewsItemId>) {
        self.notifier.reset(&CopyScope::Article);
        self.open_article = id;
        self.mark_dirty();
    }

    /// Expires transient feedback; marks dirty only when something changed.
    pub(crate) fn expire_feedback(&mut self, now: Instant) {
        if self.notifier.prune(now) {
            self.mark_dirty();
        }
    }
}
