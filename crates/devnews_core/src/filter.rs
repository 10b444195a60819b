use std::collections::BTreeSet;

use crate::NewsItem;

/// Search text and category selection controlling which items are shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_text: String,
    pub selected_categories: BTreeSet<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the category if absent, removes it if present.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.selected_categories.remove(category) {
            self.selected_categories.insert(category.to_string());
        }
    }

    pub fn remove_category(&mut self, category: &str) -> bool {
        self.selected_categories.remove(category)
    }

    pub fn clear_categories(&mut self) {
        self.selected_categories.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty() && self.selected_categories.is_empty()
    }

    pub fn matches(&self, item: &NewsItem) -> bool {
        self.matches_search(item) && self.matches_category(item)
    }

    fn matches_search(&self, item: &NewsItem) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        item.title.to_lowercase().contains(&needle) || item.summary.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, item: &NewsItem) -> bool {
        self.selected_categories.is_empty() || self.selected_categories.contains(&item.category)
    }
}

/// Items of `items` accepted by `filter`, in their original order.
pub fn apply_filter(items: &[NewsItem], filter: &FilterState) -> Vec<NewsItem> {
    items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{apply_filter, FilterState};
    use crate::{NewsItem, NewsItemId};

    fn item(id: u64, title: &str, summary: &str, category: &str) -> NewsItem {
        NewsItem {
            id: NewsItemId::from(id),
            title: title.into(),
            summary: summary.into(),
            category: category.into(),
            insight: String::new(),
            code: String::new(),
            source_url: None,
            full_content: String::new(),
        }
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_summary() {
        let items = vec![
            item(1, "Rust 2024", "edition notes", "Tools"),
            item(2, "Other", "Mentions RUST too", "Research"),
            item(3, "Unrelated", "nothing", "Tools"),
        ];
        let filter = FilterState {
            search_text: "rust".into(),
            ..FilterState::default()
        };
        let ids: Vec<_> = apply_filter(&items, &filter)
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![NewsItemId::from(1), NewsItemId::from(2)]);
    }

    #[test]
    fn toggling_twice_restores_selection() {
        let mut filter = FilterState::new();
        filter.toggle_category("Tools");
        let before = filter.selected_categories.clone();
        filter.toggle_category("Security");
        filter.toggle_category("Security");
        assert_eq!(filter.selected_categories, before);
    }

    #[test]
    fn remove_only_drops_selected_category() {
        let mut filter = FilterState::new();
        filter.toggle_category("Tools");
        assert!(!filter.remove_category("Ethics"));
        assert!(filter.remove_category("Tools"));
        assert!(filter.is_empty());
    }
}
