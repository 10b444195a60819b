use devnews_core::{apply_filter, FilterState, NewsItem, NewsItemId, CATEGORIES};
use pretty_assertions::assert_eq;

fn item(id: &str, title: &str, summary: &str, category: &str) -> NewsItem {
    NewsItem {
        id: NewsItemId::new(id),
        title: title.to_string(),
        summary: summary.to_string(),
        category: category.to_string(),
        insight: String::new(),
        code: String::new(),
        source_url: None,
        full_content: String::new(),
    }
}

fn sample() -> Vec<NewsItem> {
    vec![
        item("a", "Rust 1.80 released", "foo bar", "Tools"),
        item("b", "New model", "baz", "AI Models"),
        item("c", "Side channels", "Foo in the wild", "Security"),
        item("d", "Quantum stuff", "not in the picker", "Quantum"),
    ]
}

#[test]
fn empty_filter_is_identity() {
    let items = sample();
    assert_eq!(apply_filter(&items, &FilterState::default()), items);
}

#[test]
fn applying_twice_is_stable() {
    let items = sample();
    let mut filter = FilterState::new();
    filter.search_text = "foo".to_string();
    filter.toggle_category("Tools");

    let once = apply_filter(&items, &filter);
    let twice = apply_filter(&once, &filter);
    assert_eq!(once, twice);
    assert_eq!(apply_filter(&items, &filter), once);
}

#[test]
fn search_keeps_only_matching_summary() {
    let items = vec![item("1", "x", "foo bar", "Tools"), item("2", "y", "baz", "Tools")];
    let filter = FilterState {
        search_text: "foo".to_string(),
        ..FilterState::default()
    };
    let filtered = apply_filter(&items, &filter);
    assert_eq!(filtered, vec![items[0].clone()]);
}

#[test]
fn categories_combine_with_search_and_preserve_order() {
    let items = sample();
    let mut filter = FilterState {
        search_text: "FOO".to_string(),
        ..FilterState::default()
    };
    filter.toggle_category("Security");
    filter.toggle_category("Tools");

    let ids: Vec<_> = apply_filter(&items, &filter)
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, vec![NewsItemId::new("a"), NewsItemId::new("c")]);
}

#[test]
fn categories_outside_the_picker_pass_through() {
    let items = sample();
    assert!(!CATEGORIES.contains(&"Quantum"));

    let mut filter = FilterState::new();
    filter.toggle_category("Quantum");
    let filtered = apply_filter(&items, &filter);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].category, "Quantum");
}

#[test]
fn category_toggle_is_its_own_inverse() {
    for start in [Vec::new(), vec!["Tools"], vec!["Tools", "Ethics"]] {
        let mut filter = FilterState::new();
        for category in &start {
            filter.toggle_category(category);
        }
        let before = filter.selected_categories.clone();
        for category in CATEGORIES {
            filter.toggle_category(category);
            filter.toggle_category(category);
            assert_eq!(filter.selected_categories, before);
        }
    }
}
