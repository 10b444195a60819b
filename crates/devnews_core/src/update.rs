use crate::{
    AppState, CopyScope, Effect, Msg, CODE_COPIED_MESSAGE, HISTORY_CLEARED_MESSAGE,
    HISTORY_LOADED_MESSAGE, LINK_SHARED_MESSAGE,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TopicChanged(topic) => {
            state.set_topic(topic);
            Vec::new()
        }
        Msg::GenerateRequested { topic } => {
            // Blank topics and a second concurrent request are silent no-ops.
            let topic = topic.trim();
            if topic.is_empty() || state.request().is_in_flight() {
                return (state, Vec::new());
            }
            state.begin_request(topic);
            vec![Effect::Generate {
                topic: topic.to_string(),
            }]
        }
        Msg::GenerationFinished { topic, result } => {
            if !state.request().is_in_flight() {
                return (state, Vec::new());
            }
            match result {
                Ok(items) => {
                    state.complete_request(items.clone());
                    vec![Effect::RecordHistory { topic, items }]
                }
                Err(info) => {
                    state.fail_request(info);
                    Vec::new()
                }
            }
        }
        Msg::Diagnostic(line) => {
            state.push_diagnostic(line);
            Vec::new()
        }
        Msg::ProbeRequested => {
            state.push_diagnostic("Testing connection...");
            vec![Effect::Probe]
        }
        Msg::ProbeFinished(result) => {
            state.push_diagnostic(result.describe());
            Vec::new()
        }
        Msg::SearchChanged(text) => {
            state.filter_mut().search_text = text;
            Vec::new()
        }
        Msg::CategoryToggled(category) => {
            state.filter_mut().toggle_category(&category);
            Vec::new()
        }
        Msg::CategoryRemoved(category) => {
            state.filter_mut().remove_category(&category);
            Vec::new()
        }
        Msg::CategoriesCleared => {
            state.filter_mut().clear_categories();
            Vec::new()
        }
        Msg::ItemExpansionToggled(id) => {
            state.toggle_expanded(id);
            Vec::new()
        }
        Msg::ArticleOpened(id) => {
            if state.item(&id).is_none() {
                return (state, Vec::new());
            }
            state.set_open_article(Some(id));
            Vec::new()
        }
        Msg::ArticleClosed => {
            state.set_open_article(None);
            Vec::new()
        }
        Msg::CopyCodeClicked { scope, now } => {
            let code = match &scope {
                CopyScope::Article => state.open_article_item(),
                CopyScope::Item(id) => state.item(id),
            }
            .map(|item| item.code.clone());
            let Some(code) = code else {
                return (state, Vec::new());
            };
            let notifier = state.notifier_mut();
            notifier.mark_copied(scope, now);
            notifier.show_message(CODE_COPIED_MESSAGE, now);
            vec![Effect::WriteClipboard { text: code }]
        }
        Msg::ShareClicked { item_id, now } => {
            let Some(text) = state.item(&item_id).map(|item| item.share_text().to_string())
            else {
                return (state, Vec::new());
            };
            state.notifier_mut().show_message(LINK_SHARED_MESSAGE, now);
            vec![Effect::WriteClipboard { text }]
        }
        Msg::HistoryEntryLoaded { topic, now } => {
            state.set_topic(topic);
            state.notifier_mut().show_message(HISTORY_LOADED_MESSAGE, now);
            Vec::new()
        }
        Msg::HistoryEntryRemoved(id) => {
            state.mark_dirty();
            vec![Effect::RemoveHistory { id }]
        }
        Msg::HistoryClearClicked => {
            state.mark_dirty();
            vec![Effect::ClearHistory]
        }
        Msg::HistoryCleared { now } => {
            state.notifier_mut().show_message(HISTORY_CLEARED_MESSAGE, now);
            Vec::new()
        }
        Msg::ErrorDismissed => {
            state.dismiss_error();
            Vec::new()
        }
        Msg::DiagnosticsCleared => {
            state.clear_diagnostics();
            Vec::new()
        }
        Msg::Tick { now } => {
            state.expire_feedback(now);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
