use std::collections::VecDeque;
use std::sync::{mpsc, Arc};
use std::time::Instant;

use devnews_core::{
    update, AppState, AppViewModel, ConnectivityResult, CopyScope, Effect, HistoryRowView, Msg,
    NewsItemId, RequestState, TaskHistory, TaskId,
};
use devnews_logging::{devnews_debug, devnews_info, devnews_warn};

use crate::{BufferedTrace, GenerationClient, HistoryStorage, HistoryStore};

/// Source of the instant used for self-expiring feedback.
pub type Clock = Arc<dyn Fn() -> Instant + Send + Sync>;

/// Where copy and share actions put their text.
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str);
}

/// Drops clipboard writes; for hosts without a clipboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullClipboard;

impl ClipboardSink for NullClipboard {
    fn write_text(&self, text: &str) {
        devnews_debug!("Clipboard write dropped ({} bytes)", text.len());
    }
}

/// Forwards clipboard writes to the host's UI thread.
pub struct ChannelClipboard {
    tx: mpsc::Sender<String>,
}

impl ChannelClipboard {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }
}

impl ClipboardSink for ChannelClipboard {
    fn write_text(&self, text: &str) {
        let _ = self.tx.send(text.to_string());
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub app: AppViewModel,
    pub history: Vec<HistoryRowView>,
}

/// Runs the core state machine against the real collaborators: the
/// generation service, the history store and the clipboard.
///
/// All entry points take `&mut self`; a generation call is awaited to
/// completion inside `dispatch`, so at most one is ever outstanding.
pub struct RequestController<C, S> {
    client: C,
    history: HistoryStore<S>,
    clipboard: Arc<dyn ClipboardSink>,
    clock: Clock,
    state: AppState,
    last_probe: Option<ConnectivityResult>,
}

impl<C: GenerationClient, S: HistoryStorage> RequestController<C, S> {
    pub fn new(client: C, history: HistoryStore<S>) -> Self {
        Self {
            client,
            history,
            clipboard: Arc::new(NullClipboard),
            clock: Arc::new(Instant::now),
            state: AppState::new(),
            last_probe: None,
        }
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn ClipboardSink>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn request_state(&self) -> &RequestState {
        self.state.request()
    }

    pub fn history(&self) -> &TaskHistory {
        self.history.history()
    }

    pub fn history_store(&self) -> &HistoryStore<S> {
        &self.history
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn view(&self) -> SessionView {
        let now_utc = self.history.now_utc();
        SessionView {
            app: self.state.view(self.now()),
            history: self
                .history
                .history()
                .entries()
                .iter()
                .map(|entry| HistoryRowView::from_entry(entry, now_utc))
                .collect(),
        }
    }

    /// Submits a topic. Blank topics and calls made while a request is in
    /// flight leave the state untouched.
    pub async fn generate(&mut self, topic: &str) -> &RequestState {
        self.dispatch(Msg::GenerateRequested {
            topic: topic.to_string(),
        })
        .await;
        self.state.request()
    }

    /// Checks that the service root answers. Only the diagnostic trace changes.
    pub async fn probe(&mut self) -> ConnectivityResult {
        self.last_probe = None;
        self.dispatch(Msg::ProbeRequested).await;
        self.last_probe
            .take()
            .unwrap_or_else(|| ConnectivityResult::Unreachable {
                message: "probe was not issued".to_string(),
            })
    }

    pub async fn copy_code(&mut self, scope: CopyScope) {
        let now = self.now();
        self.dispatch(Msg::CopyCodeClicked { scope, now }).await;
    }

    pub async fn share_item(&mut self, item_id: NewsItemId) {
        let now = self.now();
        self.dispatch(Msg::ShareClicked { item_id, now }).await;
    }

    /// Puts a past topic back into the input box. Returns `false` for unknown ids.
    pub async fn load_from_history(&mut self, id: TaskId) -> bool {
        let Some(topic) = self.history.history().get(id).map(|entry| entry.topic.clone()) else {
            return false;
        };
        let now = self.now();
        self.dispatch(Msg::HistoryEntryLoaded { topic, now }).await;
        true
    }

    pub async fn remove_history_entry(&mut self, id: TaskId) {
        self.dispatch(Msg::HistoryEntryRemoved(id)).await;
    }

    pub async fn clear_history(&mut self) {
        self.dispatch(Msg::HistoryClearClicked).await;
    }

    pub async fn tick(&mut self) {
        let now = self.now();
        self.dispatch(Msg::Tick { now }).await;
    }

    /// Applies a message and runs its effects, feeding follow-up messages
    /// back in until the queue drains.
    pub async fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            for effect in self.apply(msg) {
                inbox.extend(self.run_effect(effect).await);
            }
        }
    }

    fn apply(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        effects
    }

    async fn run_effect(&mut self, effect: Effect) -> Vec<Msg> {
        match effect {
            Effect::Generate { topic } => {
                let target = self.client.target();
                devnews_info!("Generate topic={:?} target={}", topic, target);
                self.apply(Msg::Diagnostic(format!("Sending request to: {target}")));

                let trace = BufferedTrace::new();
                let outcome = self.client.generate(&topic, &trace).await;
                for line in trace.into_lines() {
                    self.apply(Msg::Diagnostic(line));
                }

                let result = match outcome {
                    Ok(items) => {
                        devnews_info!("Generated {} items for {:?}", items.len(), topic);
                        Ok(items)
                    }
                    Err(err) => {
                        devnews_warn!("Generation for {:?} failed: {}", topic, err);
                        Err(err.to_error_info())
                    }
                };
                vec![Msg::GenerationFinished { topic, result }]
            }
            Effect::Probe => {
                let result = self.client.probe().await;
                devnews_debug!("Probe result: {:?}", result);
                self.last_probe = Some(result.clone());
                vec![Msg::ProbeFinished(result)]
            }
            Effect::RecordHistory { topic, items } => {
                if let Err(err) = self.history.record(&topic, &items) {
                    devnews_warn!("History entry for {:?} not saved: {}", topic, err);
                }
                Vec::new()
            }
            Effect::RemoveHistory { id } => {
                match self.history.remove(id) {
                    Ok(true) => {}
                    Ok(false) => devnews_debug!("No history entry with id={}", id),
                    Err(err) => devnews_warn!("History entry {} not removed: {}", id, err),
                }
                Vec::new()
            }
            Effect::ClearHistory => match self.history.clear() {
                Ok(()) => vec![Msg::HistoryCleared { now: self.now() }],
                Err(err) => {
                    devnews_warn!("History not cleared: {}", err);
                    Vec::new()
                }
            },
            Effect::WriteClipboard { text } => {
                self.clipboard.write_text(&text);
                Vec::new()
            }
        }
    }

    fn now(&self) -> Instant {
        (self.clock)()
    }
}
