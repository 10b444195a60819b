use std::time::Instant;

use crate::{ConnectivityResult, CopyScope, ErrorInfo, NewsItemId, ResultSet, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the topic input box.
    TopicChanged(String),
    /// User asked to generate news for a topic.
    GenerateRequested { topic: String },
    /// Generation call finished, successfully or not.
    GenerationFinished {
        topic: String,
        result: Result<ResultSet, ErrorInfo>,
    },
    /// Engine-side note for the diagnostic trace (request target, status line).
    Diagnostic(String),
    /// User clicked "test connection".
    ProbeRequested,
    ProbeFinished(ConnectivityResult),
    SearchChanged(String),
    CategoryToggled(String),
    CategoryRemoved(String),
    CategoriesCleared,
    ItemExpansionToggled(NewsItemId),
    ArticleOpened(NewsItemId),
    ArticleClosed,
    CopyCodeClicked { scope: CopyScope, now: Instant },
    ShareClicked { item_id: NewsItemId, now: Instant },
    /// A history entry was picked; its topic goes back into the input box.
    HistoryEntryLoaded { topic: String, now: Instant },
    HistoryEntryRemoved(TaskId),
    HistoryClearClicked,
    /// The cleared history was written out.
    HistoryCleared { now: Instant },
    ErrorDismissed,
    DiagnosticsCleared,
    /// Periodic tick used to expire transient feedback.
    Tick { now: Instant },
    /// Leaves the state untouched; hosts send it for input they ignore.
    NoOp,
}
