//! DevNews core: pure state machine, derived views and history model.
mod effect;
mod filter;
mod history;
mod model;
mod msg;
mod notifier;
mod request;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use filter::{apply_filter, FilterState};
pub use history::{
    format_age, TaskHistory, TaskHistoryEntry, TaskId, HISTORY_LIMIT, MAX_TASK_ID, PREVIEW_LIMIT,
};
pub use model::{NewsItem, NewsItemId, ResultSet, CATEGORIES};
pub use msg::Msg;
pub use notifier::{
    ClipboardNotifier, CopyScope, CODE_COPIED_MESSAGE, COPIED_FLAG_WINDOW, HISTORY_CLEARED_MESSAGE,
    HISTORY_LOADED_MESSAGE, LINK_SHARED_MESSAGE, MESSAGE_WINDOW,
};
pub use request::{
    ConnectivityResult, DiagnosticLog, ErrorInfo, ErrorKind, RequestState, RequestStatus,
    GENERIC_FAILURE_MESSAGE,
};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, HistoryRowView};
