//! DevNews engine: HTTP client, history persistence and effect execution.
mod client;
mod controller;
mod history;
mod persist;
mod settings;
mod types;

pub use client::{BufferedTrace, GenerationClient, NullTrace, ReqwestGenerationClient, TraceSink};
pub use controller::{
    ChannelClipboard, ClipboardSink, Clock, NullClipboard, RequestController, SessionView,
};
pub use history::{
    FileStorage, HistoryStorage, HistoryStore, MemoryStorage, WallClock, HISTORY_KEY,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use settings::{ClientSettings, TUNNEL_SKIP_HEADER};
pub use types::GenerateError;
