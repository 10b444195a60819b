use crate::{ResultSet, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one `POST /generate-news` with the trimmed topic.
    Generate { topic: String },
    /// Issue the diagnostic `GET /`.
    Probe,
    RecordHistory { topic: String, items: ResultSet },
    RemoveHistory { id: TaskId },
    ClearHistory,
    WriteClipboard { text: String },
}
