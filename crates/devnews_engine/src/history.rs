use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use devnews_core::{NewsItem, TaskHistory, TaskHistoryEntry, TaskId, MAX_TASK_ID};
use devnews_logging::{devnews_error, devnews_info, devnews_warn};
use serde::{Deserialize, Serialize};

use crate::{AtomicFileWriter, PersistError};

/// Storage key of the serialized task history. Must stay stable across releases.
pub const HISTORY_KEY: &str = "devnews-task-history";
const FORMAT_VERSION: u32 = 1;

/// Source of creation timestamps for history entries.
pub type WallClock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// A single string-keyed slot holding the serialized history.
pub trait HistoryStorage: Send {
    fn read_raw(&self) -> Result<Option<String>, PersistError>;
    fn write_raw(&mut self, raw: &str) -> Result<(), PersistError>;
}

/// Stores the slot as `{dir}/devnews-task-history.ron`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    writer: AtomicFileWriter,
    file_name: String,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
            file_name: format!("{HISTORY_KEY}.ron"),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.writer.dir().join(&self.file_name)
    }
}

impl HistoryStorage for FileStorage {
    fn read_raw(&self) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path()) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(PersistError::Io(err)),
        }
    }

    fn write_raw(&mut self, raw: &str) -> Result<(), PersistError> {
        self.writer.write(&self.file_name, raw).map(|_| ())
    }
}

/// In-memory slot. Clones share the slot, so a clone outlives a "restart".
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        let storage = Self::default();
        *storage.lock() = Some(raw.into());
        storage
    }

    pub fn raw(&self) -> Option<String> {
        self.lock().clone()
    }

    /// Makes every following write fail, as a full or revoked store would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HistoryStorage for MemoryStorage {
    fn read_raw(&self) -> Result<Option<String>, PersistError> {
        Ok(self.raw())
    }

    fn write_raw(&mut self, raw: &str) -> Result<(), PersistError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(PersistError::Io(std::io::Error::other("storage unavailable")));
        }
        *self.lock() = Some(raw.to_string());
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedHistory {
    version: u32,
    entries: Vec<TaskHistoryEntry>,
}

/// Size-bounded task history mirrored to a storage slot.
///
/// Every mutation serializes the complete next history and writes it in one
/// call; memory is only updated once that write succeeds. Mutations take
/// `&mut self`, so they cannot overlap.
pub struct HistoryStore<S> {
    storage: S,
    history: TaskHistory,
    now_utc: WallClock,
}

impl<S: HistoryStorage> HistoryStore<S> {
    /// Loads whatever the storage holds; unreadable state counts as empty.
    pub fn open(storage: S) -> Self {
        let history = load_history(&storage);
        Self {
            storage,
            history,
            now_utc: Arc::new(Utc::now),
        }
    }

    pub fn with_wall_clock(mut self, now_utc: WallClock) -> Self {
        self.now_utc = now_utc;
        self
    }

    /// Re-reads the storage slot without touching the in-memory copy.
    pub fn load(&self) -> TaskHistory {
        load_history(&self.storage)
    }

    pub fn history(&self) -> &TaskHistory {
        &self.history
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn now_utc(&self) -> DateTime<Utc> {
        (self.now_utc)()
    }

    pub fn record(
        &mut self,
        topic: &str,
        items: &[NewsItem],
    ) -> Result<TaskHistoryEntry, PersistError> {
        let newest = self.history.newest().map(|entry| entry.id);
        let entry = TaskHistoryEntry::new(topic, items, self.now_utc(), newest);

        let mut next = self.history.clone();
        next.push_front(entry.clone());
        self.commit(next)?;
        devnews_info!(
            "Recorded history entry id={} topic={:?} results={}",
            entry.id,
            entry.topic,
            entry.result_count
        );
        Ok(entry)
    }

    /// Returns `Ok(false)` when no entry had that id; nothing is written then.
    pub fn remove(&mut self, id: TaskId) -> Result<bool, PersistError> {
        let mut next = self.history.clone();
        if !next.remove(id) {
            return Ok(false);
        }
        self.commit(next)?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<(), PersistError> {
        self.commit(TaskHistory::new())
    }

    fn commit(&mut self, next: TaskHistory) -> Result<(), PersistError> {
        let state = PersistedHistory {
            version: FORMAT_VERSION,
            entries: next.entries().to_vec(),
        };
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&state, pretty)
            .map_err(|err| PersistError::Serialize(err.to_string()))?;

        if let Err(err) = self.storage.write_raw(&content) {
            devnews_error!("Failed to persist task history: {}", err);
            return Err(err);
        }
        self.history = next;
        Ok(())
    }
}

fn load_history<S: HistoryStorage>(storage: &S) -> TaskHistory {
    let content = match storage.read_raw() {
        Ok(Some(text)) => text,
        Ok(None) => return TaskHistory::new(),
        Err(err) => {
            devnews_warn!("Failed to read task history: {}", err);
            return TaskHistory::new();
        }
    };

    match parse_history(&content) {
        Ok(history) => {
            devnews_info!("Loaded {} task history entries", history.len());
            history
        }
        Err(err) => {
            devnews_warn!("Discarding unreadable task history: {}", err);
            TaskHistory::new()
        }
    }
}

fn parse_history(content: &str) -> Result<TaskHistory, PersistError> {
    let state: PersistedHistory =
        ron::from_str(content).map_err(|err| PersistError::Parse(err.to_string()))?;
    if state.version != FORMAT_VERSION {
        return Err(PersistError::Parse(format!(
            "unsupported history version {}",
            state.version
        )));
    }
    if let Some(entry) = state.entries.iter().find(|entry| entry.id > MAX_TASK_ID) {
        return Err(PersistError::Parse(format!(
            "history id {} out of range",
            entry.id
        )));
    }
    Ok(TaskHistory::from_entries(state.entries))
}
