use std::{fmt, sync::Arc};

use parking_lot::RwLock;
use tracing::trace;

use crate::{
    config::{HistoryConfig, Limit},
    history::{replay, Direction, History, SharedHistory, Slot},
    traits::{command::Command, command_history::CommandHistory},
};

/// Thread-safe notification hook.
pub type SyncCallback = Arc<dyn Fn() + Send + Sync>;

/// Thread-safe counterpart of [`HistoryManager`](crate::history_manager::HistoryManager).
///
/// The history lives behind a mutex that is only held to read or move the
/// cursor, never while a command or the callback runs. While one thread is
/// replaying a group, `add`, `clear`, `undo` and `redo` issued by that same
/// thread (from inside a command) are ignored. The same calls from any other
/// thread block until the replay has finished and then take effect, so a
/// traversal always sees the sequence it started with.
pub struct ConcurrentHistoryManager<C: Command + Send + Sync> {
    history: SharedHistory<Arc<C>>,
    callback: RwLock<Option<SyncCallback>>,
}

impl<C> ConcurrentHistoryManager<C>
where
    C: Command + Send + Sync,
{
    #[must_use]
    pub fn new() -> Arc<Self> {
        Self::with_config(HistoryConfig::default())
    }

    #[must_use]
    pub fn with_config(config: HistoryConfig) -> Arc<Self> {
        Arc::new(Self {
            history: SharedHistory::new(History::new(config.limit)),
            callback: RwLock::new(None),
        })
    }

    pub fn set_callback(&self, callback: Option<SyncCallback>) {
        *self.callback.write() = callback;
    }

    #[must_use]
    pub fn commands(&self, group_id: Option<&str>) -> Vec<Arc<C>> {
        self.history.lock().commands(group_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn limit(&self) -> Limit {
        self.history.lock().limit()
    }

    fn notify(&self) {
        let callback = self.callback.read().clone();
        if let Some(callback) = callback {
            trace!("notifying history callback");
            callback();
        }
    }
}

impl<C> CommandHistory<C> for ConcurrentHistoryManager<C>
where
    C: Command + Send + Sync,
{
    fn add(&self, command: C) -> &Self {
        let command = Arc::new(command);
        if self.history.with_idle(|history| history.push(command)) {
            self.notify();
        }
        self
    }

    fn undo(&self) -> &Self {
        if replay(&self.history, Direction::Undo) {
            self.notify();
        }
        self
    }

    fn redo(&self) -> &Self {
        if replay(&self.history, Direction::Redo) {
            self.notify();
        }
        self
    }

    fn clear(&self) {
        if self.history.with_idle(History::clear) {
            self.notify();
        }
    }

    fn has_undo(&self) -> bool {
        self.history.lock().has_undo()
    }

    fn has_redo(&self) -> bool {
        self.history.lock().has_redo()
    }

    fn index(&self) -> Option<usize> {
        self.history.lock().index()
    }

    fn set_history_limit(&self, limit: Limit) {
        self.history.with(|history| history.set_limit(limit));
    }

    fn add_all(&self, commands: impl IntoIterator<Item = C>) -> &Self {
        let added = self.history.with_idle(|history| {
            commands
                .into_iter()
                .map(|command| history.push(Arc::new(command)))
                .filter(|&pushed| pushed)
                .count()
        });

        for _ in 0..added {
            self.notify();
        }
        self
    }
}

impl<C> fmt::Debug for ConcurrentHistoryManager<C>
where
    C: Command + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.history.try_lock() {
            Some(history) => f
                .debug_struct("ConcurrentHistoryManager")
                .field("len", &history.len())
                .field("index", &history.index())
                .field("limit", &history.limit())
                .finish_non_exhaustive(),
            None => write!(f, "ConcurrentHistoryManager(<locked>)"),
        }
    }
}
