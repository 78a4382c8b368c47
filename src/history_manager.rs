use std::{cell::RefCell, fmt, rc::Rc};

use tracing::trace;

use crate::{
    config::{HistoryConfig, Limit},
    fn_command::FnCommand,
    history::{replay, Direction, History, Slot},
    traits::{command::Command, command_history::CommandHistory},
};

/// Notification hook invoked after every state-changing operation.
pub type Callback = Rc<dyn Fn()>;

/// Single-threaded undo/redo history.
///
/// Commands are kept in chronological order with a cursor marking the last
/// applied one. Commands sharing a group token are undone and redone together.
/// Hosts usually keep the manager in an `Rc` so command closures and UI code
/// can reach it. While a group is being replayed, calls to `add`, `clear`,
/// `undo` and `redo` made from inside a command are ignored and do not fire
/// the callback; queries and `set_limit` still work.
///
/// Only one callback is registered at a time; setting a new one replaces it.
pub struct HistoryManager<C: Command = FnCommand> {
    history: RefCell<History<Rc<C>>>,
    callback: RefCell<Option<Callback>>,
}

impl<C: Command> HistoryManager<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    #[must_use]
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            history: RefCell::new(History::new(config.limit)),
            callback: RefCell::new(None),
        }
    }

    /// Replaces the change callback; `None` disables notification.
    pub fn set_callback(&self, callback: Option<Callback>) {
        *self.callback.borrow_mut() = callback;
    }

    /// Returns the recorded commands in chronological order, optionally only
    /// those belonging to `group_id`.
    #[must_use]
    pub fn commands(&self, group_id: Option<&str>) -> Vec<Rc<C>> {
        self.history.borrow().commands(group_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn limit(&self) -> Limit {
        self.history.borrow().limit()
    }

    fn notify(&self) {
        let callback = self.callback.borrow().clone();
        if let Some(callback) = callback {
            trace!("notifying history callback");
            callback();
        }
    }
}

impl<C: Command> CommandHistory<C> for HistoryManager<C> {
    fn add(&self, command: C) -> &Self {
        let command = Rc::new(command);
        if self.history.with(|history| history.push(command)) {
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
        if self.history.with(History::clear) {
            self.notify();
        }
    }

    fn has_undo(&self) -> bool {
        self.history.borrow().has_undo()
    }

    fn has_redo(&self) -> bool {
        self.history.borrow().has_redo()
    }

    fn index(&self) -> Option<usize> {
        self.history.borrow().index()
    }

    fn set_history_limit(&self, limit: Limit) {
        self.history.with(|history| history.set_limit(limit));
    }
}

impl<C: Command> Default for HistoryManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Command> fmt::Debug for HistoryManager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.history.try_borrow() {
            Ok(history) => f
                .debug_struct("HistoryManager")
                .field("len", &history.len())
                .field("index", &history.index())
                .field("limit", &history.limit())
                .finish_non_exhaustive(),
            Err(_) => write!(f, "HistoryManager(<borrowed>)"),
        }
    }
}
