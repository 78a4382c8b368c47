use crate::config::Limit;

use super::command::Command;

/// Linear undo/redo navigation over recorded commands.
///
/// Every method takes `&self` so that a history can be shared with the very
/// commands it replays; a command that tries to `add` while it is being
/// undone or redone is ignored.
pub trait CommandHistory<C: Command> {
    /// Records an already-performed action, discarding anything redoable.
    fn add(&self, command: C) -> &Self;
    /// Undoes the last applied command, or its whole group.
    fn undo(&self) -> &Self;
    /// Redoes the next command, or its whole group.
    fn redo(&self) -> &Self;
    fn clear(&self);
    fn has_undo(&self) -> bool;
    fn has_redo(&self) -> bool;
    /// Index of the last applied command, `None` when nothing is applied.
    fn index(&self) -> Option<usize>;
    /// Sets the maximum retained commands. Takes effect on the next `add`.
    fn set_history_limit(&self, limit: Limit);

    /// Sets the maximum retained commands, `0` meaning unbounded.
    fn set_limit(&self, max: usize) {
        self.set_history_limit(Limit::new(max));
    }

    fn add_all(&self, commands: impl IntoIterator<Item = C>) -> &Self {
        for command in commands {
            self.add(command);
        }
        self
    }
}
