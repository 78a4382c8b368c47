//! The linear history shared by both managers.
//!
//! [`History`] owns the command sequence, the cursor and the replay flag. It
//! never runs a command itself: the managers walk a group with [`replay`],
//! which releases the state between steps so a command may read the history
//! (or try to mutate it and be refused) while it runs. A replay belongs to the
//! thread that started it: only that thread is refused, other threads wait in
//! [`Slot::with_idle`] until it ends.

use std::{
    cell::RefCell,
    marker::PhantomData,
    ops::Deref,
    thread::{self, ThreadId},
};

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, trace};

use crate::{
    config::Limit,
    traits::command::{group_of, Command},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Undo,
    Redo,
}

#[derive(Debug)]
pub(crate) struct History<P> {
    commands: Vec<P>,
    /// Number of applied commands; the cursor is `applied - 1`.
    applied: usize,
    limit: Limit,
    /// Thread currently walking a group, if any.
    replaying: Option<ThreadId>,
}

impl<P> History<P>
where
    P: Deref + Clone,
    P::Target: Command,
{
    pub(crate) fn new(limit: Limit) -> Self {
        Self {
            commands: Vec::new(),
            applied: 0,
            limit,
            replaying: None,
        }
    }

    /// Appends a command, pruning the redo branch and evicting the oldest
    /// commands over the limit. Returns `false` if refused during a replay.
    pub(crate) fn push(&mut self, command: P) -> bool {
        if self.replaying.is_some() {
            trace!("add ignored while replaying");
            return false;
        }

        let pruned = self.commands.len() - self.applied;
        if pruned > 0 {
            trace!(pruned, "discarding redo branch");
            self.commands.truncate(self.applied);
        }
        self.commands.push(command);

        let evicted = self.limit.excess(self.commands.len());
        if evicted > 0 {
            debug!(evicted, limit = %self.limit, "evicting oldest commands");
            self.commands.drain(..evicted);
        }

        self.applied = self.commands.len();
        true
    }

    /// Empties the history. Returns whether there was anything to drop.
    pub(crate) fn clear(&mut self) -> bool {
        if self.replaying.is_some() {
            trace!("clear ignored while replaying");
            return false;
        }

        let dropped = self.commands.len();
        self.commands.clear();
        self.applied = 0;

        if dropped > 0 {
            debug!(dropped, "history cleared");
        }
        dropped > 0
    }

    pub(crate) fn set_limit(&mut self, limit: Limit) {
        trace!(%limit, "history limit set");
        self.limit = limit;
    }

    pub(crate) fn limit(&self) -> Limit {
        self.limit
    }

    pub(crate) fn has_undo(&self) -> bool {
        self.applied > 0
    }

    pub(crate) fn has_redo(&self) -> bool {
        self.applied < self.commands.len()
    }

    pub(crate) fn index(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    pub(crate) fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns the commands in chronological order, optionally only those in `group_id`.
    pub(crate) fn commands(&self, group_id: Option<&str>) -> Vec<P> {
        match group_id.filter(|group| !group.is_empty()) {
            Some(group) => self
                .commands
                .iter()
                .filter(|command| command.group_id() == Some(group))
                .cloned()
                .collect(),
            None => self.commands.clone(),
        }
    }

    /// Number of commands the next step in `direction` walks: the contiguous
    /// run sharing the group of the first command, or just that command when
    /// it is ungrouped.
    pub(crate) fn run_len(&self, direction: Direction) -> usize {
        let (past, future) = self.commands.split_at(self.applied);
        match direction {
            Direction::Undo => leading_run(past.iter().rev()),
            Direction::Redo => leading_run(future.iter()),
        }
    }

    /// Enters replay mode and returns how many commands to walk, or `None`
    /// when there is nothing to do or a replay is already running.
    fn begin_replay(&mut self, direction: Direction) -> Option<usize> {
        if self.replaying.is_some() {
            trace!(?direction, "ignored while replaying");
            return None;
        }

        let run = self.run_len(direction);
        if run == 0 {
            trace!(?direction, "nothing to replay");
            return None;
        }

        self.replaying = Some(thread::current().id());
        Some(run)
    }

    /// The command the next step in `direction` operates on.
    fn next(&self, direction: Direction) -> Option<P> {
        let index = match direction {
            Direction::Undo => self.applied.checked_sub(1)?,
            Direction::Redo => self.applied,
        };
        self.commands.get(index).cloned()
    }

    fn advance(&mut self, direction: Direction) {
        match direction {
            Direction::Undo => self.applied -= 1,
            Direction::Redo => self.applied += 1,
        }
    }
}

fn leading_run<'a, P>(mut commands: impl Iterator<Item = &'a P>) -> usize
where
    P: Deref + 'a,
    P::Target: Command,
{
    let Some(first) = commands.next() else {
        return 0;
    };
    match group_of(&**first) {
        Some(group) => 1 + commands.take_while(|c| group_of(&***c) == Some(group)).count(),
        None => 1,
    }
}

/// Short-lived access to a history behind some form of interior mutability.
pub(crate) trait Slot<P> {
    fn with<R>(&self, f: impl FnOnce(&mut History<P>) -> R) -> R;

    /// Like [`with`](Slot::with), but first waits for a replay running on
    /// another thread to finish. A replay on the calling thread does not wait.
    fn with_idle<R>(&self, f: impl FnOnce(&mut History<P>) -> R) -> R {
        self.with(f)
    }

    fn end_replay(&self) {
        self.with(|history| history.replaying = None);
    }
}

impl<P> Slot<P> for RefCell<History<P>> {
    fn with<R>(&self, f: impl FnOnce(&mut History<P>) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// A history shared between threads.
pub(crate) struct SharedHistory<P> {
    history: Mutex<History<P>>,
    replay_done: Condvar,
}

impl<P> SharedHistory<P> {
    pub(crate) fn new(history: History<P>) -> Self {
        Self {
            history: Mutex::new(history),
            replay_done: Condvar::new(),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, History<P>> {
        self.history.lock()
    }

    pub(crate) fn try_lock(&self) -> Option<MutexGuard<'_, History<P>>> {
        self.history.try_lock()
    }
}

impl<P> Slot<P> for SharedHistory<P> {
    fn with<R>(&self, f: impl FnOnce(&mut History<P>) -> R) -> R {
        f(&mut self.history.lock())
    }

    fn with_idle<R>(&self, f: impl FnOnce(&mut History<P>) -> R) -> R {
        let current = thread::current().id();
        let mut history = self.history.lock();
        while history.replaying.is_some_and(|owner| owner != current) {
            trace!("waiting for replay on another thread");
            self.replay_done.wait(&mut history);
        }
        f(&mut history)
    }

    fn end_replay(&self) {
        self.history.lock().replaying = None;
        self.replay_done.notify_all();
    }
}

/// Leaves replay mode on drop, including when a command panics.
struct ReplayGuard<'a, S: Slot<P>, P> {
    slot: &'a S,
    marker: PhantomData<fn() -> P>,
}

impl<S: Slot<P>, P> Drop for ReplayGuard<'_, S, P> {
    fn drop(&mut self) {
        self.slot.end_replay();
    }
}

/// Undoes or redoes one step: a single ungrouped command or a whole group.
///
/// The slot is only held while reading or moving the cursor, never while a
/// command runs. Returns whether anything was replayed.
pub(crate) fn replay<S, P>(slot: &S, direction: Direction) -> bool
where
    S: Slot<P>,
    P: Deref + Clone,
    P::Target: Command,
{
    let Some(run) = slot.with_idle(|history| history.begin_replay(direction)) else {
        return false;
    };
    let _guard = ReplayGuard {
        slot,
        marker: PhantomData,
    };

    trace!(?direction, run, "replaying");
    for _ in 0..run {
        let Some(command) = slot.with(|history| history.next(direction)) else {
            break;
        };

        match direction {
            Direction::Undo => command.undo(),
            Direction::Redo => command.redo(),
        }

        slot.with(|history| history.advance(direction));
    }

    true
}
