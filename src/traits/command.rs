use std::borrow::Cow;

/// A reversible unit of work recorded in a history.
///
/// A command closes over whatever host state it affects; the history never
/// inspects that state, it only calls `undo` and `redo` in order.
///
/// # Required Methods
///
/// * `undo(&self)`: Reverses the effect of the command.
///
/// # Provided Methods
///
/// * `redo(&self)`: Re-applies the effect of the command. The default does nothing, which makes
///   the command undo-only: redoing it advances past it without running anything.
/// * `group_id(&self) -> Option<&str>`: The group token shared by commands that are undone and
///   redone as one unit. Empty tokens are treated as no group.
/// * `description(&self) -> Cow<str>`: Returns a description of the command. The default
///   implementation returns "Unknown command".
///
/// # Example
///
/// ```
/// use std::{borrow::Cow, cell::RefCell, rc::Rc};
/// use undo_manager::prelude::Command;
///
/// struct Push {
///     items: Rc<RefCell<Vec<i32>>>,
///     value: i32,
/// }
///
/// impl Command for Push {
///     fn undo(&self) {
///         self.items.borrow_mut().pop();
///     }
///
///     fn redo(&self) {
///         self.items.borrow_mut().push(self.value);
///     }
///
///     fn description(&self) -> Cow<'_, str> {
///         Cow::Owned(format!("push {}", self.value))
///     }
/// }
///
/// let items = Rc::new(RefCell::new(vec![1]));
/// let cmd = Push { items: items.clone(), value: 1 };
/// cmd.undo();
/// assert!(items.borrow().is_empty());
/// cmd.redo();
/// assert_eq!(*items.borrow(), vec![1]);
/// ```
pub trait Command {
    /// Undoes the command.
    fn undo(&self);

    /// Redoes the command. Undo-only commands keep the default, which does nothing.
    fn redo(&self) {}

    /// Returns the group this command belongs to, if any.
    fn group_id(&self) -> Option<&str> {
        None
    }

    /// Returns a description of the command. The default implementation returns "Unknown command".
    fn description(&self) -> Cow<'_, str> {
        Cow::Borrowed("Unknown command")
    }
}

impl<T: Command + ?Sized> Command for Box<T> {
    fn undo(&self) {
        (**self).undo();
    }

    fn redo(&self) {
        (**self).redo();
    }

    fn group_id(&self) -> Option<&str> {
        (**self).group_id()
    }

    fn description(&self) -> Cow<'_, str> {
        (**self).description()
    }
}

/// Returns the command's group token, treating an empty token as no group.
pub(crate) fn group_of<C: Command + ?Sized>(command: &C) -> Option<&str> {
    command.group_id().filter(|group| !group.is_empty())
}
