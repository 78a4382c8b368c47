use std::{borrow::Cow, fmt};

use crate::{
    error::{HistoryError, Result},
    traits::command::Command,
};

type Operation = Box<dyn Fn()>;

/// A command built from closures.
///
/// The undo closure is mandatory. Without a redo closure the command is undo-only.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
/// use undo_manager::prelude::*;
///
/// let shapes = Rc::new(RefCell::new(vec!["circle"]));
/// let (undo, redo) = (shapes.clone(), shapes.clone());
///
/// let history = HistoryManager::new();
/// history.add(FnCommand::new(
///     move || { undo.borrow_mut().pop(); },
///     move || redo.borrow_mut().push("circle"),
/// ));
///
/// history.undo();
/// assert!(shapes.borrow().is_empty());
/// history.redo();
/// assert_eq!(shapes.borrow().len(), 1);
/// ```
pub struct FnCommand {
    undo: Operation,
    redo: Option<Operation>,
    group_id: Option<String>,
    description: Option<String>,
}

impl FnCommand {
    pub fn new(undo: impl Fn() + 'static, redo: impl Fn() + 'static) -> Self {
        Self {
            undo: Box::new(undo),
            redo: Some(Box::new(redo)),
            group_id: None,
            description: None,
        }
    }

    pub fn undo_only(undo: impl Fn() + 'static) -> Self {
        Self {
            undo: Box::new(undo),
            redo: None,
            group_id: None,
            description: None,
        }
    }

    #[must_use]
    pub fn builder() -> FnCommandBuilder {
        FnCommandBuilder::default()
    }

    #[must_use]
    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn has_redo(&self) -> bool {
        self.redo.is_some()
    }
}

impl Command for FnCommand {
    fn undo(&self) {
        (self.undo)();
    }

    fn redo(&self) {
        if let Some(redo) = &self.redo {
            redo();
        }
    }

    fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    fn description(&self) -> Cow<'_, str> {
        match &self.description {
            Some(description) => Cow::Borrowed(description),
            None => Cow::Borrowed("Unknown command"),
        }
    }
}

impl fmt::Debug for FnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommand")
            .field("group_id", &self.group_id)
            .field("description", &self.description)
            .field("has_redo", &self.has_redo())
            .finish_non_exhaustive()
    }
}

/// Assembles an [`FnCommand`] piece by piece, for hosts that decide at runtime
/// which operations a command carries.
///
/// [`build`](FnCommandBuilder::build) fails with [`HistoryError::InvalidCommand`]
/// when no undo operation was supplied, so the mistake surfaces where the
/// command is created rather than when it is first undone.
#[derive(Default)]
pub struct FnCommandBuilder {
    undo: Option<Operation>,
    redo: Option<Operation>,
    group_id: Option<String>,
    description: Option<String>,
}

impl FnCommandBuilder {
    #[must_use]
    pub fn undo(mut self, undo: impl Fn() + 'static) -> Self {
        self.undo = Some(Box::new(undo));
        self
    }

    #[must_use]
    pub fn redo(mut self, redo: impl Fn() + 'static) -> Self {
        self.redo = Some(Box::new(redo));
        self
    }

    #[must_use]
    pub fn group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Finishes the command.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidCommand`] if no undo operation was set.
    pub fn build(self) -> Result<FnCommand> {
        let undo = self
            .undo
            .ok_or(HistoryError::InvalidCommand("missing undo operation"))?;

        Ok(FnCommand {
            undo,
            redo: self.redo,
            group_id: self.group_id,
            description: self.description,
        })
    }
}

impl fmt::Debug for FnCommandBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommandBuilder")
            .field("has_undo", &self.undo.is_some())
            .field("has_redo", &self.redo.is_some())
            .field("group_id", &self.group_id)
            .field("description", &self.description)
            .finish()
    }
}
