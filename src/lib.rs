#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::style)]
#![warn(clippy::correctness)]
#![warn(clippy::complexity)]
#![warn(clippy::suspicious)]
#![warn(clippy::cargo)]

//! Linear undo/redo history.
//!
//! A host records reversible commands after performing them, then walks back
//! and forth with `undo` and `redo`. Commands sharing a group token are undone
//! and redone as one step, the history can be capped to a maximum size, and a
//! single callback is notified after every change.
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//! use undo_manager::prelude::*;
//!
//! let circles = Rc::new(RefCell::new(Vec::new()));
//! let history = HistoryManager::new();
//!
//! for radius in [10, 20, 30] {
//!     circles.borrow_mut().push(radius);
//!     let (undo, redo) = (circles.clone(), circles.clone());
//!     history.add(
//!         FnCommand::new(
//!             move || {
//!                 undo.borrow_mut().pop();
//!             },
//!             move || redo.borrow_mut().push(radius),
//!         )
//!         .with_group("batch"),
//!     );
//! }
//!
//! history.undo();
//! assert!(circles.borrow().is_empty());
//! assert_eq!(history.index(), None);
//!
//! history.redo();
//! assert_eq!(*circles.borrow(), vec![10, 20, 30]);
//! ```

pub mod concurrent_history_manager;
pub mod config;
pub mod error;
pub mod fn_command;
mod history;
pub mod history_manager;
pub mod traits;

pub mod prelude {
	pub use crate::concurrent_history_manager::{ConcurrentHistoryManager, SyncCallback};
	pub use crate::config::{HistoryConfig, Limit};
	pub use crate::error::HistoryError;
	pub use crate::fn_command::{FnCommand, FnCommandBuilder};
	pub use crate::history_manager::{Callback, HistoryManager};
	pub use crate::traits::command::Command;
	pub use crate::traits::command_history::CommandHistory;
}
