//! Shared building blocks for the TUI: task bookkeeping, text helpers and
//! the single-line input field.

mod task;
mod text;
mod text_field;

pub use task::{TaskId, TaskKind, TaskSeq, TaskState, Tasks};
pub use text::{mask, plural, truncate_start_with_ellipsis, truncate_with_ellipsis};
pub use text_field::TextField;
