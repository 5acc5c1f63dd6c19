#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Core: the self-correcting [`Paginator`] and the todo-list model it pages.

pub mod paginator;
pub mod todo;

pub use paginator::{DEFAULT_ITEMS_PER_PAGE, Paginator, corrected_page};
pub use todo::{TodoId, TodoItem, TodoList};

pub use pagedo_reactive::{Computed, Observable, Subscription};
