#![forbid(unsafe_code)]

//! Todo list demo over the self-correcting paginator.

pub mod app;
pub mod cli;
pub mod command;
pub mod error;
pub mod logging;
pub mod session;
pub mod view;

pub use app::{EditSession, Flow, TodoApp};
pub use cli::{Cli, run, run_from_env};
pub use command::Msg;
pub use error::{DemoError, Result};
pub use session::{SessionSummary, run_session};
