#![forbid(unsafe_code)]

//! Diagnostics go to stderr so stdout carries only the rendered view.

use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
///
/// A second call is a no-op.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)?,
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
    Ok(())
}
