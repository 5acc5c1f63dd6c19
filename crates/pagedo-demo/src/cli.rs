#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;

use crate::app::TodoApp;
use crate::error::{DemoError, Result};
use crate::logging;
use crate::session::run_session;

#[derive(Debug, Parser)]
#[command(
    name = "pagedo",
    about = "Todo list demo with a self-correcting paginator",
    version
)]
pub struct Cli {
    /// Todos shown per page.
    #[arg(long, env = "PAGEDO_PER_PAGE", default_value_t = 5)]
    pub per_page: usize,

    /// Generated todos added after the two fixed ones.
    #[arg(long, env = "PAGEDO_SEED_ITEMS", default_value_t = 50)]
    pub seed_items: usize,

    /// Start from an empty list.
    #[arg(long, conflicts_with = "seed_items")]
    pub empty: bool,

    /// Read commands from this file instead of stdin.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. `debug`, `pagedo_core=debug`).
    #[arg(long, env = "PAGEDO_LOG", default_value = "warn")]
    pub log_level: String,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    logging::init(&cli.log_level)?;
    if cli.per_page == 0 {
        return Err(DemoError::invalid("--per-page must be at least 1"));
    }

    let mut app = if cli.empty {
        TodoApp::new(cli.per_page)?
    } else {
        TodoApp::seeded(cli.per_page, cli.seed_items)?
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    let summary = match &cli.script {
        Some(path) => {
            let file = File::open(path).map_err(|err| {
                DemoError::invalid(format!("cannot open script {}: {err}", path.display()))
            })?;
            run_session(&mut app, BufReader::new(file), stdout.lock(), stderr.lock())?
        }
        None => run_session(&mut app, io::stdin().lock(), stdout.lock(), stderr.lock())?,
    };

    tracing::info!(
        message = "session.end",
        commands = summary.commands,
        rejected = summary.rejected
    );
    Ok(())
}
