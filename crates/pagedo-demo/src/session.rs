#![forbid(unsafe_code)]

//! Line-driven event loop: read a command, update, render.

use std::io::{BufRead, Write};

use crate::app::{Flow, TodoApp};
use crate::command::{HELP_TEXT, Msg};
use crate::error::Result;
use crate::view::render;

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Lines that parsed into a command, including rejected ones.
    pub commands: usize,
    /// Commands refused because of bad input.
    pub rejected: usize,
    /// Whether the session ended on `quit` rather than end of input.
    pub quit: bool,
}

/// Render once, then handle `input` line by line until `quit` or EOF.
///
/// The view goes to `out`, input problems to `err`; neither stops the loop.
/// I/O failures do.
pub fn run_session<R: BufRead, W: Write, E: Write>(
    app: &mut TodoApp,
    input: R,
    mut out: W,
    mut err: E,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();
    out.write_all(render(app).as_bytes())?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let outcome = Msg::parse(&line).and_then(|msg| match msg {
            Some(msg) => {
                summary.commands += 1;
                app.update(msg).map(Some)
            }
            None => Ok(None),
        });

        match outcome {
            Ok(None) => continue,
            Ok(Some(Flow::Render)) => out.write_all(render(app).as_bytes())?,
            Ok(Some(Flow::Help)) => writeln!(out, "{HELP_TEXT}")?,
            Ok(Some(Flow::Quit)) => {
                summary.quit = true;
                break;
            }
            Err(error) if error.is_recoverable() => {
                summary.rejected += 1;
                tracing::debug!(message = "session.rejected", %error, line = %line.trim());
                writeln!(err, "{error}")?;
            }
            Err(error) => return Err(error),
        }
        out.flush()?;
    }

    Ok(summary)
}
