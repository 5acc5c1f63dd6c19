#![forbid(unsafe_code)]

//! One input line in, one [`Msg`] out.

use crate::error::{DemoError, Result};

pub const HELP_TEXT: &str = "\
COMMANDS:
    add <label>     Append a todo (blank labels are ignored)
    toggle <row>    Flip done on row <row> of the current page
    edit <row>      Start editing row <row>
    type <text>     Replace the text being edited
    ok              Save the edit
    cancel          Drop the edit
    clear           Remove every done todo
    next / prev     Change page
    show            Render again
    help            This text
    quit            Leave";

/// Events the app reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Add(String),
    /// 1-based row on the current page.
    Toggle(usize),
    Edit(usize),
    Type(String),
    Confirm,
    Cancel,
    ClearDone,
    NextPage,
    PrevPage,
    Show,
    Help,
    Quit,
}

impl Msg {
    /// Parse one line. Returns `Ok(None)` for blank lines and `#` comments.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let msg = match word.to_ascii_lowercase().as_str() {
            "add" | "a" => Self::Add(rest.to_string()),
            "toggle" | "t" => Self::Toggle(parse_row(rest)?),
            "edit" | "e" => Self::Edit(parse_row(rest)?),
            "type" => Self::Type(rest.to_string()),
            "ok" => Self::Confirm,
            "cancel" => Self::Cancel,
            "clear" => Self::ClearDone,
            "next" | "n" => Self::NextPage,
            "prev" | "p" => Self::PrevPage,
            "show" | "ls" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => {
                return Err(DemoError::UnknownCommand {
                    input: line.to_string(),
                });
            }
        };
        Ok(Some(msg))
    }
}

fn parse_row(raw: &str) -> Result<usize> {
    raw.parse::<usize>()
        .ok()
        .filter(|row| *row >= 1)
        .ok_or_else(|| DemoError::invalid(format!("expected a row number >= 1, got {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_words_and_arguments() {
        assert_eq!(
            Msg::parse("add  buy milk ").unwrap(),
            Some(Msg::Add("buy milk".into()))
        );
        assert_eq!(Msg::parse("toggle 3").unwrap(), Some(Msg::Toggle(3)));
        assert_eq!(Msg::parse("E 2").unwrap(), Some(Msg::Edit(2)));
        assert_eq!(
            Msg::parse("type new text").unwrap(),
            Some(Msg::Type("new text".into()))
        );
        assert_eq!(Msg::parse("next").unwrap(), Some(Msg::NextPage));
        assert_eq!(Msg::parse("q").unwrap(), Some(Msg::Quit));
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(Msg::parse("   ").unwrap(), None);
        assert_eq!(Msg::parse("# setup").unwrap(), None);
    }

    #[test]
    fn add_without_label_is_kept_for_the_app_to_ignore() {
        assert_eq!(Msg::parse("add").unwrap(), Some(Msg::Add(String::new())));
    }

    #[test]
    fn bad_rows_are_rejected() {
        assert!(matches!(
            Msg::parse("toggle 0"),
            Err(DemoError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Msg::parse("edit x"),
            Err(DemoError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Msg::parse("toggle"),
            Err(DemoError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn unknown_words_are_errors() {
        let err = Msg::parse("frobnicate 1").unwrap_err();
        assert!(matches!(err, DemoError::UnknownCommand { .. }));
        assert!(err.is_recoverable());
    }
}
