#![forbid(unsafe_code)]

//! Pure text rendering of a [`TodoApp`].

use std::fmt::Write as _;

use pagedo_core::{Paginator, TodoItem};

use crate::app::TodoApp;

pub const TITLE: &str = "ToDo list";

/// Render the full screen: title, page rows, pager bar and the open count.
#[must_use]
pub fn render(app: &TodoApp) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');

    let editing = app.editing();
    app.paginator().with_paginated_items(|items| {
        for (index, item) in items.iter().enumerate() {
            let row = index + 1;
            match editing {
                Some(session) if session.id == item.id() => {
                    let _ = writeln!(out, "> {row} {} {}_  (ok / cancel)", check(item), session.text);
                }
                _ => {
                    let _ = writeln!(out, "  {row} {} {}", check(item), item.label());
                }
            }
        }
    });

    out.push_str(&pager_bar(app.paginator()));
    out.push('\n');
    let _ = writeln!(out, "Tasks left: {}", app.list().left_count());
    out
}

/// `[Prev] first - last from total [Next]`, with unavailable buttons dashed out.
#[must_use]
pub fn pager_bar<T: Clone + PartialEq + 'static>(paginator: &Paginator<T>) -> String {
    let prev = if paginator.prev_page_possible() {
        "[Prev]"
    } else {
        "[----]"
    };
    let next = if paginator.next_page_possible() {
        "[Next]"
    } else {
        "[----]"
    };
    format!(
        "{prev} {} - {} from {} {next}",
        paginator.first_display_item_number(),
        paginator.last_display_item_number(),
        paginator.items_length()
    )
}

fn check(item: &TodoItem) -> &'static str {
    if item.is_done() { "[x]" } else { "[ ]" }
}
