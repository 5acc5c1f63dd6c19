#![forbid(unsafe_code)]

//! Demo state and its event handler.
//!
//! State flows one way: a [`Msg`] goes through [`TodoApp::update`], which
//! mutates the list or the pager, and [`crate::view::render`] turns the result
//! into text. Nothing in the view writes back.

use pagedo_core::{Paginator, TodoId, TodoItem, TodoList};

use crate::command::Msg;
use crate::error::{DemoError, Result};

/// What the session should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Render,
    Help,
    Quit,
}

/// A row being edited, with the text typed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: TodoId,
    /// 1-based row on the page the edit started from.
    pub row: usize,
    pub text: String,
}

/// The whole demo state.
pub struct TodoApp {
    list: TodoList,
    paginator: Paginator<TodoItem>,
    editing: Option<EditSession>,
}

impl std::fmt::Debug for TodoApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoApp")
            .field("list", &self.list)
            .field("page_number", &self.paginator.page_number())
            .field("editing", &self.editing)
            .finish()
    }
}

impl TodoApp {
    /// Empty list paged `items_per_page` at a time.
    pub fn new(items_per_page: usize) -> Result<Self> {
        if items_per_page == 0 {
            return Err(DemoError::invalid("items per page must be at least 1"));
        }
        let list = TodoList::new();
        let paginator = Paginator::with_page_size(list.items(), items_per_page);
        Ok(Self {
            list,
            paginator,
            editing: None,
        })
    }

    /// `Hello` (open) and `World!` (done) followed by `extra` generated items.
    pub fn seeded(items_per_page: usize, extra: usize) -> Result<Self> {
        let app = Self::new(items_per_page)?;
        app.list.add_item(TodoItem::new("Hello"));
        app.list.add_item(TodoItem::new("World!").done(true));
        for n in 1..=extra {
            app.list
                .add_item(TodoItem::new(format!("generated task {n:02}")).done(n % 3 == 0));
        }
        tracing::info!(
            message = "app.seeded",
            items = app.list.len(),
            left = app.list.left_count(),
            items_per_page
        );
        Ok(app)
    }

    #[must_use]
    pub fn list(&self) -> &TodoList {
        &self.list
    }

    #[must_use]
    pub fn paginator(&self) -> &Paginator<TodoItem> {
        &self.paginator
    }

    #[must_use]
    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// Apply one event.
    ///
    /// Errors are about the input (bad row, no edit in progress) and leave the
    /// state untouched.
    pub fn update(&mut self, msg: Msg) -> Result<Flow> {
        tracing::debug!(message = "app.update", ?msg);
        match msg {
            Msg::Add(label) => {
                // Blank input does nothing, like an empty text box.
                if !label.trim().is_empty() {
                    self.list.add_item(TodoItem::new(label));
                }
            }
            Msg::Toggle(row) => {
                let id = self.id_at(row)?;
                self.list.switch_done(id);
            }
            Msg::Edit(row) => {
                let id = self.id_at(row)?;
                let text = self
                    .list
                    .get(id)
                    .map(|item| item.label().to_string())
                    .unwrap_or_default();
                self.editing = Some(EditSession { id, row, text });
            }
            Msg::Type(text) => match self.editing.as_mut() {
                Some(session) => session.text = text,
                None => return Err(DemoError::NotEditing),
            },
            Msg::Confirm => match self.editing.take() {
                Some(session) => {
                    self.list.relabel(session.id, session.text);
                }
                None => return Err(DemoError::NotEditing),
            },
            Msg::Cancel => {
                if self.editing.take().is_none() {
                    return Err(DemoError::NotEditing);
                }
            }
            Msg::ClearDone => {
                self.list.clear_done();
            }
            Msg::NextPage => {
                if self.paginator.next_page() {
                    self.editing = None;
                }
            }
            Msg::PrevPage => {
                if self.paginator.prev_page() {
                    self.editing = None;
                }
            }
            Msg::Show => {}
            Msg::Help => return Ok(Flow::Help),
            Msg::Quit => return Ok(Flow::Quit),
        }
        self.drop_stale_edit();
        Ok(Flow::Render)
    }

    fn id_at(&self, row: usize) -> Result<TodoId> {
        self.paginator.with_paginated_items(|items| {
            row.checked_sub(1)
                .and_then(|index| items.get(index))
                .map(TodoItem::id)
                .ok_or(DemoError::NoSuchRow {
                    row,
                    shown: items.len(),
                })
        })
    }

    /// An edit ends as soon as its row renders a different item.
    fn drop_stale_edit(&mut self) {
        let Some(session) = &self.editing else {
            return;
        };
        let (id, row) = (session.id, session.row);
        let unchanged = self.paginator.with_paginated_items(|items| {
            row.checked_sub(1)
                .and_then(|index| items.get(index))
                .is_some_and(|item| item.id() == id)
        });
        if !unchanged {
            tracing::debug!(message = "app.edit_dropped", item = id.raw());
            self.editing = None;
        }
    }
}
