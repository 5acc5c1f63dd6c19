#![forbid(unsafe_code)]

//! Todo items and the observable list that owns them.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use pagedo_reactive::{Computed, Observable};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`TodoItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(u64);

impl TodoId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single todo entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    id: TodoId,
    label: String,
    is_done: bool,
}

impl TodoItem {
    /// Create an open item with a fresh id.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: TodoId::next(),
            label: label.into(),
            is_done: false,
        }
    }

    /// Set the initial done state.
    #[must_use]
    pub fn done(mut self, is_done: bool) -> Self {
        self.is_done = is_done;
        self
    }

    /// Stable identity, unique within the process.
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Text shown for this item.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the item is checked off.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.is_done
    }

    /// Flip the done state.
    pub fn switch_done(&mut self) {
        self.is_done = !self.is_done;
    }

    /// Replace the label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }
}

/// Ordered todo items plus the derived count of open ones.
///
/// The items live in an [`Observable`], so a
/// [`Paginator`](crate::Paginator) built over [`items`](Self::items) follows
/// every mutation made here.
pub struct TodoList {
    items: Observable<Vec<TodoItem>>,
    left_count: Computed<usize>,
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TodoList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoList")
            .field("len", &self.len())
            .field("left_count", &self.left_count())
            .finish()
    }
}

impl TodoList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        let items = Observable::new(Vec::new());
        let left_count = Computed::from_observable(&items, |items: &Vec<TodoItem>| {
            items.iter().filter(|item| !item.is_done()).count()
        });
        Self { items, left_count }
    }

    /// Shared handle to the items, for building views over the list.
    #[must_use]
    pub fn items(&self) -> &Observable<Vec<TodoItem>> {
        &self.items
    }

    /// Append an item and return its id.
    pub fn add_item(&self, item: TodoItem) -> TodoId {
        let id = item.id();
        self.items.update(|items| items.push(item));
        id
    }

    /// Look an item up by id.
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<TodoItem> {
        self.items
            .with(|items| items.iter().find(|item| item.id() == id).cloned())
    }

    /// Flip the done state of `id`. Returns false if there is no such item.
    pub fn switch_done(&self, id: TodoId) -> bool {
        self.modify(id, TodoItem::switch_done)
    }

    /// Replace the label of `id`. Returns false if there is no such item.
    pub fn relabel(&self, id: TodoId, label: impl Into<String>) -> bool {
        let label = label.into();
        self.modify(id, move |item| item.set_label(label))
    }

    /// Remove every done item, keeping the order of the rest.
    ///
    /// Returns how many items were removed.
    pub fn clear_done(&self) -> usize {
        let before = self.len();
        self.items.update(|items| items.retain(|item| !item.is_done()));
        let removed = before - self.len();
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "todo_list.clear_done", removed, remaining = before - removed);
        removed
    }

    /// Number of items not done yet.
    #[must_use]
    pub fn left_count(&self) -> usize {
        self.left_count.get()
    }

    /// Number of items, done or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.with(Vec::len)
    }

    /// Whether the list has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn modify(&self, id: TodoId, f: impl FnOnce(&mut TodoItem)) -> bool {
        let mut found = false;
        self.items.update(|items| {
            if let Some(item) = items.iter_mut().find(|item| item.id() == id) {
                f(item);
                found = true;
            }
        });
        found
    }
}
