#![forbid(unsafe_code)]

//! Self-correcting paginator over a live, externally owned collection.
//!
//! # Invariants
//!
//! 1. Either the collection is empty and the page is 0, or
//!    `page * items_per_page < len`.
//! 2. The page changes only through [`Paginator::prev_page`],
//!    [`Paginator::next_page`] or self-correction after a length change.
//! 3. The paginator never writes to the collection.
//!
//! # Self-correction
//!
//! When the collection length drops to `page * items_per_page` or below, the
//! page moves to the last non-empty page. The paginator subscribes to the
//! collection and applies this inside the change notification, so it has
//! happened by the time the owner's `set`/`update` call returns. Every derived
//! read additionally clamps through [`corrected_page`], and the cached page
//! slice is rebuilt whenever the collection version moved, which covers
//! readers that run inside an earlier subscriber of the same notification
//! cycle.

use std::fmt;

use pagedo_reactive::{Computed, Observable, Subscription};

/// Page size used by [`Paginator::new`].
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Page index after applying the self-correction rule.
///
/// Returns `page` unchanged while it still starts inside the collection;
/// otherwise the index of the last non-empty page (0 for an empty collection).
#[must_use]
pub const fn corrected_page(len: usize, items_per_page: usize, page: usize) -> usize {
    if len <= page.saturating_mul(items_per_page) {
        len.saturating_sub(1) / items_per_page
    } else {
        page
    }
}

/// Derives a bounded page view over a shared collection.
///
/// The collection is an [`Observable<Vec<T>>`] owned by someone else; the
/// paginator keeps a read-only handle to it.
pub struct Paginator<T> {
    items: Observable<Vec<T>>,
    items_per_page: usize,
    page: Observable<usize>,
    page_items: Computed<Vec<T>>,
    _length_watch: Subscription,
}

impl<T: fmt::Debug + Clone + PartialEq + 'static> fmt::Debug for Paginator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("items_length", &self.items_length())
            .field("items_per_page", &self.items_per_page)
            .field("page_number", &self.page_number())
            .finish_non_exhaustive()
    }
}

impl<T: Clone + PartialEq + 'static> Paginator<T> {
    /// Paginate `items` with [`DEFAULT_ITEMS_PER_PAGE`] items per page.
    #[must_use]
    pub fn new(items: &Observable<Vec<T>>) -> Self {
        Self::with_page_size(items, DEFAULT_ITEMS_PER_PAGE)
    }

    /// Paginate `items` with `items_per_page` items per page.
    ///
    /// # Panics
    ///
    /// Panics if `items_per_page` is zero.
    #[must_use]
    pub fn with_page_size(items: &Observable<Vec<T>>, items_per_page: usize) -> Self {
        assert!(items_per_page > 0, "items_per_page must be positive");

        let page = Observable::new(0usize);

        let page_items = Computed::from2(items, &page, move |items: &Vec<T>, page: &usize| {
            let page = corrected_page(items.len(), items_per_page, *page);
            let (start, end) = page_window(items.len(), items_per_page, page);
            items[start..end].to_vec()
        });

        let page_handle = page.clone();
        let length_watch = items.subscribe(move |items: &Vec<T>| {
            let current = page_handle.get();
            let corrected = corrected_page(items.len(), items_per_page, current);
            if corrected != current {
                #[cfg(feature = "tracing")]
                log_page_change("self_correct", current, corrected, items.len());
                page_handle.set(corrected);
            }
        });

        Self {
            items: items.clone(),
            items_per_page,
            page,
            page_items,
            _length_watch: length_watch,
        }
    }

    /// Fixed page size.
    #[must_use]
    pub const fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Zero-based index of the current page.
    #[must_use]
    pub fn page_number(&self) -> usize {
        corrected_page(self.items_length(), self.items_per_page, self.page.get())
    }

    /// Length of the underlying collection.
    #[must_use]
    pub fn items_length(&self) -> usize {
        self.items.with(Vec::len)
    }

    /// Items on the current page, in collection order.
    #[must_use]
    pub fn paginated_items(&self) -> Vec<T> {
        self.page_items.get()
    }

    /// Borrow the current page's items without cloning them.
    pub fn with_paginated_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        self.page_items.with(|items| f(items.as_slice()))
    }

    /// Whether [`prev_page`](Self::prev_page) would move.
    #[must_use]
    pub fn prev_page_possible(&self) -> bool {
        self.page_number() > 0
    }

    /// Whether [`next_page`](Self::next_page) would move.
    #[must_use]
    pub fn next_page_possible(&self) -> bool {
        (self.page_number() + 1) * self.items_per_page < self.items_length()
    }

    /// One-based number of the first item shown, or 0 when there is nothing.
    #[must_use]
    pub fn first_display_item_number(&self) -> usize {
        if self.items_length() > 0 {
            self.page_number() * self.items_per_page + 1
        } else {
            0
        }
    }

    /// One-based number of the last item shown, or 0 when there is nothing.
    #[must_use]
    pub fn last_display_item_number(&self) -> usize {
        let shown = self.page_items.with(Vec::len);
        self.page_number() * self.items_per_page + shown
    }

    /// Number of non-empty pages; 0 for an empty collection.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.items_length().div_ceil(self.items_per_page)
    }

    /// Move to the previous page. No-op on the first page.
    ///
    /// Returns whether the page changed.
    pub fn prev_page(&self) -> bool {
        if !self.prev_page_possible() {
            return false;
        }
        let from = self.page_number();
        #[cfg(feature = "tracing")]
        log_page_change("prev", from, from - 1, self.items_length());
        self.page.set(from - 1);
        true
    }

    /// Move to the next page. No-op on the last page.
    ///
    /// Returns whether the page changed.
    pub fn next_page(&self) -> bool {
        if !self.next_page_possible() {
            return false;
        }
        let from = self.page_number();
        #[cfg(feature = "tracing")]
        log_page_change("next", from, from + 1, self.items_length());
        self.page.set(from + 1);
        true
    }
}

/// `[start, end)` indices of `page` within a collection of `len` items.
fn page_window(len: usize, items_per_page: usize, page: usize) -> (usize, usize) {
    let start = page.saturating_mul(items_per_page).min(len);
    let end = start.saturating_add(items_per_page).min(len);
    (start, end)
}

#[cfg(feature = "tracing")]
fn log_page_change(reason: &str, from: usize, to: usize, items_length: usize) {
    tracing::debug!(message = "paginator.page", reason, from, to, items_length);
}
