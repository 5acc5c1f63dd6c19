#![forbid(unsafe_code)]

//! Lazy computed values that follow [`Observable`] dependencies.
//!
//! A [`Computed<T>`] caches the result of its compute function. Any source
//! change only flips a dirty flag; the function runs again on the next read.
//! The cache also records the summed versions of its sources, so a read from
//! a callback that runs before the dirty flag is flipped still recomputes.
//!
//! # Invariants
//!
//! 1. A read never returns a value older than the last committed source
//!    mutation, even from inside that mutation's notification cycle.
//! 2. The compute function runs at most once per dirty cycle.
//! 3. Version increments by exactly 1 per recomputation.
//!
//! # Failure Modes
//!
//! - **Compute function panics**: the previous cache is kept and the dirty
//!   flag stays set, so the next read retries.
//! - **Source dropped**: the subscription goes inert; the last cached result
//!   is kept and never becomes dirty again from that source.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::observable::{Observable, Subscription};

struct ComputedInner<T> {
    compute: Box<dyn Fn() -> T>,
    /// Sum of the source versions; versions only grow, so any change moves it.
    stamp: Box<dyn Fn() -> u64>,
    /// `None` only before the first read.
    cached: Option<T>,
    cached_stamp: u64,
    dirty: Cell<bool>,
    version: u64,
    /// Never read; kept alive so the sources keep marking us dirty.
    _subscriptions: Vec<Subscription>,
}

/// A memoized value derived from one or more [`Observable`]s.
///
/// Cloning a `Computed` creates a new handle to the **same** cache.
pub struct Computed<T> {
    inner: Rc<RefCell<ComputedInner<T>>>,
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Computed")
            .field("cached", &inner.cached)
            .field("dirty", &inner.dirty.get())
            .field("version", &inner.version)
            .finish()
    }
}

/// Subscribe to `source` so that every change marks `target` dirty.
fn mark_dirty_on<S, T>(source: &Observable<S>, target: Weak<RefCell<ComputedInner<T>>>) -> Subscription
where
    S: Clone + PartialEq + 'static,
    T: 'static,
{
    source.subscribe(move |_| {
        if let Some(strong) = target.upgrade() {
            // `try_borrow` guards against a source written from inside our own
            // compute function; the cache is rebuilt on the next read anyway.
            if let Ok(inner) = strong.try_borrow() {
                inner.dirty.set(true);
            }
        }
    })
}

impl<T: Clone + 'static> Computed<T> {
    fn empty(compute: Box<dyn Fn() -> T>, stamp: Box<dyn Fn() -> u64>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ComputedInner {
                compute,
                stamp,
                cached: None,
                cached_stamp: 0,
                dirty: Cell::new(true),
                version: 0,
                _subscriptions: Vec::new(),
            })),
        }
    }

    /// Derive a value from a single observable.
    pub fn from_observable<S: Clone + PartialEq + 'static>(
        source: &Observable<S>,
        map: impl Fn(&S) -> T + 'static,
    ) -> Self {
        let source_clone = source.clone();
        let stamp_source = source.clone();
        let computed = Self::empty(
            Box::new(move || source_clone.with(&map)),
            Box::new(move || stamp_source.version()),
        );
        let sub = mark_dirty_on(source, Rc::downgrade(&computed.inner));
        computed.inner.borrow_mut()._subscriptions.push(sub);
        computed
    }

    /// Derive a value from two observables.
    pub fn from2<S1, S2>(
        s1: &Observable<S1>,
        s2: &Observable<S2>,
        map: impl Fn(&S1, &S2) -> T + 'static,
    ) -> Self
    where
        S1: Clone + PartialEq + 'static,
        S2: Clone + PartialEq + 'static,
    {
        let s1_clone = s1.clone();
        let s2_clone = s2.clone();
        let (stamp1, stamp2) = (s1.clone(), s2.clone());
        let computed = Self::empty(
            Box::new(move || s1_clone.with(|v1| s2_clone.with(|v2| map(v1, v2)))),
            Box::new(move || stamp1.version() + stamp2.version()),
        );
        let sub1 = mark_dirty_on(s1, Rc::downgrade(&computed.inner));
        let sub2 = mark_dirty_on(s2, Rc::downgrade(&computed.inner));
        {
            let mut inner = computed.inner.borrow_mut();
            inner._subscriptions.push(sub1);
            inner._subscriptions.push(sub2);
        }
        computed
    }

    fn refresh(&self) {
        let mut inner = self.inner.borrow_mut();
        let stamp = (inner.stamp)();
        if inner.dirty.get() || inner.cached.is_none() || inner.cached_stamp != stamp {
            let value = (inner.compute)();
            inner.cached = Some(value);
            inner.cached_stamp = stamp;
            inner.dirty.set(false);
            inner.version += 1;
        }
    }

    /// Current value, recomputed first if any source changed.
    #[must_use]
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    /// Borrow the current value without cloning it.
    ///
    /// # Panics
    ///
    /// Panics if `f` reads this same `Computed` (re-entrant borrow).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.refresh();
        let inner = self.inner.borrow();
        match inner.cached.as_ref() {
            Some(value) => f(value),
            None => unreachable!("refresh always fills the cache"),
        }
    }

    /// Whether the cached value is stale.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        let inner = self.inner.borrow();
        inner.dirty.get() || inner.cached_stamp != (inner.stamp)()
    }

    /// Number of recomputations so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }
}
