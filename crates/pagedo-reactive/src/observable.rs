#![forbid(unsafe_code)]

//! Shared, version-tracked values with synchronous change notification.
//!
//! # Failure Modes
//!
//! - **Callback panics**: the value and version are already committed when
//!   callbacks run, so a panicking subscriber leaves the observable
//!   consistent; later subscribers in that cycle are skipped.
//! - **Re-entrant write**: a callback may write the observable that is
//!   notifying it. No borrow is held while callbacks run, so this nests a new
//!   notification cycle instead of panicking.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

struct ObservableInner<T> {
    value: T,
    version: u64,
    /// Held weakly; the strong side lives in the [`Subscription`].
    subscribers: Vec<Weak<Callback<T>>>,
}

/// A shared value that notifies subscribers when it changes.
///
/// Cloning an `Observable` creates a new handle to the **same** value. Handing
/// a clone to a reader gives it a live view without transferring ownership of
/// the writes: the reader can use [`with`](Self::with) and
/// [`subscribe`](Self::subscribe) and simply never call the setters.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Default + Clone + PartialEq + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Wrap an initial value. The version starts at 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone out the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    ///
    /// # Panics
    ///
    /// Panics if `f` writes to this same observable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value, notifying subscribers if it changed.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Mutate the value in place, notifying subscribers if it changed.
    ///
    /// Returns whether the value changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let before = inner.value.clone();
            f(&mut inner.value);
            if inner.value == before {
                false
            } else {
                inner.version += 1;
                true
            }
        };
        if changed {
            self.notify();
        }
        changed
    }

    /// Register a callback that runs after every change.
    ///
    /// The callback stays registered for as long as the returned
    /// [`Subscription`] is alive.
    #[must_use = "dropping the Subscription detaches the callback immediately"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&callback));
        Subscription {
            _callback: Box::new(callback),
        }
    }

    /// Number of changes committed so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of live subscribers. Dead entries are pruned first.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.inner.borrow_mut();
        inner.subscribers.retain(|weak| weak.strong_count() > 0);
        inner.subscribers.len()
    }

    fn notify(&self) {
        let (callbacks, snapshot) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            let callbacks: Vec<Rc<Callback<T>>> =
                inner.subscribers.iter().filter_map(Weak::upgrade).collect();
            (callbacks, inner.value.clone())
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            message = "observable.notify",
            subscribers = callbacks.len(),
            version = self.version()
        );

        for callback in callbacks {
            callback(&snapshot);
        }
    }
}

/// Keeps an [`Observable`] callback registered until dropped.
///
/// Type-erased so that guards for observables of different value types can be
/// stored together.
pub struct Subscription {
    _callback: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_bumps_version_and_notifies() {
        let count = Observable::new(3usize);
        let seen = Rc::new(Cell::new(0usize));
        let seen_clone = Rc::clone(&seen);
        let _sub = count.subscribe(move |v| seen_clone.set(*v));

        count.set(7);
        assert_eq!(count.get(), 7);
        assert_eq!(count.version(), 1);
        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn equal_value_is_a_no_op() {
        let label = Observable::new("Hello".to_string());
        let calls = Rc::new(Cell::new(0u32));
        let calls_clone = Rc::clone(&calls);
        let _sub = label.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));

        label.set("Hello".to_string());
        assert_eq!(label.version(), 0);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn update_reports_change() {
        let items = Observable::new(vec![1, 2, 3]);
        assert!(items.update(|v| v.push(4)));
        assert!(!items.update(|v| v.sort()));
        assert_eq!(items.version(), 1);
        assert_eq!(items.with(Vec::len), 4);
    }

    #[test]
    fn subscribers_run_in_registration_order() {
        let source = Observable::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        let log_a = Rc::clone(&log);
        let _a = source.subscribe(move |_| log_a.borrow_mut().push("a"));
        let log_b = Rc::clone(&log);
        let _b = source.subscribe(move |_| log_b.borrow_mut().push("b"));

        source.set(1);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn dropped_subscription_is_detached() {
        let source = Observable::new(0);
        let calls = Rc::new(Cell::new(0u32));
        let calls_clone = Rc::clone(&calls);
        let sub = source.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));
        assert_eq!(source.subscriber_count(), 1);

        source.set(1);
        drop(sub);
        source.set(2);

        assert_eq!(calls.get(), 1);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn callback_may_write_another_observable() {
        let len = Observable::new(10usize);
        let page = Observable::new(1usize);
        let page_clone = page.clone();
        let _sub = len.subscribe(move |n| {
            if *n == 0 {
                page_clone.set(0);
            }
        });

        len.set(0);
        assert_eq!(page.get(), 0);
    }

    #[test]
    fn callback_may_read_the_notifying_observable() {
        let source = Observable::new(1);
        let reader = source.clone();
        let seen = Rc::new(Cell::new(0));
        let seen_clone = Rc::clone(&seen);
        let _sub = source.subscribe(move |_| seen_clone.set(reader.get()));

        source.set(9);
        assert_eq!(seen.get(), 9);
    }

    #[test]
    fn clones_share_state() {
        let a = Observable::new(1);
        let b = a.clone();
        b.set(2);
        assert_eq!(a.get(), 2);
        assert_eq!(a.version(), b.version());
    }

    #[test]
    fn debug_format() {
        let source = Observable::new(42);
        let dbg = format!("{source:?}");
        assert!(dbg.contains("Observable"));
        assert!(dbg.contains("42"));
    }
}
