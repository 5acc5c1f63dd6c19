#![forbid(unsafe_code)]

//! Reactive data bindings for pagedo.
//!
//! - [`Observable`]: a shared, version-tracked value with change notification.
//! - [`Subscription`]: RAII guard that detaches its callback on drop.
//! - [`Computed`]: a lazily evaluated, memoized value derived from observables.
//!
//! # Architecture
//!
//! Everything is `Rc<RefCell<..>>` based and therefore single-threaded. A value
//! owner mutates through [`Observable::set`] or [`Observable::update`]; every
//! subscriber runs synchronously before that call returns. Derived state that
//! must never be observed stale (such as a pager's page index) is corrected
//! inside that notification.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Writing a value equal to the current one is a no-op.
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//! 5. `Computed::get()` never returns a stale value.

pub mod computed;
pub mod observable;

pub use computed::Computed;
pub use observable::{Observable, Subscription};
