//! Scope guard
//!
//! Run a closure when the enclosing scope is done, whichever way it is left:
//! falling through the end, `return`, `break`, `?`, or a panic unwinding.
//!
//! Several guards in the same scope run in reverse order of registration,
//! because that is the order Rust drops locals.
//!
//! # Example
//!
//! ```rust
//! use autodefer_guard::defer;
//!
//! fn main() {
//!     defer! {
//!         println!("Hello world!!");
//!     }
//!
//!     defer! {
//!         println!("This is executed first");
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

use core::fmt;

#[cfg(feature = "tracing")]
use core::panic::Location;

#[cfg(feature = "tracing")]
use log::trace;

/// Defer the execution until the scope is done
///
/// The body is any list of statements evaluating to `()`. It is bound to a
/// hidden local, so it runs when the block containing the macro exits.
#[macro_export]
macro_rules! defer {
    ($($body:tt)*) => {
        let _guard = $crate::Defer::new(|| {
            let _: () = { $($body)* };
        });
    };
}

/// A guard that run the action when it get dropped
///
/// The action is run exactly once, there is no way to cancel it.
#[must_use = "the action runs immediately if the guard is not bound to a variable"]
pub struct Defer<F: FnOnce()> {
    action: Option<F>,

    #[cfg(feature = "tracing")]
    location: &'static Location<'static>,
}

impl<F: FnOnce()> Defer<F> {
    /// Returns a new guard, `action` is not executed yet.
    #[cfg_attr(feature = "tracing", track_caller)]
    pub fn new(action: F) -> Defer<F> {
        let guard = Defer {
            action: Some(action),

            #[cfg(feature = "tracing")]
            location: Location::caller(),
        };

        #[cfg(feature = "tracing")]
        trace!("{:?} registered", guard);

        guard
    }
}

/// Returns a guard that run `action` when dropped
///
/// Same as [`Defer::new`], handy when the guard is stored in a field or
/// returned to the caller.
///
/// [`Defer::new`]: struct.Defer.html#method.new
#[cfg_attr(feature = "tracing", track_caller)]
pub fn defer<F: FnOnce()>(action: F) -> Defer<F> {
    Defer::new(action)
}

impl<F: FnOnce()> Drop for Defer<F> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            #[cfg(feature = "tracing")]
            trace!("{:?} running", self);

            action();
        }
    }
}

impl<F: FnOnce()> fmt::Debug for Defer<F> {
    #[cfg(feature = "tracing")]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_fmt(format_args!("Defer({})", self.location))
    }

    #[cfg(not(feature = "tracing"))]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Defer")
    }
}
