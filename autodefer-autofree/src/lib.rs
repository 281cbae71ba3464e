//! Autofree
//!
//! Bind a resource handle to a variable, and release it when the scope that
//! declared the variable exits, whichever way it is left.
//!
//! The release strategy receive the *latest* value of the variable, not the
//! one it was initialized with, so reassigning the binding is fine.
//!
//! # Example
//!
//! ```rust
//! use autodefer_autofree::autofree;
//!
//! fn main() {
//!     autofree!(let i = Box::new(0), |i: Box<i32>| drop(i));
//!     **i += 1;
//!     println!("{}", i);
//!     // i released here
//! }
//! ```
//!
//! The strategy can be anything, e.g. giving a slot back to a custom allocator:
//!
//! ```rust
//! use std::cell::Cell;
//!
//! use autodefer_autofree::autofree;
//!
//! let freed = Cell::new(0);
//! {
//!     autofree!(let slot = 3usize, |slot: usize| freed.set(slot));
//!     *slot = 5;
//! }
//! assert_eq!(freed.get(), 5);
//! ```

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

mod binding;
mod release;

pub use binding::Autofree;
pub use release::Release;

#[cfg(feature = "default-release")]
pub use release::Free;

/// Declare a mutable binding released when the current block exits
///
/// `autofree!(let name = handle, release)` use the given strategy,
/// `autofree!(let name = handle)` use [`Free`].
///
/// [`Free`]: struct.Free.html
#[cfg(feature = "default-release")]
#[macro_export]
macro_rules! autofree {
    (let $name:ident = $handle:expr, $release:expr $(,)?) => {
        #[allow(unused_mut)]
        let mut $name = $crate::Autofree::new($handle, $release);
    };
    (let $name:ident = $handle:expr $(,)?) => {
        #[allow(unused_mut)]
        let mut $name = $crate::Autofree::with_default($handle);
    };
}

/// Declare a mutable binding released when the current block exits
///
/// `autofree!(let name = handle, release)` use the given strategy, the
/// `default-release` feature is disabled so there is no default one.
///
/// ```rust
/// use autodefer_autofree::autofree;
///
/// autofree!(let name = String::from("x"), |name: String| drop(name));
/// name.push('y');
/// ```
///
/// Leaving out the strategy does not compile:
///
/// ```compile_fail
/// use autodefer_autofree::autofree;
///
/// autofree!(let name = String::from("x"));
/// ```
#[cfg(not(feature = "default-release"))]
#[macro_export]
macro_rules! autofree {
    (let $name:ident = $handle:expr, $release:expr $(,)?) => {
        #[allow(unused_mut)]
        let mut $name = $crate::Autofree::new($handle, $release);
    };
    (let $name:ident = $handle:expr $(,)?) => {
        compile_error!(
            "autofree! needs a release strategy when the `default-release` feature is disabled"
        );
    };
}
