//! Defer block and autofree binding.
//!
//! Two ways to tie code to the end of a scope:
//!
//! * [`defer!`] run a block when the scope exits, several blocks in one
//!   scope run last registered first. Use [`ExitStack`] (or [`scope`]) when
//!   the number of blocks is only known at run time.
//! * [`autofree!`] bind a resource handle to a variable, and release the
//!   latest value of the variable when the scope exits.
//!
//! Both run on every exit path: falling through the end, `return`, `break`,
//! `?`, or a panic unwinding. Nothing can cancel them once registered.
//!
//! [`defer!`]: macro.defer.html
//! [`autofree!`]: macro.autofree.html
//! [`ExitStack`]: struct.ExitStack.html
//! [`scope`]: fn.scope.html
//!
//! # Example
//!
//! ```rust
//! use autodefer::{autofree, defer};
//!
//! fn defer_example() -> i32 {
//!     autofree!(let i = Box::new(0), |i: Box<i32>| drop(i));
//!     **i += 1;
//!
//!     defer! {
//!         println!("Hello world!!");
//!     }
//!
//!     defer! {
//!         println!("This is executed first");
//!     }
//!
//!     **i
//! }
//!
//! assert_eq!(defer_example(), 1);
//! ```
//!
//! # Features
//!
//! * `default-release` (on by default): [`Free`] and the one argument
//!   `autofree!`. Disable it to force every binding to bring its own
//!   [`Release`] strategy, e.g. when the handle comes from a custom allocator.
//! * `tracing`: `trace!()` when actions are registered and run.
//!
//! [`Free`]: struct.Free.html
//! [`Release`]: trait.Release.html

#![no_std]
#![forbid(unsafe_code)]

pub use autodefer_guard::defer;
pub use autodefer_guard::Defer;

pub use autodefer_stack::scope;
pub use autodefer_stack::ExitStack;

pub use autodefer_autofree::autofree;
pub use autodefer_autofree::Autofree;
pub use autodefer_autofree::Release;

#[cfg(feature = "default-release")]
pub use autodefer_autofree::Free;
