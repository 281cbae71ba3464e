//! Exit stack
//!
//! An explicit stack of actions for when the number of cleanups is only known
//! at run time, e.g. one per item acquired in a loop.
//!
//! Actions are pushed while the scope runs, and popped and run when the stack
//! is dropped, last pushed first.
//!
//! # Example
//!
//! ```rust
//! let order = std::cell::RefCell::new(Vec::new());
//!
//! autodefer_stack::scope(|exits| {
//!     for i in 0..3 {
//!         let order = &order;
//!         exits.push(move || order.borrow_mut().push(i));
//!     }
//! });
//!
//! assert_eq!(*order.borrow(), vec![2, 1, 0]);
//! ```

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::mem::forget;

#[cfg(feature = "tracing")]
use log::trace;

type Action<'a> = Box<dyn FnOnce() + 'a>;

/// A stack of actions run when it get dropped
///
/// Not [`Send`] nor [`Sync`], it belongs to the scope that created it.
///
/// [`Send`]: https://doc.rust-lang.org/std/marker/trait.Send.html
/// [`Sync`]: https://doc.rust-lang.org/std/marker/trait.Sync.html
#[must_use = "the stack is drained immediately if it is not bound to a variable"]
pub struct ExitStack<'a> {
    actions: Vec<Action<'a>>,
}

impl<'a> ExitStack<'a> {
    /// Returns a new empty stack.
    pub fn new() -> ExitStack<'a> {
        ExitStack {
            actions: Vec::new(),
        }
    }

    /// Push an action, it is not executed yet.
    #[cfg_attr(feature = "tracing", track_caller)]
    pub fn push(&mut self, action: impl FnOnce() + 'a) {
        self.actions.push(Box::new(action));

        #[cfg(feature = "tracing")]
        trace!(
            "action #{} pushed to {:?} at {}",
            self.actions.len(),
            self,
            core::panic::Location::caller()
        );
    }

    /// Number of pending actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Is there no pending action ?
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ExitStack<'_> {
    fn default() -> Self {
        ExitStack::new()
    }
}

impl Drop for ExitStack<'_> {
    fn drop(&mut self) {
        #[cfg(feature = "tracing")]
        trace!("{:?} draining", self);

        drop(Drain(&mut self.actions));
    }
}

impl fmt::Debug for ExitStack<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ExitStack")
            .field("pending", &self.actions.len())
            .finish()
    }
}

// pop and run every action when dropped
struct Drain<'s, 'a>(&'s mut Vec<Action<'a>>);

impl Drop for Drain<'_, '_> {
    fn drop(&mut self) {
        while let Some(action) = self.0.pop() {
            // when the action panic, `rest` is dropped while unwinding
            // and keep running the remaining actions
            let rest = Drain(&mut *self.0);

            action();

            forget(rest);
        }
    }
}

/// Run `body` with a fresh [`ExitStack`], drain it when `body` is done
///
/// The stack is drained whether `body` returns or panics, and the value
/// returned by `body` is returned after all actions have run.
///
/// [`ExitStack`]: struct.ExitStack.html
pub fn scope<'a, R>(body: impl FnOnce(&mut ExitStack<'a>) -> R) -> R {
    let mut exits = ExitStack::new();
    body(&mut exits)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::cell::RefCell;
    use std::panic::catch_unwind;
    use std::panic::AssertUnwindSafe;

    use autodefer_guard::defer;
    use crossbeam_channel::unbounded;
    use crossbeam_utils::thread;

    use super::*;

    #[test]
    fn empty_stack_is_noop() {
        let exits = ExitStack::new();
        assert!(exits.is_empty());
        assert_eq!(exits.len(), 0);
        drop(exits);
    }

    #[test]
    fn push_does_not_run() {
        let runs = Cell::new(0);
        let mut exits = ExitStack::new();
        exits.push(|| runs.set(runs.get() + 1));
        exits.push(|| runs.set(runs.get() + 1));
        assert_eq!(exits.len(), 2);
        assert_eq!(runs.get(), 0);
        drop(exits);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn reverse_order_for_every_n() {
        for n in 0..16 {
            let order = RefCell::new(Vec::new());
            scope(|exits| {
                for i in 0..n {
                    let order = &order;
                    exits.push(move || order.borrow_mut().push(i));
                }
            });
            let expected: Vec<usize> = (0..n).rev().collect();
            assert_eq!(*order.borrow(), expected);
        }
    }

    #[test]
    fn scope_returns_after_drain() {
        let runs = Cell::new(0);
        let value = scope(|exits| {
            exits.push(|| runs.set(runs.get() + 1));
            assert_eq!(runs.get(), 0);
            42
        });
        assert_eq!(value, 42);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn early_return_from_scope() {
        let order = RefCell::new(Vec::new());
        scope(|exits| {
            for i in 0..10 {
                let order = &order;
                exits.push(move || order.borrow_mut().push(i));
                if i == 3 {
                    return;
                }
            }
            unreachable!();
        });
        assert_eq!(*order.borrow(), vec![3, 2, 1, 0]);
    }

    #[test]
    fn loop_iterations_are_independent() {
        let order = RefCell::new(Vec::new());
        for k in 0..3 {
            let mut exits = ExitStack::new();
            let order = &order;
            exits.push(move || order.borrow_mut().push((k, 'a')));
            exits.push(move || order.borrow_mut().push((k, 'b')));
        }
        assert_eq!(
            *order.borrow(),
            vec![
                (0, 'b'),
                (0, 'a'),
                (1, 'b'),
                (1, 'a'),
                (2, 'b'),
                (2, 'a'),
            ]
        );
    }

    #[test]
    fn unwinding_drains() {
        let runs = Cell::new(0);
        let result = catch_unwind(AssertUnwindSafe(|| {
            scope(|exits| {
                exits.push(|| runs.set(runs.get() + 1));
                panic!("boom");
            })
        }));
        assert!(result.is_err());
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn panicking_action_does_not_skip_the_rest() {
        let order = RefCell::new(Vec::new());
        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut exits = ExitStack::new();
            exits.push(|| order.borrow_mut().push(1));
            exits.push(|| panic!("action failed"));
            exits.push(|| order.borrow_mut().push(3));
        }));
        assert!(result.is_err());
        assert_eq!(*order.borrow(), vec![3, 1]);
    }

    #[test]
    fn nested_with_guards() {
        let order = RefCell::new(Vec::new());
        scope(|outer| {
            outer.push(|| order.borrow_mut().push("outer stack"));
            defer!(order.borrow_mut().push("outer guard"));
            scope(|inner| {
                inner.push(|| order.borrow_mut().push("inner 1"));
                inner.push(|| order.borrow_mut().push("inner 2"));
            });
        });
        assert_eq!(
            *order.borrow(),
            vec!["inner 2", "inner 1", "outer guard", "outer stack"]
        );
    }

    #[test]
    fn threads_do_not_share_stacks() {
        let (tx, rx) = unbounded();

        thread::scope(|s| {
            for t in 0..4 {
                let tx = tx.clone();
                s.spawn(move |_| {
                    scope(|exits| {
                        for i in 0..5 {
                            let tx = tx.clone();
                            exits.push(move || tx.send((t, i)).unwrap());
                        }
                    });
                });
            }
        })
        .unwrap();

        let sent: Vec<(i32, i32)> = rx.try_iter().collect();
        assert_eq!(sent.len(), 20);
        for t in 0..4 {
            let per_thread: Vec<i32> = sent
                .iter()
                .filter(|(from, _)| *from == t)
                .map(|(_, i)| *i)
                .collect();
            assert_eq!(per_thread, vec![4, 3, 2, 1, 0]);
        }
    }
}
