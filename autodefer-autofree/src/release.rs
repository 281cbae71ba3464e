/// How a handle is released
///
/// Called exactly once, with the latest value of the binding. It must be a
/// no-op on the empty value of the handle (`None`, null pointer, ...), just
/// like `free(NULL)`.
///
/// Any `FnOnce(T)` closure is a strategy.
pub trait Release<T> {
    /// Release the handle.
    fn release(self, handle: T);
}

impl<T, F: FnOnce(T)> Release<T> for F {
    #[inline(always)]
    fn release(self, handle: T) {
        self(handle)
    }
}

/// The default strategy, drop the handle
///
/// Owned handles (`Box`, `Vec`, `String`, ...) give their memory back to the
/// global allocator, `None` is left alone.
#[cfg(feature = "default-release")]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Free;

#[cfg(feature = "default-release")]
impl<T> Release<T> for Free {
    #[inline(always)]
    fn release(self, handle: T) {
        drop(handle);
    }
}
