use core::fmt;
use core::mem;
use core::ops::Deref;
use core::ops::DerefMut;

#[cfg(feature = "tracing")]
use core::panic::Location;

#[cfg(feature = "tracing")]
use log::trace;

use crate::release::Release;

#[cfg(feature = "default-release")]
use crate::release::Free;

/// A binding that release its handle when it get dropped
///
/// The handle is reachable via [`Deref`] and [`DerefMut`], writing through them
/// change what will be released.
///
/// [`Deref`]: https://doc.rust-lang.org/std/ops/trait.Deref.html
/// [`DerefMut`]: https://doc.rust-lang.org/std/ops/trait.DerefMut.html
#[must_use = "the handle is released immediately if the binding is not bound to a variable"]
pub struct Autofree<T, R: Release<T>> {
    // Some while active, taken when released
    inner: Option<(T, R)>,

    #[cfg(feature = "tracing")]
    location: &'static Location<'static>,
}

impl<T, R: Release<T>> Autofree<T, R> {
    /// Bind `handle`, `release` will be called with its latest value.
    #[cfg_attr(feature = "tracing", track_caller)]
    pub fn new(handle: T, release: R) -> Autofree<T, R> {
        let binding = Autofree {
            inner: Some((handle, release)),

            #[cfg(feature = "tracing")]
            location: Location::caller(),
        };

        #[cfg(feature = "tracing")]
        trace!("autofree binding at {} is active", binding.location);

        binding
    }

    /// Store a new handle and give back the old one
    ///
    /// The old handle is not released, it is now the caller's business.
    pub fn replace(&mut self, handle: T) -> T {
        mem::replace(&mut **self, handle)
    }
}

#[cfg(feature = "default-release")]
impl<T> Autofree<T, Free> {
    /// Bind `handle` with the default strategy.
    #[cfg_attr(feature = "tracing", track_caller)]
    pub fn with_default(handle: T) -> Autofree<T, Free> {
        Autofree::new(handle, Free)
    }
}

impl<T, R: Release<T>> Drop for Autofree<T, R> {
    fn drop(&mut self) {
        if let Some((handle, release)) = self.inner.take() {
            #[cfg(feature = "tracing")]
            trace!("autofree binding at {} is released", self.location);

            release.release(handle);
        }
    }
}

impl<T, R: Release<T>> Deref for Autofree<T, R> {
    type Target = T;

    fn deref(&self) -> &T {
        match &self.inner {
            Some((handle, _)) => handle,

            // only taken by the destructor
            None => unreachable!(),
        }
    }
}

impl<T, R: Release<T>> DerefMut for Autofree<T, R> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.inner {
            Some((handle, _)) => handle,

            // only taken by the destructor
            None => unreachable!(),
        }
    }
}

impl<T: fmt::Debug, R: Release<T>> fmt::Debug for Autofree<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Autofree").field(&**self).finish()
    }
}

impl<T: fmt::Display, R: Release<T>> fmt::Display for Autofree<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}
