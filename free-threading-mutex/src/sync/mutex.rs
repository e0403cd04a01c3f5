use std::fmt;
use std::marker::PhantomData;

use super::{RawLock, SelectedLock};

/// A mutex that only locks when the interpreter has no GIL.
///
/// Extension structures embed `FreeThreadingMutex` by value next to the
/// state it guards. With the default backend it is zero-sized in GIL builds
/// and wraps a platform mutex in free-threading builds.
///
/// The lock does not own the guarded data: which fields it protects is up to
/// the embedding structure.
///
/// # Example
///
/// ```rust
/// use free_threading_mutex::FreeThreadingMutex;
///
/// let mutex = FreeThreadingMutex::new();
///
/// mutex.acquire();
/// // SAFETY: acquired just above on this thread.
/// unsafe { mutex.release() };
///
/// let guard = mutex.lock();
/// drop(guard);
/// ```
pub struct FreeThreadingMutex<L: RawLock = SelectedLock> {
    raw: L,
}

impl FreeThreadingMutex {
    /// Creates an unlocked mutex with the backend selected at build time.
    pub fn new() -> Self {
        Self::with_raw(SelectedLock::default())
    }
}

impl<L: RawLock> FreeThreadingMutex<L> {
    /// Wraps an explicit backend.
    pub fn with_raw(raw: L) -> Self {
        Self { raw }
    }

    /// Returns `true` if this mutex actually excludes other threads.
    pub const fn is_enforcing(&self) -> bool {
        L::ENFORCING
    }

    /// Blocks the current thread until the mutex is held.
    ///
    /// No-op when the backend does not enforce exclusion.
    #[inline]
    pub fn acquire(&self) {
        self.raw.acquire();
    }

    /// Takes the mutex if it is free, without blocking.
    #[inline]
    pub fn try_acquire(&self) -> bool {
        self.raw.try_acquire()
    }

    /// Releases the mutex.
    ///
    /// No-op when the backend does not enforce exclusion.
    ///
    /// # Safety
    ///
    /// The mutex must be held by the calling thread through
    /// [`acquire`](Self::acquire) or a successful
    /// [`try_acquire`](Self::try_acquire), and not through a guard.
    #[inline]
    pub unsafe fn release(&self) {
        // Safety: forwarded to the caller.
        unsafe { self.raw.release() };
    }

    /// Acquires the mutex and returns a guard releasing it on drop.
    pub fn lock(&self) -> FreeThreadingGuard<'_, L> {
        self.acquire();
        FreeThreadingGuard::new(self)
    }

    /// Like [`lock`](Self::lock), but returns `None` instead of blocking.
    pub fn try_lock(&self) -> Option<FreeThreadingGuard<'_, L>> {
        if self.try_acquire() {
            Some(FreeThreadingGuard::new(self))
        } else {
            None
        }
    }
}

impl<L: RawLock> Default for FreeThreadingMutex<L> {
    fn default() -> Self {
        Self::with_raw(L::default())
    }
}

impl<L: RawLock> fmt::Debug for FreeThreadingMutex<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreeThreadingMutex")
            .field("enforcing", &L::ENFORCING)
            .finish()
    }
}

/// Guard returned by [`FreeThreadingMutex::lock`].
///
/// Releases the mutex when dropped. The guard cannot leave the thread that
/// acquired it, since platform mutexes must be unlocked by their owner.
#[must_use = "if unused the mutex is released immediately"]
pub struct FreeThreadingGuard<'a, L: RawLock = SelectedLock> {
    mutex: &'a FreeThreadingMutex<L>,
    _not_send: PhantomData<*const ()>,
}

impl<'a, L: RawLock> FreeThreadingGuard<'a, L> {
    fn new(mutex: &'a FreeThreadingMutex<L>) -> Self {
        Self {
            mutex,
            _not_send: PhantomData,
        }
    }
}

// Safety: the guard exposes nothing but a shared reference to a `Sync` mutex.
unsafe impl<L: RawLock> Sync for FreeThreadingGuard<'_, L> {}

impl<L: RawLock> Drop for FreeThreadingGuard<'_, L> {
    fn drop(&mut self) {
        // Safety: a guard only exists while its thread holds the mutex.
        unsafe { self.mutex.release() };
    }
}

impl<L: RawLock> fmt::Debug for FreeThreadingGuard<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreeThreadingGuard")
            .field("mutex", self.mutex)
            .finish()
    }
}
