/// Acquire/release capability behind [`FreeThreadingMutex`](super::FreeThreadingMutex).
///
/// # Safety
///
/// When [`ENFORCING`](Self::ENFORCING) is `true`, an implementation must
/// guarantee that at most one thread holds the lock between a successful
/// `acquire`/`try_acquire` and the matching `release`, and that `release`
/// synchronizes-with the next successful acquisition.
///
/// Implementations with `ENFORCING == false` make no such promise. Callers
/// that rely on exclusion must check the constant or hold some outer lock
/// (such as the interpreter's GIL) themselves.
pub unsafe trait RawLock: Default + Send + Sync {
    /// Whether this lock actually excludes other threads.
    const ENFORCING: bool;

    /// Blocks the current thread until the lock is held.
    fn acquire(&self);

    /// Takes the lock if it is free, without blocking.
    ///
    /// Returns `true` if the lock is now held by the calling thread.
    fn try_acquire(&self) -> bool;

    /// Releases the lock.
    ///
    /// # Safety
    ///
    /// The lock must be held by the calling thread, obtained through
    /// [`acquire`](Self::acquire) or a successful
    /// [`try_acquire`](Self::try_acquire).
    unsafe fn release(&self);
}
