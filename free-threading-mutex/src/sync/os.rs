use std::cell::UnsafeCell;
use std::fmt;
use std::mem::ManuallyDrop;
use std::process;

use log::{error, warn};

use super::RawLock;
use crate::sys::platform::{
    MUTEX_INIT, RawMutex, sys_mutex_destroy, sys_mutex_lock, sys_mutex_trylock, sys_mutex_unlock,
};

/// Lock backend wrapping the platform mutex.
///
/// Used by free-threading builds, where nothing else serializes access to
/// extension state. The native object is heap-allocated so that moving the
/// owning structure never moves a mutex the platform may have handed out
/// addresses for.
///
/// Platform failures are not reported to callers. They are logged through
/// the `log` facade; a failed `acquire` aborts the process, since returning
/// would let the caller run its critical section unprotected.
pub struct OsLock {
    /// The platform mutex.
    ///
    /// `ManuallyDrop` lets `Drop` leak the allocation when the mutex is
    /// still held.
    inner: ManuallyDrop<Box<UnsafeCell<RawMutex>>>,
}

// Safety: the platform mutex is designed to be shared between threads, and
// it is only ever accessed through the `sys_mutex_*` functions.
unsafe impl Send for OsLock {}
// Safety: see above.
unsafe impl Sync for OsLock {}

impl OsLock {
    /// Creates an unlocked mutex.
    pub fn new() -> Self {
        Self {
            inner: ManuallyDrop::new(Box::new(UnsafeCell::new(MUTEX_INIT))),
        }
    }

    fn raw(&self) -> *mut RawMutex {
        self.inner.get()
    }
}

impl Default for OsLock {
    fn default() -> Self {
        Self::new()
    }
}

// Safety: `sys_mutex_lock` only returns `Ok` once the calling thread owns
// the platform mutex, and a failed lock never returns to the caller.
unsafe impl RawLock for OsLock {
    const ENFORCING: bool = true;

    fn acquire(&self) {
        // Safety: `inner` is boxed and only freed in `Drop`.
        if let Err(e) = unsafe { sys_mutex_lock(self.raw()) } {
            if log::log_enabled!(log::Level::Error) {
                error!("OsLock failed to acquire the platform mutex: {}", e);
            }
            process::abort();
        }
    }

    fn try_acquire(&self) -> bool {
        // Safety: see `acquire`.
        match unsafe { sys_mutex_trylock(self.raw()) } {
            Ok(acquired) => acquired,
            Err(e) => {
                if log::log_enabled!(log::Level::Error) {
                    error!("OsLock failed to poll the platform mutex: {}", e);
                }
                false
            }
        }
    }

    unsafe fn release(&self) {
        // Safety: the caller owns the mutex.
        if let Err(e) = unsafe { sys_mutex_unlock(self.raw()) } {
            if log::log_enabled!(log::Level::Error) {
                error!("OsLock failed to release the platform mutex: {}", e);
            }
        }
    }
}

impl Drop for OsLock {
    fn drop(&mut self) {
        let raw = self.raw();

        // A guard passed to `mem::forget` leaves the mutex locked, and
        // destroying a locked mutex is undefined.
        // Safety: `&mut self` rules out any other user of the mutex.
        let unlocked = matches!(unsafe { sys_mutex_trylock(raw) }, Ok(true));

        if !unlocked {
            if log::log_enabled!(log::Level::Warn) {
                warn!("OsLock dropped while locked, leaking the platform mutex");
            }
            return;
        }

        // Safety: locked by the `trylock` above, on this thread.
        let finalized = unsafe { sys_mutex_unlock(raw) }
            // Safety: unlocked just above and never used again.
            .and_then(|()| unsafe { sys_mutex_destroy(raw) });

        if let Err(e) = finalized {
            if log::log_enabled!(log::Level::Warn) {
                warn!("OsLock failed to destroy the platform mutex: {}", e);
            }
        }

        // Safety: `inner` is not touched after this point.
        unsafe { ManuallyDrop::drop(&mut self.inner) };
    }
}

impl fmt::Debug for OsLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OsLock").finish_non_exhaustive()
    }
}
