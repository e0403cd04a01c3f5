//! Windows platform mutex.
//!
//! Mirrors the Unix layer on top of slim reader/writer locks used in
//! exclusive mode only. An `SRWLOCK` cannot fail and owns no kernel
//! resource, so every function here returns `Ok`.

use std::io;
use std::ptr;

use windows_sys::Win32::System::Threading::{
    AcquireSRWLockExclusive, ReleaseSRWLockExclusive, SRWLOCK, TryAcquireSRWLockExclusive,
};

/// Native mutex object.
pub(crate) type RawMutex = SRWLOCK;

/// Unlocked lock, equivalent to `SRWLOCK_INIT`.
pub(crate) const MUTEX_INIT: RawMutex = SRWLOCK {
    Ptr: ptr::null_mut(),
};

/// Blocks until the lock is owned by the calling thread.
///
/// # Safety
///
/// `mutex` must point to a live, initialized lock.
pub(crate) unsafe fn sys_mutex_lock(mutex: *mut RawMutex) -> io::Result<()> {
    unsafe { AcquireSRWLockExclusive(mutex) };
    Ok(())
}

/// Attempts to take the lock without blocking.
///
/// # Safety
///
/// Same requirements as [`sys_mutex_lock`].
pub(crate) unsafe fn sys_mutex_trylock(mutex: *mut RawMutex) -> io::Result<bool> {
    let acquired = unsafe { TryAcquireSRWLockExclusive(mutex) };

    // BOOLEAN is `u8` or `bool` depending on the windows-sys release.
    Ok(acquired != Default::default())
}

/// Releases the lock.
///
/// # Safety
///
/// The calling thread must currently own `mutex`.
pub(crate) unsafe fn sys_mutex_unlock(mutex: *mut RawMutex) -> io::Result<()> {
    unsafe { ReleaseSRWLockExclusive(mutex) };
    Ok(())
}

/// SRW locks need no finalization.
///
/// # Safety
///
/// `mutex` must be unlocked and must not be used again afterwards.
pub(crate) unsafe fn sys_mutex_destroy(_mutex: *mut RawMutex) -> io::Result<()> {
    Ok(())
}
