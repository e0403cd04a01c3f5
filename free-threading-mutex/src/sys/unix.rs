use libc::{
    EBUSY, PTHREAD_MUTEX_INITIALIZER, c_int, pthread_mutex_destroy, pthread_mutex_lock,
    pthread_mutex_t, pthread_mutex_trylock, pthread_mutex_unlock,
};
use std::io;

/// Native mutex object.
pub(crate) type RawMutex = pthread_mutex_t;

/// Statically initialized, unlocked mutex with default attributes.
pub(crate) const MUTEX_INIT: RawMutex = PTHREAD_MUTEX_INITIALIZER;

/// Blocks until the mutex is owned by the calling thread.
///
/// # Safety
///
/// `mutex` must point to a live, initialized mutex that has not been moved
/// since its first use.
pub(crate) unsafe fn sys_mutex_lock(mutex: *mut RawMutex) -> io::Result<()> {
    cvt(unsafe { pthread_mutex_lock(mutex) })
}

/// Attempts to take the mutex without blocking.
///
/// Returns `Ok(false)` when another thread holds it.
///
/// # Safety
///
/// Same requirements as [`sys_mutex_lock`].
pub(crate) unsafe fn sys_mutex_trylock(mutex: *mut RawMutex) -> io::Result<bool> {
    match unsafe { pthread_mutex_trylock(mutex) } {
        0 => Ok(true),
        EBUSY => Ok(false),
        rc => Err(io::Error::from_raw_os_error(rc)),
    }
}

/// Releases the mutex.
///
/// # Safety
///
/// The calling thread must currently own `mutex`.
pub(crate) unsafe fn sys_mutex_unlock(mutex: *mut RawMutex) -> io::Result<()> {
    cvt(unsafe { pthread_mutex_unlock(mutex) })
}

/// Finalizes the mutex.
///
/// # Safety
///
/// `mutex` must be unlocked and must not be used again afterwards.
pub(crate) unsafe fn sys_mutex_destroy(mutex: *mut RawMutex) -> io::Result<()> {
    cvt(unsafe { pthread_mutex_destroy(mutex) })
}

/// pthread functions return the error code instead of setting `errno`.
fn cvt(rc: c_int) -> io::Result<()> {
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::from_raw_os_error(rc))
    }
}
