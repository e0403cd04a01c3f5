//! Platform mutex primitives.
//!
//! This module exposes the native mutual-exclusion object of the target
//! platform behind a small set of free functions:
//! - `sys_mutex_lock` / `sys_mutex_trylock` / `sys_mutex_unlock`,
//! - `sys_mutex_destroy` to finalize the object before its storage is freed.
//!
//! Every function reports failures as [`std::io::Error`] built from the
//! platform error code. The concrete implementation is selected at compile
//! time depending on the target operating system.

#[cfg(unix)]
pub(crate) mod unix;

#[cfg(unix)]
pub(crate) use unix as platform;

#[cfg(windows)]
pub(crate) mod windows;

#[cfg(windows)]
pub(crate) use windows as platform;
