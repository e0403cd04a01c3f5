//! Synchronization primitives for extension state.
//!
//! This module provides the conditional mutex handle and the lock backends
//! behind it:
//! - [`FreeThreadingMutex`] — the handle extension structures embed by value,
//! - [`FreeThreadingGuard`] — an RAII guard releasing the handle on drop,
//! - [`RawLock`] — the acquire/release capability both backends implement,
//! - [`NoopLock`] — the zero-sized backend for GIL builds,
//! - [`OsLock`] — the platform mutex backend for free-threading builds.
//!
//! ## Feature Flags
//!
//! - **Default**: [`SelectedLock`] is [`NoopLock`] and every lock operation
//!   compiles away.
//! - **`free-threading`** (or `--cfg Py_GIL_DISABLED`): [`SelectedLock`] is
//!   [`OsLock`].
//!
//! Both backends are always compiled, so a specific one can be named with
//! `FreeThreadingMutex<OsLock>` regardless of the build flag.

mod mutex;
mod noop;
mod os;
mod raw;

pub use mutex::{FreeThreadingGuard, FreeThreadingMutex};
pub use noop::NoopLock;
pub use os::OsLock;
pub use raw::RawLock;

/// Backend used by [`FreeThreadingMutex`] when none is named.
#[cfg(any(feature = "free-threading", Py_GIL_DISABLED))]
pub type SelectedLock = OsLock;

/// Backend used by [`FreeThreadingMutex`] when none is named.
#[cfg(not(any(feature = "free-threading", Py_GIL_DISABLED)))]
pub type SelectedLock = NoopLock;
