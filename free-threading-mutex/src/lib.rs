//! # free-threading-mutex
//!
//! A mutual-exclusion handle for native extension state that only costs
//! something when the host interpreter runs without a global interpreter lock.
//!
//! With the GIL present, every access to extension state is already
//! serialized by the interpreter, so [`FreeThreadingMutex`] is a zero-sized
//! type and `acquire`/`release` compile to nothing. In a free-threading build
//! the same handle wraps a real platform mutex (`pthread_mutex_t` on Unix,
//! `SRWLOCK` on Windows).
//!
//! ## Selecting the backend
//!
//! The backend is chosen at compile time by either:
//!
//! - the `free-threading` Cargo feature, or
//! - `--cfg Py_GIL_DISABLED`, as emitted for free-threaded CPython builds.
//!
//! [`FREE_THREADING`] reports which one was compiled in.
//!
//! ## Quick Start
//!
//! ```rust
//! use free_threading_mutex::FreeThreadingMutex;
//!
//! #[derive(Default)]
//! struct MessageState {
//!     lock: FreeThreadingMutex,
//!     cached_size: usize,
//! }
//!
//! let state = MessageState::default();
//!
//! {
//!     let _guard = state.lock.lock();
//!     // Access the guarded fields here.
//!     let _ = state.cached_size;
//! }
//!
//! state.lock.acquire();
//! // SAFETY: acquired on this thread just above.
//! unsafe { state.lock.release() };
//! ```
//!
//! ## Modules
//!
//! - [`sync`] — The mutex handle, its guard, and the two lock backends

mod sys;

pub mod sync;

pub use sync::{FreeThreadingGuard, FreeThreadingMutex, NoopLock, OsLock, RawLock, SelectedLock};

/// `true` when this crate was built for a free-threading interpreter.
pub const FREE_THREADING: bool = cfg!(any(feature = "free-threading", Py_GIL_DISABLED));
