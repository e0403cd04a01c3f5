use super::RawLock;

/// Lock backend for interpreters with a global interpreter lock.
///
/// The GIL already serializes every caller, so this type stores nothing and
/// all of its operations are empty. Nested acquisition from one thread does
/// not deadlock and concurrent acquisition from several threads does not
/// block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoopLock;

impl NoopLock {
    /// Creates the lock.
    pub const fn new() -> Self {
        Self
    }
}

// Safety: `ENFORCING` is `false`, so no exclusion is promised.
unsafe impl RawLock for NoopLock {
    const ENFORCING: bool = false;

    #[inline(always)]
    fn acquire(&self) {}

    #[inline(always)]
    fn try_acquire(&self) -> bool {
        true
    }

    #[inline(always)]
    unsafe fn release(&self) {}
}
