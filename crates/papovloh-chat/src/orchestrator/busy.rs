//! Single-flight guard for generation turns.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::ChatError;

/// Clears the `busy` flag on drop, so it is released on every exit path,
/// including a cancelled future.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Take the flag, or fail with `ChatError::Busy` if a turn holds it.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Result<Self, ChatError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(ChatError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
