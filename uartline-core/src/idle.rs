//! Shared "line is idle" flag
//!
//! Written by the idle-timer expiry path (set) and the byte-arrival path
//! (clear). The only read exposed for decisions is [`IdleFlag::take_and_clear`],
//! so one expiry is consumed at most once even when a byte races the timer.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Lock-protected idle flag
pub struct IdleFlag<M: RawMutex> {
    idle: Mutex<M, Cell<bool>>,
}

impl<M: RawMutex> Default for IdleFlag<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> IdleFlag<M> {
    /// Create a flag in the "not idle" state
    pub const fn new() -> Self {
        Self {
            idle: Mutex::new(Cell::new(false)),
        }
    }

    /// Overwrite the flag
    pub fn set_idle(&self, idle: bool) {
        self.idle.lock(|cell| cell.set(idle));
    }

    /// Read the flag and reset it to `false` in one critical section
    pub fn take_and_clear(&self) -> bool {
        self.idle.lock(|cell| cell.replace(false))
    }

    /// Peek at the flag without consuming it (diagnostics only)
    pub fn is_idle(&self) -> bool {
        self.idle.lock(Cell::get)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_starts_not_idle() {
        let flag = IdleFlag::<NoopRawMutex>::new();
        assert!(!flag.is_idle());
        assert!(!flag.take_and_clear());
    }

    #[test]
    fn test_take_consumes_once() {
        let flag = IdleFlag::<NoopRawMutex>::new();
        flag.set_idle(true);
        assert!(flag.is_idle());

        assert!(flag.take_and_clear());
        assert!(!flag.take_and_clear());
        assert!(!flag.is_idle());
    }

    #[test]
    fn test_byte_arrival_cancels_pending_expiry() {
        let flag = IdleFlag::<NoopRawMutex>::new();
        flag.set_idle(true);
        // Byte arrives before the expiry handler gets to look
        flag.set_idle(false);
        assert!(!flag.take_and_clear());
    }
}
