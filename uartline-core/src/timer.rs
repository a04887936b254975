//! Idle timer
//!
//! The timer is split in two:
//!
//! - [`IdleTimerControl`] is shared. The byte-arrival path posts
//!   [`TimerCommand::Restart`] through it without blocking.
//! - [`IdleTimer`] is the state machine, owned by whichever task holds the
//!   clock. That task sleeps until [`IdleTimer::deadline`] or until a command
//!   arrives, whichever comes first.
//!
//! Time is plain milliseconds so the state machine runs on the host.
//!
//! ```text
//!          start / Restart
//!   ┌─────────┐ ───────────► ┌─────────┐ ──┐ Restart (fresh period)
//!   │ Stopped │              │ Running │ ◄─┘ expiry  (re-arm, periodic)
//!   └─────────┘ ◄─────────── └─────────┘
//!                    Stop
//! ```

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

/// Request posted to the timer task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerCommand {
    /// Re-arm with a full period starting now
    Restart,
    /// Disarm
    Stop,
}

/// Timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    Stopped,
    Running {
        /// Absolute expiry time (ms)
        deadline_ms: u64,
        /// Period used for re-arming (ms)
        period_ms: u32,
    },
}

/// Restartable periodic timer state machine
#[derive(Debug, Clone)]
pub struct IdleTimer {
    state: TimerState,
}

impl Default for IdleTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl IdleTimer {
    /// Create a stopped timer
    pub const fn new() -> Self {
        Self {
            state: TimerState::Stopped,
        }
    }

    /// Arm the timer to expire `period_ms` after `now_ms`
    ///
    /// A running timer is restarted with a fresh period, not shortened.
    pub fn start(&mut self, now_ms: u64, period_ms: u32) {
        self.state = TimerState::Running {
            deadline_ms: now_ms.saturating_add(u64::from(period_ms)),
            period_ms,
        };
    }

    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    /// Apply a command received from [`IdleTimerControl`]
    pub fn apply(&mut self, command: TimerCommand, now_ms: u64, period_ms: u32) {
        match command {
            TimerCommand::Restart => self.start(now_ms, period_ms),
            TimerCommand::Stop => self.stop(),
        }
    }

    /// Check for expiry at `now_ms`
    ///
    /// Returns `true` once per elapsed period and re-arms the timer for the
    /// next one, counted from `now_ms` so a late wakeup does not cause a
    /// burst of back-to-back expiries.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        match self.state {
            TimerState::Running {
                deadline_ms,
                period_ms,
            } if now_ms >= deadline_ms => {
                self.start(now_ms, period_ms);
                true
            }
            _ => false,
        }
    }

    /// Advance the timer task by one wakeup
    ///
    /// `command` is whatever the control signal held when the task woke,
    /// `None` when it woke on the deadline alone. A pending command wins: a
    /// restart that lands on the same millisecond as the deadline re-arms
    /// the timer and the expiry is skipped. Returns `true` when the idle
    /// period elapsed and the framer should be told.
    pub fn step(&mut self, command: Option<TimerCommand>, now_ms: u64, period_ms: u32) -> bool {
        match command {
            Some(command) => {
                self.apply(command, now_ms, period_ms);
                false
            }
            None => self.expire(now_ms),
        }
    }

    /// Absolute expiry time, if running
    pub fn deadline(&self) -> Option<u64> {
        match self.state {
            TimerState::Running { deadline_ms, .. } => Some(deadline_ms),
            TimerState::Stopped => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    pub fn state(&self) -> TimerState {
        self.state
    }
}

/// Shared handle for posting commands to the timer task
///
/// Posting never blocks. Only the latest command is kept, which is fine:
/// several restarts before the task wakes collapse into one.
pub struct IdleTimerControl<M: RawMutex> {
    commands: Signal<M, TimerCommand>,
}

impl<M: RawMutex> Default for IdleTimerControl<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> IdleTimerControl<M> {
    pub const fn new() -> Self {
        Self {
            commands: Signal::new(),
        }
    }

    /// Ask the timer task to restart the idle period
    pub fn restart(&self) {
        self.commands.signal(TimerCommand::Restart);
    }

    /// Ask the timer task to disarm
    pub fn stop(&self) {
        self.commands.signal(TimerCommand::Stop);
    }

    /// Wait for the next command (timer task only)
    pub async fn wait(&self) -> TimerCommand {
        self.commands.wait().await
    }

    /// Take a pending command without waiting
    pub fn try_take(&self) -> Option<TimerCommand> {
        self.commands.try_take()
    }

    /// Whether a command is waiting to be picked up
    pub fn is_pending(&self) -> bool {
        self.commands.signaled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_stopped_never_expires() {
        let mut timer = IdleTimer::new();
        assert!(!timer.is_running());
        assert_eq!(timer.deadline(), None);
        assert!(!timer.expire(u64::MAX));
    }

    #[test]
    fn test_expires_after_period() {
        let mut timer = IdleTimer::new();
        timer.start(0, 1000);

        assert!(!timer.expire(999));
        assert!(timer.expire(1000));
        assert_eq!(timer.deadline(), Some(2000));
    }

    #[test]
    fn test_restart_uses_fresh_period() {
        let mut timer = IdleTimer::new();
        timer.start(0, 1000);
        timer.start(900, 1000);

        assert!(!timer.expire(1000));
        assert!(!timer.expire(1899));
        assert!(timer.expire(1900));
    }

    #[test]
    fn test_periodic_rearm() {
        let mut timer = IdleTimer::new();
        timer.start(0, 100);

        let mut fired = 0;
        for now in (0..=1000).step_by(10) {
            if timer.expire(now) {
                fired += 1;
            }
        }
        assert_eq!(fired, 10);
    }

    #[test]
    fn test_late_wakeup_fires_once() {
        let mut timer = IdleTimer::new();
        timer.start(0, 100);

        assert!(timer.expire(550));
        assert!(!timer.expire(560));
        assert_eq!(timer.deadline(), Some(650));
    }

    #[test]
    fn test_apply_commands() {
        let mut timer = IdleTimer::new();
        timer.apply(TimerCommand::Restart, 10, 50);
        assert_eq!(
            timer.state(),
            TimerState::Running {
                deadline_ms: 60,
                period_ms: 50
            }
        );

        timer.apply(TimerCommand::Stop, 20, 50);
        assert_eq!(timer.state(), TimerState::Stopped);
    }

    #[test]
    fn test_step_restart_on_deadline_wins() {
        let mut timer = IdleTimer::new();
        timer.start(0, 1000);

        assert!(!timer.step(Some(TimerCommand::Restart), 1000, 1000));
        assert_eq!(timer.deadline(), Some(2000));
        assert!(!timer.step(None, 1999, 1000));
        assert!(timer.step(None, 2000, 1000));
        assert_eq!(timer.deadline(), Some(3000));
    }

    #[test]
    fn test_step_stop_disarms() {
        let mut timer = IdleTimer::new();
        timer.start(0, 100);

        assert!(!timer.step(Some(TimerCommand::Stop), 100, 100));
        assert!(!timer.is_running());
        assert!(!timer.step(None, 10_000, 100));
    }

    #[test]
    fn test_control_keeps_latest_command() {
        let control = IdleTimerControl::<NoopRawMutex>::new();
        assert!(!control.is_pending());

        control.restart();
        control.restart();
        control.stop();
        assert!(control.is_pending());
        assert_eq!(control.try_take(), Some(TimerCommand::Stop));
        assert_eq!(control.try_take(), None);
    }

    #[test]
    fn test_control_wait() {
        let control = IdleTimerControl::<NoopRawMutex>::new();
        control.restart();
        let command = embassy_futures::block_on(control.wait());
        assert_eq!(command, TimerCommand::Restart);
    }
}
