//! Idle timer task
//!
//! Owns the idle timer state machine and the clock. Sleeps until the
//! current deadline or until the receive path posts a restart, whichever
//! comes first. On expiry it asks the framer to flush a partial line and
//! keeps running with the same period.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Instant, Timer};
use uartline_core::{IdleTimer, TimerCommand};

use crate::channels::FRAMER;

#[embassy_executor::task]
pub async fn idle_timer_task() {
    let period_ms = FRAMER.config().idle_period_ms;
    info!("Idle timer task started ({} ms)", period_ms);

    let control = FRAMER.timer_control();
    let mut timer = IdleTimer::new();
    timer.start(Instant::now().as_millis(), period_ms);

    loop {
        let command = match timer.deadline() {
            Some(deadline) => {
                match select(control.wait(), Timer::at(Instant::from_millis(deadline))).await {
                    Either::First(command) => Some(command),
                    // A restart posted while the deadline fired still wins
                    Either::Second(()) => control.try_take(),
                }
            }
            None => Some(control.wait().await),
        };

        if command == Some(TimerCommand::Stop) {
            debug!("Idle timer stopped");
        }

        let now_ms = Instant::now().as_millis();
        if timer.step(command, now_ms, period_ms) {
            trace!("Line idle, {} bytes pending", FRAMER.pending_len());
            FRAMER.on_idle_timeout();
        }
    }
}
