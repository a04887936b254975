//! Framer statistics reporter
//!
//! Queue overflow and truncation are silent on the receive path; this task
//! makes them visible in the defmt log.

use defmt::*;
use embassy_time::{Duration, Ticker};
use uartline_core::FramerStats;

use crate::channels::FRAMER;

/// Report interval in seconds
const REPORT_INTERVAL_S: u64 = 30;

/// Poll interval for drop detection
const POLL_INTERVAL_MS: u64 = 250;

#[embassy_executor::task]
pub async fn stats_task() {
    info!("Stats task started");

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let polls_per_report = REPORT_INTERVAL_S * 1000 / POLL_INTERVAL_MS;
    let mut last = FramerStats::default();
    let mut polls = 0u64;

    loop {
        ticker.next().await;
        polls += 1;

        let stats = FRAMER.stats();
        if stats.dropped != last.dropped {
            warn!(
                "Message queue full, {} line(s) dropped ({} total)",
                stats.dropped.wrapping_sub(last.dropped),
                stats.dropped
            );
        }

        if polls >= polls_per_report {
            polls = 0;
            info!("Framer stats: {}", stats);
        }

        last = stats;
    }
}
