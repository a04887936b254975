//! Echo consumer task
//!
//! Waits for completed lines and writes them back to the console.

use defmt::*;
use uartline_core::echo::{write_banner, write_echo};

use crate::channels::FRAMER;
use crate::console::ConsoleTx;

#[embassy_executor::task]
pub async fn echo_task(mut tx: ConsoleTx) {
    info!("Echo task started");

    if let Err(e) = write_banner(&mut tx) {
        warn!("Failed to send banner: {:?}", e);
    }

    loop {
        let msg = FRAMER.pop().await;
        debug!("Line: {} bytes", msg.len());

        if let Err(e) = write_echo(&mut tx, &msg) {
            warn!("Failed to echo line: {:?}", e);
        }
    }
}
