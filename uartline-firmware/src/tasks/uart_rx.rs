//! Console UART receive task
//!
//! The UART interrupt fills the buffered driver's ring; this task hands
//! every byte to the framer in arrival order. It is the only caller of
//! `on_byte`, which keeps the byte-arrival path serialized.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use crate::channels::FRAMER;

/// Bytes pulled from the ring per read
const RX_CHUNK: usize = 32;

#[embassy_executor::task]
pub async fn uart_rx_task(mut rx: BufferedUartRx) {
    info!("UART RX task started");

    let mut buf = [0u8; RX_CHUNK];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);
                FRAMER.on_bytes(&buf[..n]);
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
