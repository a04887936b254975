//! uartline - UART echo console firmware
//!
//! Reads the console UART, splits the input into lines by terminator or
//! by a quiet line, and echoes every completed line back.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::console::ConsoleTx;

mod channels;
mod config;
mod console;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("uartline firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let framer_config = channels::FRAMER.config();
    info!(
        "Framer: {} byte messages, {} slots, {} ms idle",
        config::MSG_SIZE,
        config::QUEUE_DEPTH,
        framer_config.idle_period_ms
    );

    // Console UART on GPIO0 (TX) / GPIO1 (RX)
    let uart_config = console::rp_config(&config::CONSOLE_UART);

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config::CONSOLE_UART.baudrate);

    // The timer task must be running before bytes start restarting it
    spawner.spawn(tasks::idle_timer_task()).unwrap();
    spawner.spawn(tasks::uart_rx_task(rx)).unwrap();
    spawner.spawn(tasks::echo_task(ConsoleTx::new(tx))).unwrap();
    spawner.spawn(tasks::stats_task()).unwrap();

    info!("All tasks spawned, firmware running");
}
