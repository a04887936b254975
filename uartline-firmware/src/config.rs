//! Build-time framer configuration
//!
//! Constants come from `framer.toml`, validated and generated by build.rs.
//! The const assertions below re-check them against the core's rules so a
//! hand-edited generated file cannot slip through.

use uartline_core::config::validate_sizes;
use uartline_core::FramerConfig;
use uartline_hal::UartConfig;

include!(concat!(env!("OUT_DIR"), "/framer_config.rs"));

/// Framer parameters baked into the image
pub const FRAMER_CONFIG: FramerConfig = FramerConfig::new(IDLE_PERIOD_MS, TERMINATORS);

/// Console line settings (8N1)
pub const CONSOLE_UART: UartConfig = UartConfig::with_baudrate(BAUDRATE);

const _: () = assert!(FRAMER_CONFIG.validate().is_ok(), "invalid framer config");
const _: () = assert!(
    validate_sizes(MSG_SIZE, QUEUE_DEPTH).is_ok(),
    "invalid message size or queue depth"
);
