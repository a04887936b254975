//! Shared framer instance
//!
//! The receive task, the idle timer task and the echo task all reach the
//! same framer through this static.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use uartline_core::Framer;

use crate::config::{FRAMER_CONFIG, MSG_SIZE, QUEUE_DEPTH};

/// Framer type used by this firmware
pub type ConsoleFramer = Framer<CriticalSectionRawMutex, MSG_SIZE, QUEUE_DEPTH>;

/// Console line framer
pub static FRAMER: ConsoleFramer = Framer::new(FRAMER_CONFIG);
