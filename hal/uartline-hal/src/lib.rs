//! uartline Hardware Abstraction Layer
//!
//! Serial port traits implemented by board support code. The framer core
//! only needs two things from a UART: draining the receive FIFO without
//! blocking, and writing bytes out for the echo consumer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  uartline-core (framer, echo consumer)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  uartline-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  board glue (uartline-firmware, tests)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

pub use uart::{DataBits, Parity, StopBits, UartConfig, UartRx, UartTx};
