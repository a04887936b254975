//! Board-agnostic UART line framer
//!
//! Bytes handed over by a receive interrupt are assembled into messages.
//! A message ends when:
//!
//! - a terminator byte (`\n` or `\r` by default) arrives,
//! - the receive buffer fills up, or
//! - the line stays quiet for a whole idle period.
//!
//! Finished messages go into a bounded queue that a consumer task drains.
//!
//! ```text
//!  byte ISR ──► Framer::on_byte ──► LineAssembler ──┐
//!                   │                               ├──► MessageQueue ──► consumer task
//!                   ▼ restart                       │        (pop)
//!  timer task ◄── IdleTimerControl                  │
//!      │                                            │
//!      └── expiry ──► Framer::on_idle_timeout ──────┘
//! ```
//!
//! Nothing here blocks except [`MessageQueue::pop`], which only a task may
//! await. All shared state sits in one [`Framer`] value that can be placed in
//! a `static` because every constructor is `const`.

#![no_std]
#![deny(unsafe_code)]

pub mod assembler;
pub mod config;
pub mod echo;
pub mod framer;
pub mod idle;
pub mod message;
pub mod queue;
pub mod stats;
pub mod timer;

pub use assembler::{Boundary, BoundaryKind, LineAssembler};
pub use config::{ConfigError, FramerConfig};
pub use framer::Framer;
pub use idle::IdleFlag;
pub use message::Message;
pub use queue::MessageQueue;
pub use stats::FramerStats;
pub use timer::{IdleTimer, IdleTimerControl, TimerCommand};
