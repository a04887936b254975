//! Embassy async tasks
//!
//! Each task runs independently and talks to the others through the shared
//! framer in [`crate::channels`].

pub mod echo;
pub mod idle_timer;
pub mod stats;
pub mod uart_rx;

pub use echo::echo_task;
pub use idle_timer::idle_timer_task;
pub use stats::stats_task;
pub use uart_rx::uart_rx_task;
