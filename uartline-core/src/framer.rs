//! The framer: one object shared by the receive interrupt, the idle timer
//! and the consumer task.
//!
//! Entry points by context:
//!
//! | Context        | Calls                                             |
//! |----------------|---------------------------------------------------|
//! | byte arrival   | [`Framer::on_byte`], [`Framer::on_bytes`], [`Framer::drain`] |
//! | timer expiry   | [`Framer::on_idle_timeout`]                       |
//! | consumer task  | [`Framer::pop`], [`Framer::try_pop`]              |
//!
//! The byte-arrival and timer entry points never block and never fail.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use uartline_hal::UartRx;

use crate::assembler::{Boundary, LineAssembler};
use crate::config::FramerConfig;
use crate::idle::IdleFlag;
use crate::message::Message;
use crate::queue::MessageQueue;
use crate::stats::{FramerStats, StatsCounters};
use crate::timer::IdleTimerControl;

/// Line framer with an `N`-byte receive buffer and a `K`-deep message queue
pub struct Framer<M: RawMutex, const N: usize, const K: usize> {
    config: FramerConfig,
    idle: IdleFlag<M>,
    timer: IdleTimerControl<M>,
    assembler: Mutex<M, RefCell<LineAssembler<N>>>,
    queue: MessageQueue<M, N, K>,
    stats: StatsCounters,
}

impl<M: RawMutex, const N: usize, const K: usize> Framer<M, N, K> {
    pub const fn new(config: FramerConfig) -> Self {
        Self {
            config,
            idle: IdleFlag::new(),
            timer: IdleTimerControl::new(),
            assembler: Mutex::new(RefCell::new(LineAssembler::new(config))),
            queue: MessageQueue::new(),
            stats: StatsCounters::new(),
        }
    }

    /// Handle one received byte
    pub fn on_byte(&self, byte: u8) {
        self.timer.restart();
        self.idle.set_idle(false);

        self.assembler.lock(|asm| {
            if let Some(boundary) = asm.borrow_mut().push(byte) {
                self.deliver(boundary);
            }
        });
    }

    /// Handle a burst of received bytes, in order
    pub fn on_bytes(&self, bytes: &[u8]) {
        for &byte in bytes {
            self.on_byte(byte);
        }
    }

    /// Read the receive FIFO until it is empty, feeding every byte
    ///
    /// Returns the number of bytes consumed. Bytes read before an error are
    /// kept.
    pub fn drain<R: UartRx>(&self, rx: &mut R) -> Result<usize, R::Error> {
        let mut count = 0;
        while let Some(byte) = rx.try_read_byte()? {
            self.on_byte(byte);
            count += 1;
        }
        Ok(count)
    }

    /// Timer-context entry point: mark the line idle and evaluate it
    pub fn on_idle_timeout(&self) {
        self.idle.set_idle(true);
        self.on_idle_expiry();
    }

    /// Flush a partial line if the idle flag is still set
    ///
    /// A byte that arrived since the flag was set has already cleared it, in
    /// which case this does nothing. An empty buffer also does nothing.
    pub fn on_idle_expiry(&self) {
        if !self.idle.take_and_clear() {
            return;
        }

        self.assembler.lock(|asm| {
            if let Some(boundary) = asm.borrow_mut().flush_idle() {
                self.deliver(boundary);
            }
        });
    }

    /// Wait for the next completed message
    pub async fn pop(&self) -> Message<N> {
        self.queue.pop().await
    }

    /// Take the next completed message without waiting
    pub fn try_pop(&self) -> Option<Message<N>> {
        self.queue.try_pop()
    }

    pub fn config(&self) -> &FramerConfig {
        &self.config
    }

    /// Command channel to the idle timer task
    pub fn timer_control(&self) -> &IdleTimerControl<M> {
        &self.timer
    }

    pub fn idle_flag(&self) -> &IdleFlag<M> {
        &self.idle
    }

    pub fn queue(&self) -> &MessageQueue<M, N, K> {
        &self.queue
    }

    /// Number of bytes waiting for a boundary
    pub fn pending_len(&self) -> usize {
        self.assembler.lock(|asm| asm.borrow().len())
    }

    pub fn stats(&self) -> FramerStats {
        self.stats.snapshot()
    }

    /// Queue a completed message
    ///
    /// Called with the assembler lock held, so a boundary cut from the byte
    /// path and one cut by an idle flush reach the queue in the order they
    /// were cut.
    fn deliver(&self, boundary: Boundary<N>) {
        let accepted = self.queue.try_push(boundary.message);
        self.stats.record(boundary.kind, accepted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerCommand;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    type TestFramer = Framer<NoopRawMutex, 8, 2>;

    #[test]
    fn test_byte_restarts_timer_and_clears_idle() {
        let framer = TestFramer::new(FramerConfig::DEFAULT);
        framer.idle_flag().set_idle(true);

        framer.on_byte(b'a');

        assert_eq!(framer.timer_control().try_take(), Some(TimerCommand::Restart));
        assert!(!framer.idle_flag().is_idle());
        assert_eq!(framer.pending_len(), 1);
    }

    #[test]
    fn test_terminator_delivers() {
        let framer = TestFramer::new(FramerConfig::DEFAULT);
        framer.on_bytes(b"hi\n");

        assert_eq!(framer.try_pop().unwrap().as_bytes(), b"hi");
        assert_eq!(framer.pending_len(), 0);
        assert_eq!(framer.stats().delivered, 1);
    }

    #[test]
    fn test_idle_timeout_flushes_partial_line() {
        let framer = TestFramer::new(FramerConfig::DEFAULT);
        framer.on_bytes(b"xyz");
        assert!(framer.try_pop().is_none());

        framer.on_idle_timeout();

        assert_eq!(framer.try_pop().unwrap().as_bytes(), b"xyz");
        assert!(!framer.idle_flag().is_idle());
        assert_eq!(framer.stats().idle_flushes, 1);
    }

    #[test]
    fn test_idle_expiry_without_flag_is_noop() {
        let framer = TestFramer::new(FramerConfig::DEFAULT);
        framer.on_bytes(b"ab");

        framer.on_idle_expiry();

        assert!(framer.try_pop().is_none());
        assert_eq!(framer.pending_len(), 2);
    }

    #[test]
    fn test_byte_between_set_and_take_cancels_flush() {
        let framer = TestFramer::new(FramerConfig::DEFAULT);
        framer.on_bytes(b"ab");

        framer.idle_flag().set_idle(true);
        framer.on_byte(b'c');
        framer.on_idle_expiry();

        assert!(framer.try_pop().is_none());
        assert_eq!(framer.pending_len(), 3);
    }

    #[test]
    fn test_overflow_is_counted() {
        let framer = TestFramer::new(FramerConfig::DEFAULT);
        framer.on_bytes(b"1\n2\n3\n");

        let stats = framer.stats();
        assert_eq!(stats.delivered, 2);
        assert_eq!(stats.dropped, 1);
        assert_eq!(framer.try_pop().unwrap().as_bytes(), b"1");
        assert_eq!(framer.try_pop().unwrap().as_bytes(), b"2");
        assert!(framer.try_pop().is_none());
    }

    /// Receive FIFO holding a fixed byte string
    struct Fifo(&'static [u8]);

    impl UartRx for Fifo {
        type Error = ();

        fn read_fifo(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
            let n = self.0.len().min(buf.len());
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_drain_reads_until_fifo_empty() {
        let framer = TestFramer::new(FramerConfig::DEFAULT);
        let mut fifo = Fifo(b"ok\rmore");

        assert_eq!(framer.drain(&mut fifo), Ok(7));
        assert_eq!(framer.try_pop().unwrap().as_bytes(), b"ok");
        assert_eq!(framer.pending_len(), 4);
        assert_eq!(framer.drain(&mut fifo), Ok(0));
    }

    #[test]
    fn test_truncation_is_counted() {
        let framer = TestFramer::new(FramerConfig::DEFAULT);
        framer.on_bytes(b"abcdefgh");

        assert_eq!(framer.try_pop().unwrap().as_bytes(), b"abcdefg");
        assert_eq!(framer.stats().truncated, 1);
        assert_eq!(framer.pending_len(), 1);
    }
}
