//! Line assembly
//!
//! [`LineAssembler`] owns the receive buffer and its write cursor. It is fed
//! one byte at a time and decides where messages end. Terminator, full
//! buffer and idle flush all cut the buffer through the same private
//! boundary routine.

use crate::config::{FramerConfig, MIN_MSG_SIZE};
use crate::message::Message;

/// What ended a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoundaryKind {
    /// A terminator byte arrived
    Terminator,
    /// The buffer reached `N - 1` bytes and another byte arrived
    BufferFull,
    /// The line stayed quiet for an idle period
    Idle,
}

/// A completed message together with the reason it was cut
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Boundary<const N: usize> {
    pub message: Message<N>,
    pub kind: BoundaryKind,
}

/// Receive buffer plus boundary rules
///
/// `N` is the buffer capacity; a message holds at most `N - 1` bytes.
#[derive(Debug, Clone)]
pub struct LineAssembler<const N: usize> {
    buf: [u8; N],
    pos: usize,
    config: FramerConfig,
}

impl<const N: usize> LineAssembler<N> {
    /// Evaluated on construction; a one-byte buffer could never hold payload
    const SIZE_OK: () = assert!(N >= MIN_MSG_SIZE, "receive buffer must hold at least 2 bytes");

    pub const fn new(config: FramerConfig) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::SIZE_OK;
        Self {
            buf: [0; N],
            pos: 0,
            config,
        }
    }

    /// Feed one received byte
    ///
    /// Returns a boundary when this byte completed a message. A byte that
    /// arrives while the buffer is full is stored as the first byte of the
    /// next message, so nothing is lost to truncation.
    pub fn push(&mut self, byte: u8) -> Option<Boundary<N>> {
        let full = self.pos + 1 >= N;
        let terminator = self.config.is_terminator(byte);

        if !full && !terminator {
            self.buf[self.pos] = byte;
            self.pos += 1;
            return None;
        }

        if full {
            let boundary = self.boundary(BoundaryKind::BufferFull);
            if !terminator {
                self.store_first(byte);
            }
            Some(boundary)
        } else {
            Some(self.boundary(BoundaryKind::Terminator))
        }
    }

    /// Flush a partial line after the idle period
    ///
    /// An empty buffer yields nothing, so repeated expiries are harmless.
    pub fn flush_idle(&mut self) -> Option<Boundary<N>> {
        if self.pos == 0 {
            return None;
        }
        Some(self.boundary(BoundaryKind::Idle))
    }

    /// Cut the buffer into a message and reset
    fn boundary(&mut self, kind: BoundaryKind) -> Boundary<N> {
        let len = self.pos.min(Message::<N>::MAX_PAYLOAD);
        // The cursor never passes N - 1, so the copy always fits
        let message = Message::new(&self.buf[..len]).unwrap_or_default();
        self.reset();
        Boundary { message, kind }
    }

    /// Drop the pending bytes
    pub fn reset(&mut self) {
        self.pos = 0;
        self.buf.fill(0);
    }

    /// Bytes collected since the last boundary
    pub fn pending(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Buffer capacity `N`
    pub const fn capacity(&self) -> usize {
        N
    }

    fn store_first(&mut self, byte: u8) {
        self.buf[0] = byte;
        self.pos = 1;
    }
}
