//! Diagnostic counters
//!
//! Producer-side losses are silent, so these counters are the only way to
//! see them. Updated from interrupt context, hence atomics.

use portable_atomic::{AtomicU32, Ordering};

use crate::assembler::BoundaryKind;

/// Snapshot of the framer counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FramerStats {
    /// Messages accepted by the queue
    pub delivered: u32,
    /// Messages dropped because the queue was full
    pub dropped: u32,
    /// Messages cut because the receive buffer filled up
    pub truncated: u32,
    /// Partial lines flushed by the idle timer
    pub idle_flushes: u32,
}

impl FramerStats {
    /// Total boundaries seen
    pub fn boundaries(&self) -> u32 {
        self.delivered.wrapping_add(self.dropped)
    }
}

pub(crate) struct StatsCounters {
    delivered: AtomicU32,
    dropped: AtomicU32,
    truncated: AtomicU32,
    idle_flushes: AtomicU32,
}

impl StatsCounters {
    pub(crate) const fn new() -> Self {
        Self {
            delivered: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            truncated: AtomicU32::new(0),
            idle_flushes: AtomicU32::new(0),
        }
    }

    pub(crate) fn record(&self, kind: BoundaryKind, accepted: bool) {
        match kind {
            BoundaryKind::BufferFull => bump(&self.truncated),
            BoundaryKind::Idle => bump(&self.idle_flushes),
            BoundaryKind::Terminator => {}
        }
        if accepted {
            bump(&self.delivered);
        } else {
            bump(&self.dropped);
        }
    }

    pub(crate) fn snapshot(&self) -> FramerStats {
        FramerStats {
            delivered: self.delivered.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            truncated: self.truncated.load(Ordering::Relaxed),
            idle_flushes: self.idle_flushes.load(Ordering::Relaxed),
        }
    }
}

fn bump(counter: &AtomicU32) {
    counter.fetch_add(1, Ordering::Relaxed);
}
