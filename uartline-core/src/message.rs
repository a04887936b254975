//! Completed messages
//!
//! A [`Message`] is an owned copy of the receive buffer taken at a boundary.
//! Its slot size is the receive buffer capacity `N`, but at most `N - 1`
//! payload bytes are ever stored: the last slot is the one a terminator
//! would have occupied.

use core::fmt;
use core::ops::Deref;

use heapless::Vec;

/// A message that is longer than the slot allows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessageTooLong;

impl fmt::Display for MessageTooLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("message exceeds slot payload size")
    }
}

/// One completed line, terminator stripped
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message<const N: usize> {
    payload: Vec<u8, N>,
}

impl<const N: usize> Message<N> {
    /// Largest payload a message of this slot size carries
    pub const MAX_PAYLOAD: usize = N.saturating_sub(1);

    /// Create an empty message
    pub const fn empty() -> Self {
        Self {
            payload: Vec::new(),
        }
    }

    /// Copy `bytes` into a new message
    pub fn new(bytes: &[u8]) -> Result<Self, MessageTooLong> {
        if bytes.len() > Self::MAX_PAYLOAD {
            return Err(MessageTooLong);
        }

        let mut payload = Vec::new();
        payload
            .extend_from_slice(bytes)
            .map_err(|_| MessageTooLong)?;
        Ok(Self { payload })
    }

    /// Raw payload
    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    /// Payload as text, if it is valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.payload).ok()
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

impl<const N: usize> Deref for Message<N> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.payload
    }
}

impl<const N: usize> AsRef<[u8]> for Message<N> {
    fn as_ref(&self) -> &[u8] {
        &self.payload
    }
}
