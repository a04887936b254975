//! Bounded queue of completed messages
//!
//! Producers (receive interrupt, idle timer) must never wait, so pushing is
//! non-blocking and drops the incoming message when every slot is taken.
//! The consumer task awaits [`MessageQueue::pop`].

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;

use crate::message::Message;

/// FIFO of `K` message slots, each `N` bytes
pub struct MessageQueue<M: RawMutex, const N: usize, const K: usize> {
    channel: Channel<M, Message<N>, K>,
}

impl<M: RawMutex, const N: usize, const K: usize> Default for MessageQueue<M, N, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex, const N: usize, const K: usize> MessageQueue<M, N, K> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Enqueue without blocking
    ///
    /// Returns `false` if the queue was full; the message is dropped and the
    /// queued ones are kept.
    pub fn try_push(&self, msg: Message<N>) -> bool {
        self.channel.try_send(msg).is_ok()
    }

    /// Wait for the oldest message
    pub async fn pop(&self) -> Message<N> {
        self.channel.receive().await
    }

    /// Take the oldest message if there is one
    pub fn try_pop(&self) -> Option<Message<N>> {
        self.channel.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.channel.is_full()
    }

    /// Number of slots `K`
    pub const fn capacity(&self) -> usize {
        K
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    type Queue = MessageQueue<NoopRawMutex, 8, 3>;

    fn msg(text: &[u8]) -> Message<8> {
        Message::new(text).unwrap()
    }

    #[test]
    fn test_fifo_order() {
        let queue = Queue::new();
        assert!(queue.try_push(msg(b"a")));
        assert!(queue.try_push(msg(b"b")));

        assert_eq!(queue.try_pop(), Some(msg(b"a")));
        assert_eq!(queue.try_pop(), Some(msg(b"b")));
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn test_drop_newest_when_full() {
        let queue = Queue::new();
        assert!(queue.try_push(msg(b"1")));
        assert!(queue.try_push(msg(b"2")));
        assert!(queue.try_push(msg(b"3")));
        assert!(queue.is_full());
        assert!(!queue.try_push(msg(b"4")));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.try_pop(), Some(msg(b"1")));
        assert_eq!(queue.try_pop(), Some(msg(b"2")));
        assert_eq!(queue.try_pop(), Some(msg(b"3")));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_pop_waits_for_ready_message() {
        let queue = Queue::new();
        queue.try_push(msg(b"hi"));

        let popped = embassy_futures::block_on(queue.pop());
        assert_eq!(popped.as_bytes(), b"hi");
    }

    #[test]
    fn test_capacity() {
        let queue = Queue::new();
        assert_eq!(queue.capacity(), 3);
    }
}
