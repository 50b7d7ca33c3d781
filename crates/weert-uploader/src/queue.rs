//! Bounded producer/consumer queue between the event source and the upload
//! worker.
//!
//! The engine's main loop must never block on a slow server, so `push`
//! always succeeds: when the backlog exceeds `max_backlog` the oldest
//! packets are trimmed. `pop` blocks until a packet arrives or shutdown is
//! signalled, then drains whatever is left before returning `None`.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};
use tracing::warn;
use weert_common::LoopPacket;

/// Bounded loop-packet queue.
pub struct PacketQueue {
    inner: Mutex<Inner>,
    ready: Condvar,
    max_backlog: Option<usize>,
}

struct Inner {
    queue: VecDeque<LoopPacket>,
    shutdown: bool,
}

impl PacketQueue {
    /// `max_backlog: None` allows any number of queued packets.
    pub fn new(max_backlog: Option<usize>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                queue: VecDeque::new(),
                shutdown: false,
            }),
            ready: Condvar::new(),
            max_backlog,
        }
    }

    /// Append a packet, trimming the oldest entries past `max_backlog`.
    pub fn push(&self, packet: LoopPacket) {
        let mut inner = self.lock();
        inner.queue.push_back(packet);
        if let Some(max) = self.max_backlog {
            let mut trimmed = 0usize;
            while inner.queue.len() > max {
                inner.queue.pop_front();
                trimmed += 1;
            }
            if trimmed > 0 {
                warn!(trimmed, max_backlog = max, "backlog full, dropped oldest packets");
            }
        }
        drop(inner);
        self.ready.notify_one();
    }

    /// Block until a packet is available. Returns `None` once shutdown has
    /// been signalled and the backlog is drained.
    pub fn pop(&self) -> Option<LoopPacket> {
        let mut inner = self.lock();
        loop {
            if let Some(packet) = inner.queue.pop_front() {
                return Some(packet);
            }
            if inner.shutdown {
                return None;
            }
            inner = self
                .ready
                .wait(inner)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    /// Signal shutdown and wake the worker.
    pub fn shutdown(&self) {
        self.lock().shutdown = true;
        self.ready.notify_all();
    }

    /// Current backlog length.
    pub fn len(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_fifo_order() {
        let queue = PacketQueue::new(None);
        queue.push(LoopPacket::new(1));
        queue.push(LoopPacket::new(2));
        assert_eq!(queue.pop().map(|p| p.date_time), Some(1));
        assert_eq!(queue.pop().map(|p| p.date_time), Some(2));
    }

    #[test]
    fn test_backlog_trims_oldest_first() {
        let queue = PacketQueue::new(Some(2));
        queue.push(LoopPacket::new(1));
        queue.push(LoopPacket::new(2));
        queue.push(LoopPacket::new(3));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().map(|p| p.date_time), Some(2));
        assert_eq!(queue.pop().map(|p| p.date_time), Some(3));
    }

    #[test]
    fn test_shutdown_drains_then_ends() {
        let queue = PacketQueue::new(None);
        queue.push(LoopPacket::new(1));
        queue.shutdown();
        assert_eq!(queue.pop().map(|p| p.date_time), Some(1));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_pop_blocks_until_push() {
        let queue = Arc::new(PacketQueue::new(None));
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop().map(|p| p.date_time))
        };
        // Give the consumer a moment to block, then feed it.
        thread::sleep(std::time::Duration::from_millis(20));
        queue.push(LoopPacket::new(7));
        assert_eq!(consumer.join().unwrap(), Some(7));
    }
}
