use std::collections::VecDeque;
use tokio::sync::Mutex;

/// FIFO buffer of pending ping requests (target channel ids).
///
/// Produced by the HTTP webhook handler, consumed by the drain task running
/// next to the Discord client; the mutex is what makes the cross-actor
/// append/pop contract safe. Duplicate channel ids may coexist, insertion
/// order is processing order.
#[derive(Debug, Default)]
pub struct PingQueue {
    inner: Mutex<VecDeque<u64>>,
}

impl PingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a channel id to the tail. Also used to put a not-yet-ready
    /// request back after a failed drain attempt.
    pub async fn push(&self, channel_id: u64) {
        self.inner.lock().await.push_back(channel_id);
    }

    /// Pop the head of the queue, if any.
    pub async fn pop(&self) -> Option<u64> {
        self.inner.lock().await.pop_front()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fifo_order() {
        let queue = PingQueue::new();
        queue.push(1).await;
        queue.push(2).await;
        queue.push(3).await;

        assert_eq!(queue.pop().await, Some(1));
        assert_eq!(queue.pop().await, Some(2));
        assert_eq!(queue.pop().await, Some(3));
        assert_eq!(queue.pop().await, None);
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let queue = PingQueue::new();
        queue.push(7).await;
        queue.push(7).await;
        assert_eq!(queue.len().await, 2);
    }

    #[tokio::test]
    async fn test_requeue_goes_to_tail() {
        let queue = PingQueue::new();
        queue.push(1).await;
        queue.push(2).await;

        let head = queue.pop().await.expect("head");
        queue.push(head).await;

        assert_eq!(queue.pop().await, Some(2));
        assert_eq!(queue.pop().await, Some(1));
    }
}
