//! In-memory job queue (tests and local wiring without Redis).

use std::collections::VecDeque;

use tokio::sync::{Mutex, Notify};

use relay_core::QueueSnapshot;

use super::{JobQueue, QueueError};

/// In-memory implementation of [`JobQueue`].
///
/// Faithful to the Redis list semantics: push onto the head, pop from the
/// tail, each entry delivered to exactly one popper. `pop_blocking` suspends
/// on a [`Notify`] until a submission arrives.
#[derive(Debug, Default)]
pub struct InMemoryJobQueue {
    state: Mutex<State>,
    notify: Notify,
}

#[derive(Debug, Default)]
struct State {
    jobs: VecDeque<String>,
    last_input: Option<String>,
    input_count: u64,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently queued.
    pub async fn len(&self) -> usize {
        self.state.lock().await.jobs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl JobQueue for InMemoryJobQueue {
    async fn record_submission(&self, payload: &str) -> Result<(), QueueError> {
        {
            let mut state = self.state.lock().await;
            state.last_input = Some(payload.to_string());
            state.input_count += 1;
            state.jobs.push_front(payload.to_string());
        }
        self.notify.notify_one();
        Ok(())
    }

    async fn pop_blocking(&self) -> Result<String, QueueError> {
        loop {
            if let Some(payload) = self.state.lock().await.jobs.pop_back() {
                return Ok(payload);
            }
            // notify_one stores a permit, so a push between the check above
            // and this await still wakes us.
            self.notify.notified().await;
        }
    }

    async fn snapshot(&self) -> Result<QueueSnapshot, QueueError> {
        let state = self.state.lock().await;
        Ok(QueueSnapshot {
            last_input: state.last_input.clone(),
            input_count: state.input_count,
        })
    }

    async fn ping(&self) -> Result<(), QueueError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn pops_follow_submission_order() {
        let queue = InMemoryJobQueue::new();
        for payload in ["a", "b", "c"] {
            queue.record_submission(payload).await.unwrap();
        }

        assert_eq!(queue.pop_blocking().await.unwrap(), "a");
        assert_eq!(queue.pop_blocking().await.unwrap(), "b");
        assert_eq!(queue.pop_blocking().await.unwrap(), "c");
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn snapshot_tracks_last_input_and_count() {
        let queue = InMemoryJobQueue::new();

        assert_eq!(queue.snapshot().await.unwrap(), QueueSnapshot::default());

        queue.record_submission("first").await.unwrap();
        queue.record_submission("second").await.unwrap();

        let snapshot = queue.snapshot().await.unwrap();
        assert_eq!(snapshot.last_input.as_deref(), Some("second"));
        assert_eq!(snapshot.input_count, 2);
    }

    #[tokio::test]
    async fn pop_blocks_until_a_submission_arrives() {
        let queue = Arc::new(InMemoryJobQueue::new());

        let popper = {
            let queue = queue.clone();
            tokio::spawn(async move { queue.pop_blocking().await })
        };

        // Give the popper time to park on the empty queue.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!popper.is_finished());

        queue.record_submission("wake up").await.unwrap();

        let popped = tokio::time::timeout(Duration::from_secs(1), popper)
            .await
            .expect("pop did not wake after push")
            .unwrap();
        assert_eq!(popped.unwrap(), "wake up");
    }

    #[tokio::test]
    async fn each_entry_is_delivered_to_exactly_one_popper() {
        let queue = Arc::new(InMemoryJobQueue::new());

        let poppers: Vec<_> = (0..2)
            .map(|_| {
                let queue = queue.clone();
                tokio::spawn(async move { queue.pop_blocking().await })
            })
            .collect();

        queue.record_submission("x").await.unwrap();
        queue.record_submission("y").await.unwrap();

        let mut delivered = Vec::new();
        for popper in poppers {
            let payload = tokio::time::timeout(Duration::from_secs(1), popper)
                .await
                .expect("popper starved")
                .unwrap()
                .unwrap();
            delivered.push(payload);
        }
        delivered.sort();
        assert_eq!(delivered, ["x", "y"]);
    }
}
