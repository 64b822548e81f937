//! Cancellable debounce timer
//!
//! A `Debouncer` holds at most one pending timer. Pushing a new value aborts
//! the pending timer and starts a fresh one; only a value that stays put for
//! the whole delay is delivered on the receiver.
//!
//! Firings carry a generation number. A timer can fire and enqueue its value
//! just before a newer push or a cancel, so the consumer passes every firing
//! through [`Debouncer::accept`], which rejects anything but the latest
//! generation.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A value that survived the quiet period
#[derive(Debug)]
pub struct Fired<T> {
    generation: u64,
    value: T,
}

pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Fired<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its firings arrive on
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<Fired<T>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            generation: 0,
            pending: None,
            tx,
        };
        (debouncer, rx)
    }

    /// Supersede any pending value and restart the timer
    pub fn push(&mut self, value: T) {
        self.abort_pending();
        self.generation += 1;

        let generation = self.generation;
        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Fired { generation, value });
        }));
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) {
        self.abort_pending();
        // invalidates a firing that is already queued
        self.generation += 1;
    }

    /// Unwrap a firing if it belongs to the latest push
    pub fn accept(&mut self, fired: Fired<T>) -> Option<T> {
        if fired.generation != self.generation {
            return None;
        }
        self.pending = None;
        Some(fired.value)
    }

    /// Whether a timer is still running
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn drain<T: Send + 'static>(
        debouncer: &mut Debouncer<T>,
        rx: &mut mpsc::UnboundedReceiver<Fired<T>>,
    ) -> Vec<T> {
        let mut out = Vec::new();
        while let Ok(fired) = rx.try_recv() {
            if let Some(v) = debouncer.accept(fired) {
                out.push(v);
            }
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_value() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));

        for text in ["a", "av", "av ", "av a", "av am"] {
            debouncer.push(text.to_string());
            sleep(Duration::from_millis(100)).await;
        }
        assert!(drain(&mut debouncer, &mut rx).is_empty());

        sleep(Duration::from_millis(450)).await;
        assert_eq!(drain(&mut debouncer, &mut rx), vec!["av am".to_string()]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_value_not_delivered_before_delay() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));
        debouncer.push(1u32);

        sleep(Duration::from_millis(499)).await;
        assert!(drain(&mut debouncer, &mut rx).is_empty());
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(drain(&mut debouncer, &mut rx), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));
        debouncer.push("quito");
        debouncer.cancel();

        sleep(Duration::from_secs(1)).await;
        assert!(drain(&mut debouncer, &mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_firing_rejected_after_newer_push() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));
        debouncer.push("old");
        sleep(Duration::from_millis(501)).await;

        // "old" has fired and sits in the channel; a newer value arrives first
        debouncer.push("new");
        let fired = rx.recv().await.unwrap();
        assert_eq!(debouncer.accept(fired), None);

        sleep(Duration::from_millis(500)).await;
        assert_eq!(drain(&mut debouncer, &mut rx), vec!["new"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_timer() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(10));
        debouncer.push(7u8);
        drop(debouncer);

        sleep(Duration::from_millis(50)).await;
        assert!(rx.recv().await.is_none());
    }
}
