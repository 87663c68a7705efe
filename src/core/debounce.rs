//! Debounce timer: an owned, cancellable handle on a single pending update.
//!
//! Each [`Debouncer::schedule`] aborts the previous timer task and spawns a
//! new one that sleeps for the delay and then sends a [`Settled`] value over
//! the channel.  Values carry a generation id; [`Debouncer::accept`] rejects
//! anything but the latest, which covers a timer that already queued its value
//! before it was superseded.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A value that stayed unchanged for a full debounce window.
#[derive(Debug)]
pub struct Settled<T> {
    generation: u64,
    pub value: T,
}

pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<Settled<T>>,
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(tx: mpsc::UnboundedSender<Settled<T>>) -> Self {
        Self {
            tx,
            pending: None,
            generation: 0,
        }
    }

    /// Deliver `value` after `delay`, replacing any pending delivery.
    ///
    /// Always goes through the runtime, so a zero delay still arrives on a
    /// later turn of the event loop and never inline.
    pub fn schedule(&mut self, value: T, delay: Duration) {
        self.cancel();
        let generation = self.generation;
        let tx = self.tx.clone();
        tracing::debug!(generation, ?delay, "debounce scheduled");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Settled { generation, value });
        }));
    }

    /// Drop the pending delivery, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Unwrap a delivered value if it belongs to the live timer.
    pub fn accept(&mut self, settled: Settled<T>) -> Option<T> {
        if self.pending.is_none() || settled.generation != self.generation {
            tracing::debug!(
                generation = settled.generation,
                current = self.generation,
                "stale debounce discarded"
            );
            return None;
        }
        self.pending = None;
        Some(settled.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
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
    use tokio::time::Instant;

    const DELAY: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn delivers_after_the_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(tx);
        let start = Instant::now();

        debouncer.schedule("al", DELAY);
        let settled = rx.recv().await.unwrap();

        assert!(start.elapsed() >= DELAY);
        assert_eq!(debouncer.accept(settled), Some("al"));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_values_never_arrive() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(tx);

        debouncer.schedule("a", DELAY);
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule("al", DELAY);
        let restarted = Instant::now();
        tokio::time::sleep(Duration::from_millis(250)).await;
        debouncer.schedule("ali", DELAY);
        let last = Instant::now();

        let settled = rx.recv().await.unwrap();
        assert!(last.elapsed() >= DELAY);
        assert!(restarted.elapsed() >= DELAY);
        assert_eq!(debouncer.accept(settled), Some("ali"));

        tokio::time::sleep(DELAY * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_is_deferred() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(tx);

        debouncer.schedule("x", Duration::ZERO);
        assert!(rx.try_recv().is_err());

        let settled = rx.recv().await.unwrap();
        assert_eq!(debouncer.accept(settled), Some("x"));
    }

    #[tokio::test(start_paused = true)]
    async fn value_queued_before_superseding_is_rejected() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(tx);

        debouncer.schedule("old", Duration::ZERO);
        let stale = rx.recv().await.unwrap();
        debouncer.schedule("new", Duration::ZERO);

        assert_eq!(debouncer.accept(stale), None);
        assert!(debouncer.is_pending());
        let fresh = rx.recv().await.unwrap();
        assert_eq!(debouncer.accept(fresh), Some("new"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_value() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(tx);

        debouncer.schedule("gone", DELAY);
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(DELAY * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel::<Settled<&str>>();
        let mut debouncer = Debouncer::new(tx);

        debouncer.schedule("unmounted", DELAY);
        drop(debouncer);

        // Every sender is gone once the aborted task is dropped.
        assert!(rx.recv().await.is_none());
    }
}
