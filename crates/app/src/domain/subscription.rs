//! Live query handles shared by the stores.

use tokio::sync::{mpsc, oneshot, watch};
use tracing::debug;

const SNAPSHOT_BUFFER: usize = 16;

/// Live view of a store query.
///
/// Yields a full snapshot every time the underlying data changes. The feed
/// is released by [`Subscription::stop`] or on drop; after that no further
/// snapshot is handed out.
#[derive(Debug)]
pub struct Subscription<T> {
    snapshots: mpsc::Receiver<T>,
    stop: Option<oneshot::Sender<()>>,
}

impl<T> Subscription<T> {
    /// Wraps a snapshot feed. Sending on `stop`'s peer tells the producer to
    /// stop; the producer may also just drop its sender.
    #[must_use]
    pub fn new(snapshots: mpsc::Receiver<T>, stop: oneshot::Sender<()>) -> Self {
        Self {
            snapshots,
            stop: Some(stop),
        }
    }

    /// Waits for the next snapshot. `None` once stopped or closed by the store.
    pub async fn next(&mut self) -> Option<T> {
        if self.stop.is_none() {
            return None;
        }

        self.snapshots.recv().await
    }

    /// Releases the feed.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            _ = stop.send(());
        }

        self.snapshots.close();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.stop.as_ref().is_some_and(|stop| !stop.is_closed())
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<T: Send + 'static> Subscription<T> {
    /// Follows a watch channel, sending `view` of the current value first and
    /// again after every change, until stopped or the channel closes.
    pub fn follow<S, F>(mut changes: watch::Receiver<S>, feed: &'static str, view: F) -> Self
    where
        S: Send + Sync + 'static,
        F: Fn(&S) -> T + Send + 'static,
    {
        let (snapshots_tx, snapshots_rx) = mpsc::channel(SNAPSHOT_BUFFER);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            loop {
                let snapshot = view(&*changes.borrow_and_update());

                tokio::select! {
                    _ = &mut stop_rx => break,
                    sent = snapshots_tx.send(snapshot) => if sent.is_err() { break },
                }

                tokio::select! {
                    _ = &mut stop_rx => break,
                    changed = changes.changed() => if changed.is_err() { break },
                }
            }

            debug!(feed, "subscription released");
        });

        Self::new(snapshots_rx, stop_tx)
    }
}
