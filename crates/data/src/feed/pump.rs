//! Async driver connecting the feed collaborator to the pipeline.

use crate::feed::{FeedMessage, PoolStore};
use dexscan_domain::snapshot::PoolSnapshot;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

/// Events delivered by the feed connection.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A decoded message.
    Message(FeedMessage),
    /// A raw JSON payload.
    Raw(String),
    /// The connection dropped; all state is discarded.
    Disconnected,
}

/// Runs a [`PoolStore`], publishing snapshots at frame boundaries.
pub struct FeedPump {
    store: PoolStore,
    inbound: mpsc::Receiver<FeedEvent>,
    snapshot_tx: mpsc::UnboundedSender<PoolSnapshot>,
    snapshot_rx: Option<mpsc::UnboundedReceiver<PoolSnapshot>>,
}

impl FeedPump {
    /// Creates a pump and the sender the feed connection writes to.
    pub fn new(store: PoolStore, buffer: usize) -> (Self, mpsc::Sender<FeedEvent>) {
        let (tx, inbound) = mpsc::channel(buffer);
        let (snapshot_tx, snapshot_rx) = mpsc::unbounded_channel();
        let pump = Self {
            store,
            inbound,
            snapshot_tx,
            snapshot_rx: Some(snapshot_rx),
        };
        (pump, tx)
    }

    /// Takes the snapshot receiver. Returns `None` after the first call.
    pub fn take_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<PoolSnapshot>> {
        self.snapshot_rx.take()
    }

    /// Processes events until the inbound channel closes, then flushes what
    /// remains.
    pub async fn run(mut self) {
        info!("Feed pump started");
        loop {
            let deadline = self.store.next_deadline();
            tokio::select! {
                event = self.inbound.recv() => match event {
                    Some(FeedEvent::Message(message)) => self.store.ingest(message),
                    Some(FeedEvent::Raw(payload)) => {
                        if let Err(e) = self.store.ingest_json(&payload) {
                            warn!(error = %e, "Dropping malformed feed payload");
                        }
                    }
                    Some(FeedEvent::Disconnected) => {
                        let snapshot = self.store.reset();
                        self.publish(snapshot);
                    }
                    None => break,
                },
                _ = wait_for(deadline), if deadline.is_some() => {
                    if let Some(snapshot) = self.store.poll(Instant::now()) {
                        self.publish(snapshot);
                    }
                }
            }
        }

        if self.store.has_pending() {
            let snapshot = self.store.flush();
            self.publish(snapshot);
        }
        info!(stats = ?self.store.stats(), "Feed pump stopped");
    }

    fn publish(&self, snapshot: PoolSnapshot) {
        debug!(version = snapshot.version, "Publishing snapshot");
        if self.snapshot_tx.send(snapshot).is_err() {
            debug!("Snapshot receiver dropped");
        }
    }
}

async fn wait_for(deadline: Option<Instant>) {
    if let Some(deadline) = deadline {
        sleep_until(deadline).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use std::time::Duration;

    fn block(n: u64) -> FeedEvent {
        FeedEvent::Message(FeedMessage {
            block_number: Some(n),
            ..FeedMessage::default()
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_is_coalesced_into_frames() {
        let store = PoolStore::new(FeedConfig {
            frame_interval: Duration::from_millis(16),
            ..FeedConfig::default()
        });
        let (mut pump, tx) = FeedPump::new(store, 16);
        let mut rx = pump.take_receiver().unwrap();
        assert!(pump.take_receiver().is_none());
        let handle = tokio::spawn(pump.run());

        for n in 1..=5 {
            tx.send(block(n)).await.unwrap();
        }
        let first = rx.recv().await.unwrap();
        tx.send(block(6)).await.unwrap();
        drop(tx);
        handle.await.unwrap();

        let mut last = first.clone();
        while let Ok(snapshot) = rx.try_recv() {
            last = snapshot;
        }
        assert!(first.block_number >= 1);
        assert_eq!(last.block_number, 6);
        assert!(last.version <= 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_publishes_empty_snapshot() {
        let (mut pump, tx) = FeedPump::new(PoolStore::default(), 4);
        let mut rx = pump.take_receiver().unwrap();
        let handle = tokio::spawn(pump.run());

        tx.send(block(10)).await.unwrap();
        let before = rx.recv().await.unwrap();
        assert_eq!(before.block_number, 10);

        tx.send(FeedEvent::Disconnected).await.unwrap();
        let after = rx.recv().await.unwrap();
        assert_eq!(after.block_number, 0);
        assert!(after.is_empty());

        drop(tx);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_raw_payload_is_skipped() {
        let (mut pump, tx) = FeedPump::new(PoolStore::default(), 4);
        let mut rx = pump.take_receiver().unwrap();
        let handle = tokio::spawn(pump.run());

        tx.send(FeedEvent::Raw("{oops".to_string())).await.unwrap();
        tx.send(FeedEvent::Raw(r#"{"block_number": 3}"#.to_string()))
            .await
            .unwrap();
        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot.block_number, 3);

        drop(tx);
        handle.await.unwrap();
    }
}
