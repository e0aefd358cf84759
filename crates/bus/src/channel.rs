//! In-process event bus
//!
//! Keeps the full ordered history and forwards each new event to live
//! receivers. The history is the source of truth; the broadcast channel is
//! best effort and lagging receivers may miss events.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tokio::sync::broadcast;

use crate::error::BusError;
use crate::event::{RecordedEvent, WalletEvent};
use crate::subscriber::EventSubscriber;

/// Default capacity of the live broadcast channel
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Largest live channel capacity accepted by `EventBus::new`
pub const MAX_CHANNEL_CAPACITY: usize = 1 << 16;

/// Event bus for distributing wallet events
pub struct EventBus {
    history: Mutex<Vec<RecordedEvent>>,
    sender: broadcast::Sender<RecordedEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl EventBus {
    /// Create a new event bus with the given live channel capacity
    ///
    /// The capacity is clamped to `1..=MAX_CHANNEL_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.clamp(1, MAX_CHANNEL_CAPACITY));
        Self {
            history: Mutex::new(Vec::new()),
            sender,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedEvent>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an event and forward it to live receivers
    pub fn publish(&self, event: WalletEvent) -> RecordedEvent {
        let mut history = self.lock();
        let recorded = RecordedEvent {
            sequence: history.len() as u64 + 1,
            event,
            recorded_at: Utc::now(),
        };
        history.push(recorded.clone());

        // Sending under the lock keeps live delivery in sequence order
        if self.sender.send(recorded.clone()).is_err() {
            tracing::trace!(sequence = recorded.sequence, "No live receivers");
        }

        recorded
    }

    /// Receive events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<RecordedEvent> {
        self.sender.subscribe()
    }

    /// Snapshot of the full history
    pub fn history(&self) -> Vec<RecordedEvent> {
        self.lock().clone()
    }

    /// Events with a sequence number greater than `sequence`
    pub fn since(&self, sequence: u64) -> Vec<RecordedEvent> {
        let history = self.lock();
        let start = usize::try_from(sequence).unwrap_or(usize::MAX).min(history.len());
        history[start..].to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Replay the history into a subscriber
    ///
    /// Returns the number of events delivered.
    pub async fn replay(&self, subscriber: &dyn EventSubscriber) -> Result<usize, BusError> {
        let from = subscriber.last_processed_sequence().unwrap_or(0);
        let events = self.since(from);

        tracing::debug!(
            subscriber = subscriber.name(),
            from_sequence = from,
            count = events.len(),
            "Replay started"
        );

        subscriber.on_replay_start().await?;

        for event in &events {
            subscriber.handle(event).await.map_err(|e| {
                tracing::error!(
                    subscriber = subscriber.name(),
                    sequence = event.sequence,
                    error = %e,
                    "Subscriber failed during replay"
                );
                BusError::ReplayFailed(format!(
                    "{} at sequence {}: {}",
                    subscriber.name(),
                    event.sequence,
                    e
                ))
            })?;
        }

        subscriber.on_replay_complete().await?;

        Ok(events.len())
    }
}
