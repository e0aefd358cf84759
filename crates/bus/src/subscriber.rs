//! Event subscriber trait for async event handling

use crate::error::BusError;
use crate::event::RecordedEvent;
use async_trait::async_trait;

/// Trait for event subscribers
///
/// Subscribers receive recorded wallet events in sequence order.
/// Handlers should tolerate seeing the same event twice.
#[async_trait]
pub trait EventSubscriber: Send + Sync {
    /// Get the subscriber name (for logging)
    fn name(&self) -> &str;

    /// Handle a recorded event
    async fn handle(&self, event: &RecordedEvent) -> Result<(), BusError>;

    /// Called when replay starts (optional)
    async fn on_replay_start(&self) -> Result<(), BusError> {
        Ok(())
    }

    /// Called when replay completes (optional)
    async fn on_replay_complete(&self) -> Result<(), BusError> {
        Ok(())
    }

    /// Last sequence this subscriber has already processed.
    ///
    /// Replay skips everything at or below it. `None` replays the full history.
    fn last_processed_sequence(&self) -> Option<u64> {
        None
    }
}
