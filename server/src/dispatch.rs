//! Event Dispatch
//!
//! Verified events are pushed onto a bounded queue and drained by a consumer
//! task, so the webhook response does not wait on event handling.

use lw_common::Event;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

/// Sending half held by the HTTP receiver.
pub type EventSender = mpsc::Sender<Event>;

/// Receiving half drained by the consumer.
pub type EventReceiver = mpsc::Receiver<Event>;

/// Create a bounded event queue.
pub fn channel(capacity: usize) -> (EventSender, EventReceiver) {
    mpsc::channel(capacity)
}

/// Spawn the default consumer, which logs every event it receives.
///
/// The task ends once every sender has been dropped.
pub fn spawn_event_logger(mut rx: EventReceiver) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let mut handled = 0u64;
        while let Some(event) = rx.recv().await {
            log_event(&event);
            handled += 1;
        }
        info!(handled, "Event queue closed");
        handled
    })
}

fn log_event(event: &Event) {
    info!(
        event_type = %event.kind,
        source_id = event.source.as_ref().and_then(|s| s.source_id()),
        webhook_event_id = event.webhook_event_id.as_deref(),
        message_id = event.message.as_ref().and_then(|m| m.id()),
        redelivery = event.is_redelivery(),
        timestamp = event.timestamp,
        "Received LINE event"
    );
}
