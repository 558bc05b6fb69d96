//! Progress event delivery
//!
//! Download tasks publish [`ProgressEvent`]s into a bounded broadcast channel
//! owned by [`MediaDownloader`](crate::MediaDownloader). Sending never blocks
//! a download task. A subscriber that falls more than the channel capacity
//! behind loses the oldest events and sees `RecvError::Lagged`.
//!
//! [`spawn_event_forwarder`] bridges one subscription to an external
//! publish/subscribe sink. A slow sink only delays its own forwarder.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use crate::types::{PROGRESS_EVENT_NAME, ProgressEvent};

/// External publish/subscribe sink for progress events
///
/// Delivery is best-effort: errors are logged by the forwarder and the event
/// is not retried.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Publish one event under `event_name`
    async fn publish(&self, event_name: &str, event: &ProgressEvent) -> crate::Result<()>;
}

/// Sink that writes every event to the tracing log
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

#[async_trait]
impl EventSink for TracingSink {
    async fn publish(&self, event_name: &str, event: &ProgressEvent) -> crate::Result<()> {
        tracing::info!(
            event = event_name,
            resource_id = %event.id,
            status = %event.status,
            save_path = %event.save_path.display(),
            message = %event.message,
            "progress"
        );
        Ok(())
    }
}

/// Forward every event from `events` to `sink` until the channel closes
///
/// Events are published under [`PROGRESS_EVENT_NAME`]. Returns the number of
/// events handed to the sink.
pub fn spawn_event_forwarder<S>(
    mut events: broadcast::Receiver<ProgressEvent>,
    sink: S,
) -> tokio::task::JoinHandle<u64>
where
    S: EventSink + 'static,
{
    tokio::spawn(async move {
        let mut forwarded = 0u64;
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Err(e) = sink.publish(PROGRESS_EVENT_NAME, &event).await {
                        tracing::warn!(
                            resource_id = %event.id,
                            error = %e,
                            "Failed to publish progress event"
                        );
                    }
                    forwarded += 1;
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event forwarder lagged, oldest events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
        forwarded
    })
}
