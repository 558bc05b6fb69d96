//! Download orchestration split into focused submodules.
//!
//! - [`naming`] - Destination filename derivation
//! - [`quality`] - Source URL rewriting per quality tier
//! - [`headers`] - Request header assembly
//! - [`task`] - Lifecycle of one resource task
//! - [`decode`] - Decoding into a copy of an existing file

mod decode;
mod headers;
mod naming;
mod quality;
mod task;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use std::sync::Arc;

use tokio::sync::{Semaphore, broadcast};

use crate::config::Config;
use crate::error::Result;
use crate::transfer::Transfer;
use crate::types::{MediaInfo, ProgressEvent};

use task::{ResourceTaskContext, run_resource_task};

/// Main downloader instance (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct MediaDownloader {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Progress event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: broadcast::Sender<ProgressEvent>,
    /// Byte transfer collaborator shared by every resource task
    pub(crate) transfer: Arc<dyn Transfer>,
    /// Bounds how many resource tasks run their transfer at once
    pub(crate) concurrent_limit: Arc<Semaphore>,
}

impl MediaDownloader {
    /// Create a new MediaDownloader
    ///
    /// Validates the configuration and sets up the event channel and the
    /// worker bound. No directories are created; the transfer collaborator
    /// owns the destination file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) for settings that would
    /// stall the downloader.
    pub fn new(config: Config, transfer: Arc<dyn Transfer>) -> Result<Self> {
        config.validate()?;

        let (event_tx, _rx) = broadcast::channel(config.event_buffer);
        let concurrent_limit = Arc::new(Semaphore::new(config.max_concurrent_downloads));

        tracing::info!(
            transfer = transfer.name(),
            enabled = config.downloads_enabled(),
            max_concurrent = config.max_concurrent_downloads,
            "Media downloader initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            event_tx,
            transfer,
            concurrent_limit,
        })
    }

    /// Subscribe to progress events
    ///
    /// Every subscriber receives all events independently. A subscriber that
    /// falls more than `event_buffer` events behind loses the oldest ones
    /// and receives `RecvError::Lagged`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use media_dl::{Config, HttpTransfer, MediaDownloader, MediaInfo};
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let config = Config {
    ///         save_directory: "downloads".into(),
    ///         ..Config::default()
    ///     };
    ///     let downloader = MediaDownloader::new(config, Arc::new(HttpTransfer::new()))?;
    ///
    ///     let mut events = downloader.subscribe();
    ///     tokio::spawn(async move {
    ///         while let Ok(event) = events.recv().await {
    ///             println!("{} {} {}", event.id, event.status, event.message);
    ///         }
    ///     });
    ///
    ///     downloader.download(MediaInfo::new("1", "https://example.com/a.mp4"), None);
    ///     Ok(())
    /// }
    /// ```
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.event_tx.subscribe()
    }

    /// Get the current configuration
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Start downloading `media` in the background
    ///
    /// Returns immediately. `None` means downloading is disabled (no
    /// `save_directory` configured) and nothing was started. Otherwise the
    /// returned handle completes after the resource's terminal event has
    /// been emitted; dropping it does not stop the task.
    ///
    /// Tasks beyond `max_concurrent_downloads` wait for a free slot in the
    /// order they were submitted. An empty `decode_key` is treated as absent.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn download(
        &self,
        media: MediaInfo,
        decode_key: Option<String>,
    ) -> Option<tokio::task::JoinHandle<()>> {
        if !self.config.downloads_enabled() {
            tracing::debug!(resource_id = %media.id, "Downloading disabled, ignoring request");
            return None;
        }

        let ctx = ResourceTaskContext {
            media,
            decode_key: decode_key.filter(|k| !k.is_empty()),
            config: Arc::clone(&self.config),
            transfer: Arc::clone(&self.transfer),
            event_tx: self.event_tx.clone(),
        };
        let limit = Arc::clone(&self.concurrent_limit);

        Some(tokio::spawn(async move {
            // semaphore is never closed
            let Ok(_permit) = limit.acquire_owned().await else {
                return;
            };
            run_resource_task(ctx).await;
        }))
    }

    /// Number of resource tasks that could start a transfer right now
    pub fn available_slots(&self) -> usize {
        self.concurrent_limit.available_permits()
    }
}
