//! Lifecycle of one resource task started by `download`.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::Config;
use crate::decoder;
use crate::transfer::{ProgressCallback, Transfer, TransferRequest};
use crate::types::{DownloadStatus, FILE_FORMATS_KEY, MediaInfo, ProgressEvent};

use super::{headers, naming, quality};

/// Message of the running event emitted before decoding
pub(crate) const DECRYPTING_MESSAGE: &str = "decrypting";

/// Message of the terminal success event
pub(crate) const DONE_MESSAGE: &str = "done";

/// Shared context for a single resource task
pub(crate) struct ResourceTaskContext {
    pub(crate) media: MediaInfo,
    pub(crate) decode_key: Option<String>,
    pub(crate) config: Arc<Config>,
    pub(crate) transfer: Arc<dyn Transfer>,
    pub(crate) event_tx: broadcast::Sender<ProgressEvent>,
}

impl ResourceTaskContext {
    /// Publish a progress event for this resource
    ///
    /// Send errors only mean nobody is subscribed and are ignored.
    pub(crate) fn emit(&self, status: DownloadStatus, message: impl Into<String>) {
        self.event_tx
            .send(ProgressEvent {
                id: self.media.id.clone(),
                status,
                save_path: self.media.save_path.clone(),
                message: message.into(),
            })
            .ok();
    }

    /// Callback that turns transfer percentages into running events
    fn progress_callback(&self) -> ProgressCallback {
        let event_tx = self.event_tx.clone();
        let id = self.media.id.clone();
        let save_path = self.media.save_path.clone();
        Arc::new(move |percent: f64| {
            event_tx
                .send(ProgressEvent {
                    id: id.clone(),
                    status: DownloadStatus::Running,
                    save_path: save_path.clone(),
                    message: format!("{}%", percent as u64),
                })
                .ok();
        })
    }
}

/// Run one resource from naming to its terminal event
///
/// Phases:
/// 1. Derive the output path (from the original URL)
/// 2. Rewrite the URL for the configured quality tier
/// 3. Assemble headers from side metadata
/// 4. Hand off to the transfer collaborator
/// 5. Decode in place when a key was supplied
///
/// Exactly one terminal event (`error` or `done`) is emitted.
pub(crate) async fn run_resource_task(mut ctx: ResourceTaskContext) {
    // Phase 1: output path
    ctx.media.save_path = naming::derive_save_path(&ctx.config, &ctx.media);

    // Phase 2: quality negotiation
    ctx.media.url = quality::negotiate_url(
        &ctx.media.url,
        ctx.config.quality,
        ctx.media.other(FILE_FORMATS_KEY),
    );

    // Phase 3: headers
    let headers = headers::assemble_headers(&ctx.media);

    tracing::info!(
        resource_id = %ctx.media.id,
        save_path = %ctx.media.save_path.display(),
        transfer = ctx.transfer.name(),
        "Starting resource download"
    );

    // Phase 4: transfer
    let request = TransferRequest {
        url: ctx.media.url.clone(),
        destination: ctx.media.save_path.clone(),
        parallelism: ctx.config.task_number,
        headers,
    };
    if let Err(e) = ctx.transfer.start(request, ctx.progress_callback()).await {
        tracing::error!(resource_id = %ctx.media.id, error = %e, "Transfer failed");
        ctx.emit(DownloadStatus::Error, e.to_string());
        return;
    }

    // Phase 5: decode
    if let Some(key) = ctx.decode_key.take() {
        ctx.emit(DownloadStatus::Running, DECRYPTING_MESSAGE);

        let path = ctx.media.save_path.clone();
        let outcome = tokio::task::spawn_blocking(move || decoder::decode_file(&path, &key))
            .await
            .map_err(|e| format!("decode task failed: {e}"))
            .and_then(|r| r.map_err(|e| e.to_string()));

        match outcome {
            Ok(bytes) => {
                tracing::debug!(resource_id = %ctx.media.id, bytes, "Decoded resource");
            }
            Err(msg) => {
                tracing::error!(resource_id = %ctx.media.id, error = %msg, "Decode failed");
                ctx.emit(DownloadStatus::Error, format!("decrypt failed: {msg}"));
                return;
            }
        }
    }

    tracing::info!(resource_id = %ctx.media.id, "Resource download complete");
    ctx.emit(DownloadStatus::Done, DONE_MESSAGE);
}
