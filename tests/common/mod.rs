//! Common test utilities for media-dl integration tests

use std::sync::Arc;
use std::time::Duration;

use media_dl::{Config, HttpTransfer, MediaDownloader, ProgressEvent};
use tempfile::TempDir;
use tokio::sync::broadcast;

/// Create a downloader using the bundled HTTP transfer, saving into a temp dir
#[allow(dead_code)]
pub fn create_http_downloader(tweak: impl FnOnce(&mut Config)) -> (MediaDownloader, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = Config {
        save_directory: temp_dir.path().join("downloads"),
        ..Default::default()
    };
    tweak(&mut config);

    let downloader = MediaDownloader::new(config, Arc::new(HttpTransfer::new()))
        .expect("Failed to create downloader");
    (downloader, temp_dir)
}

/// Collect events until one satisfies `stop_predicate` or the timeout elapses
#[allow(dead_code)]
pub async fn collect_events_until<F>(
    events: &mut broadcast::Receiver<ProgressEvent>,
    timeout: Duration,
    stop_predicate: F,
) -> Vec<ProgressEvent>
where
    F: Fn(&ProgressEvent) -> bool,
{
    let mut collected = Vec::new();

    let _ = tokio::time::timeout(timeout, async {
        while let Ok(event) = events.recv().await {
            let should_stop = stop_predicate(&event);
            collected.push(event);
            if should_stop {
                break;
            }
        }
    })
    .await;

    collected
}
