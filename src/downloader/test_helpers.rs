//! Shared test helpers: in-memory transfers and downloader construction.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::{TempDir, tempdir};
use tokio::sync::broadcast;

use crate::config::Config;
use crate::downloader::MediaDownloader;
use crate::error::{Error, Result};
use crate::transfer::{ProgressCallback, Transfer, TransferRequest};
use crate::types::ProgressEvent;

/// Transfer that writes a fixed body and replays scripted progress values
#[derive(Default)]
pub(crate) struct FakeTransfer {
    pub(crate) body: Vec<u8>,
    pub(crate) progress: Vec<f64>,
    pub(crate) fail_with: Option<String>,
    pub(crate) requests: Mutex<Vec<TransferRequest>>,
}

impl FakeTransfer {
    pub(crate) fn writing(body: &[u8]) -> Self {
        Self {
            body: body.to_vec(),
            progress: vec![25.0, 50.0, 100.0],
            ..Self::default()
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            progress: vec![10.0],
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn requests(&self) -> Vec<TransferRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transfer for FakeTransfer {
    async fn start(&self, request: TransferRequest, progress: ProgressCallback) -> Result<()> {
        self.requests.lock().unwrap().push(request.clone());
        for p in &self.progress {
            progress(*p);
        }
        if let Some(msg) = &self.fail_with {
            return Err(Error::Transfer(msg.clone()));
        }
        if let Some(parent) = request.destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&request.destination, &self.body).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Transfer that holds each request briefly and records peak concurrency
#[derive(Default)]
pub(crate) struct SlowTransfer {
    active: AtomicUsize,
    pub(crate) peak: AtomicUsize,
}

#[async_trait]
impl Transfer for SlowTransfer {
    async fn start(&self, request: TransferRequest, progress: ProgressCallback) -> Result<()> {
        if let Some(parent) = request.destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        tokio::fs::write(&request.destination, b"x").await?;
        progress(100.0);
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "slow"
    }
}

/// Create a downloader saving into a fresh temp directory.
/// Returns the downloader and the tempdir (which must be kept alive).
pub(crate) fn create_test_downloader(
    transfer: Arc<dyn Transfer>,
    tweak: impl FnOnce(&mut Config),
) -> (MediaDownloader, TempDir) {
    let temp_dir = tempdir().unwrap();
    let mut config = Config {
        save_directory: temp_dir.path().join("downloads"),
        ..Config::default()
    };
    tweak(&mut config);

    let downloader = MediaDownloader::new(config, transfer).unwrap();
    (downloader, temp_dir)
}

/// Drain events until every id in `ids` has seen a terminal event
pub(crate) async fn collect_until_terminal(
    rx: &mut broadcast::Receiver<ProgressEvent>,
    ids: &[&str],
) -> HashMap<String, Vec<ProgressEvent>> {
    let mut by_id: HashMap<String, Vec<ProgressEvent>> = HashMap::new();
    let mut finished = 0;

    while finished < ids.len() {
        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for events")
            .expect("event channel closed or lagged");
        if event.status.is_terminal() {
            finished += 1;
        }
        by_id.entry(event.id.clone()).or_default().push(event);
    }

    by_id
}
