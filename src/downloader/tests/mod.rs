//! Tests for the downloader: resource task lifecycle, worker bound and decoding.

use std::collections::HashMap;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::Config;
use crate::types::{DownloadStatus, FILE_FORMATS_KEY, HEADERS_KEY, MediaInfo, ProgressEvent};

use super::MediaDownloader;
use super::test_helpers::{
    FakeTransfer, SlowTransfer, collect_until_terminal, create_test_downloader,
};

mod lifecycle;

fn media(id: &str, url: &str) -> MediaInfo {
    MediaInfo {
        suffix: ".mp4".to_string(),
        ..MediaInfo::new(id, url)
    }
}

fn statuses(events: &[ProgressEvent]) -> Vec<DownloadStatus> {
    events.iter().map(|e| e.status).collect()
}
