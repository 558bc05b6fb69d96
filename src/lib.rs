//! # media-dl
//!
//! Download core for media resources observed by a capture layer.
//!
//! ## Overview
//!
//! - [`ResourceRegistry`] remembers which resources were already seen and
//!   which media categories the user currently wants captured
//! - [`MediaDownloader`] turns a resource descriptor into a background
//!   download: output naming, quality negotiation, header assembly, the byte
//!   transfer and an optional in-place decode
//! - [`decoder`] holds the XOR decode applied to protected media
//! - Progress is published as [`ProgressEvent`]s on a broadcast channel;
//!   consumers subscribe instead of polling
//!
//! ## Quick Start
//!
//! ```no_run
//! use media_dl::{Config, HttpTransfer, MediaDownloader, MediaInfo, ResourceRegistry};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         save_directory: "downloads".into(),
//!         ..Default::default()
//!     };
//!     let registry = Arc::new(ResourceRegistry::new(config.unknown_category_policy));
//!     let downloader = MediaDownloader::new(config, Arc::new(HttpTransfer::new()))?;
//!
//!     // Subscribe to events
//!     let mut events = downloader.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let media = MediaInfo::new("42", "https://example.com/clip.mp4");
//!     if !registry.media_is_marked(&media.url).await {
//!         registry.mark_media(&media.url).await;
//!         if let Some(handle) = downloader.download(media, None) {
//!             handle.await?;
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// XOR decoding of protected media files
pub mod decoder;
/// Download orchestration (decomposed into focused submodules)
pub mod downloader;
/// Error types
pub mod error;
/// Forwarding progress events to external sinks
pub mod events;
/// Seen-resource marks and the category filter
pub mod registry;
/// Byte transfer collaborators
pub mod transfer;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::{Config, UnknownCategoryPolicy};
pub use downloader::MediaDownloader;
pub use error::{DecodeError, Error, Result};
pub use events::{EventSink, TracingSink, spawn_event_forwarder};
pub use registry::ResourceRegistry;
pub use transfer::{HttpTransfer, ProgressCallback, Transfer, TransferRequest};
pub use types::{Category, DownloadStatus, MediaInfo, PROGRESS_EVENT_NAME, ProgressEvent};
