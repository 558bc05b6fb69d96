//! Configuration types for media-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Stem length used when `filename_len` is zero or negative
pub const DEFAULT_FILENAME_LEN: usize = 10;

/// What to do with category names outside the nine known categories
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategoryPolicy {
    /// Log and skip unknown names, apply the known ones (default)
    #[default]
    Ignore,
    /// Refuse the whole update; the previous filter stays active
    Reject,
}

/// Main configuration for [`MediaDownloader`](crate::MediaDownloader)
///
/// Field names mirror the process-wide settings the download core consumes.
/// Every field has a default, so an empty JSON object deserializes into a
/// usable (but download-disabled) configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Destination directory for downloads (empty = downloading disabled)
    #[serde(default)]
    pub save_directory: PathBuf,

    /// Maximum number of code points kept from a description-derived filename
    /// (values <= 0 fall back to 10)
    #[serde(default = "default_filename_len")]
    pub filename_len: i32,

    /// Append a timestamp to every derived filename
    #[serde(default)]
    pub filename_time: bool,

    /// Parallelism handed to the transfer collaborator for one resource (default: 4)
    #[serde(default = "default_task_number")]
    pub task_number: usize,

    /// Quality tier selector (0 = leave URLs untouched)
    #[serde(default)]
    pub quality: i32,

    /// Maximum resource tasks transferring at once (default: 3)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_downloads: usize,

    /// Capacity of the progress event channel (default: 1000)
    ///
    /// Subscribers that fall further behind than this lose the oldest events.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,

    /// Handling of unknown names passed to the category filter
    #[serde(default)]
    pub unknown_category_policy: UnknownCategoryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_directory: PathBuf::new(),
            filename_len: default_filename_len(),
            filename_time: false,
            task_number: default_task_number(),
            quality: 0,
            max_concurrent_downloads: default_max_concurrent(),
            event_buffer: default_event_buffer(),
            unknown_category_policy: UnknownCategoryPolicy::default(),
        }
    }
}

impl Config {
    /// Whether a destination directory is configured
    pub fn downloads_enabled(&self) -> bool {
        !self.save_directory.as_os_str().is_empty()
    }

    /// Effective filename length, applying the fallback for non-positive values
    pub fn effective_filename_len(&self) -> usize {
        if self.filename_len <= 0 {
            DEFAULT_FILENAME_LEN
        } else {
            self.filename_len as usize
        }
    }

    /// Check settings that would leave the downloader unable to make progress
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_downloads == 0 {
            return Err(Error::Config {
                message: "max_concurrent_downloads must be at least 1".to_string(),
                key: Some("max_concurrent_downloads".to_string()),
            });
        }
        if self.event_buffer == 0 {
            return Err(Error::Config {
                message: "event_buffer must be at least 1".to_string(),
                key: Some("event_buffer".to_string()),
            });
        }
        Ok(())
    }
}

fn default_filename_len() -> i32 {
    DEFAULT_FILENAME_LEN as i32
}

fn default_task_number() -> usize {
    4
}

fn default_max_concurrent() -> usize {
    3
}

fn default_event_buffer() -> usize {
    1000
}
