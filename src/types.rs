//! Core types for media-dl

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Event name under which progress events are published to an external sink
pub const PROGRESS_EVENT_NAME: &str = "downloadProgress";

/// Side-metadata key holding a JSON header map (`{"Name": ["value", ...]}`)
pub const HEADERS_KEY: &str = "headers";

/// Side-metadata key holding `#`-delimited alternate format descriptors
pub const FILE_FORMATS_KEY: &str = "wx_file_formats";

/// Descriptor of one downloadable resource
///
/// Serialized with PascalCase field names to match the descriptor shape
/// produced by the capture side.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaInfo {
    /// Opaque identifier, echoed in every progress event
    #[serde(default)]
    pub id: String,

    /// Source location
    pub url: String,

    /// Optional human label used to derive the filename
    #[serde(default)]
    pub description: String,

    /// File extension appended to the derived filename (e.g. ".mp4")
    #[serde(default)]
    pub suffix: String,

    /// Output path, empty until the downloader assigns one
    #[serde(default)]
    pub save_path: PathBuf,

    /// Free-form side metadata (see [`HEADERS_KEY`] and [`FILE_FORMATS_KEY`])
    #[serde(default)]
    pub other_data: HashMap<String, String>,
}

impl MediaInfo {
    /// Create a descriptor with just an id and a URL
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Look up a side-metadata entry, treating empty values as absent
    pub fn other(&self, key: &str) -> Option<&str> {
        self.other_data
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Download status
///
/// `Ready` and `Handle` belong to the surrounding application; the download
/// core only emits `Running`, `Error` and `Done`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    /// Task created but not started
    Ready,
    /// Transfer or decode in progress
    Running,
    /// Terminal failure
    Error,
    /// Terminal success
    Done,
    /// Handed over to post-download handling elsewhere
    Handle,
}

impl DownloadStatus {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadStatus::Ready => "ready",
            DownloadStatus::Running => "running",
            DownloadStatus::Error => "error",
            DownloadStatus::Done => "done",
            DownloadStatus::Handle => "handle",
        }
    }

    /// Whether no further events follow this one for the same resource
    pub fn is_terminal(&self) -> bool {
        matches!(self, DownloadStatus::Error | DownloadStatus::Done)
    }
}

impl std::fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status notification for one resource task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProgressEvent {
    /// Resource id from [`MediaInfo::id`]
    pub id: String,
    /// Current status
    pub status: DownloadStatus,
    /// Output path assigned to the resource
    pub save_path: PathBuf,
    /// Percentage, phase label, or error text
    pub message: String,
}

/// Media-type category used by the resource filter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Catch-all switch
    All,
    /// Images
    Image,
    /// Audio
    Audio,
    /// Video files
    Video,
    /// HLS playlists
    M3u8,
    /// Live streams
    Live,
    /// Spreadsheets
    Xls,
    /// Documents
    Doc,
    /// PDF files
    Pdf,
}

impl Category {
    /// Every known category
    pub const ALL: [Category; 9] = [
        Category::All,
        Category::Image,
        Category::Audio,
        Category::Video,
        Category::M3u8,
        Category::Live,
        Category::Xls,
        Category::Doc,
        Category::Pdf,
    ];

    /// Name used in filter configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Image => "image",
            Category::Audio => "audio",
            Category::Video => "video",
            Category::M3u8 => "m3u8",
            Category::Live => "live",
            Category::Xls => "xls",
            Category::Doc => "doc",
            Category::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| crate::Error::UnknownCategory(s.to_string()))
    }
}
