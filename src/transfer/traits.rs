//! Traits and types for the transfer collaborator

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Progress callback, invoked with a completion percentage (0.0 to 100.0)
///
/// Implementations must report non-decreasing values for one request.
pub type ProgressCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Everything a transfer needs to fetch one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Final source URL (after quality negotiation)
    pub url: String,
    /// File to write
    pub destination: PathBuf,
    /// Number of parallel chunks the engine may use
    pub parallelism: usize,
    /// Flat request headers
    pub headers: HashMap<String, String>,
}

/// Trait for moving the bytes of one resource to disk
///
/// Retry, resume and chunking are the implementation's business. A returned
/// error is reported to the resource's listeners as-is and ends its task.
#[async_trait]
pub trait Transfer: Send + Sync {
    /// Fetch `request.url` into `request.destination`
    ///
    /// # Errors
    ///
    /// Any failure that leaves the destination incomplete.
    async fn start(&self, request: TransferRequest, progress: ProgressCallback)
    -> crate::Result<()>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
