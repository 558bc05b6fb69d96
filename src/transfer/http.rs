//! Single-stream HTTP transfer backed by reqwest

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use super::traits::{ProgressCallback, Transfer, TransferRequest};
use crate::error::{Error, Result};

/// Bundled [`Transfer`] that streams one GET response to disk
///
/// Uses a single connection regardless of `parallelism`; there is no retry
/// or resume. Progress is reported each time the whole-number percentage
/// advances, which requires a `Content-Length` from the server. Without one,
/// a single 100% is reported once the body has been written.
#[derive(Clone, Debug, Default)]
pub struct HttpTransfer {
    client: reqwest::Client,
}

impl HttpTransfer {
    /// Create a transfer with a default reqwest client
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transfer sharing an existing client (connection pool, proxy, TLS settings)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transfer for HttpTransfer {
    async fn start(&self, request: TransferRequest, progress: ProgressCallback) -> Result<()> {
        let TransferRequest {
            url,
            destination,
            parallelism,
            headers,
        } = request;

        tracing::debug!(
            url = %url,
            destination = %destination.display(),
            parallelism,
            header_count = headers.len(),
            "Starting HTTP transfer"
        );

        let mut builder = self.client.get(&url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transfer(format!(
                "HTTP {} fetching {}",
                status.as_u16(),
                url
            )));
        }

        let total_bytes = response.content_length().filter(|&n| n > 0);

        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::File::create(&destination).await?;

        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;
        let mut last_percent: Option<u64> = None;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            if let Some(total) = total_bytes {
                let percent = (downloaded.saturating_mul(100) / total).min(100);
                if last_percent.is_none_or(|last| percent > last) {
                    last_percent = Some(percent);
                    progress(percent as f64);
                }
            }
        }

        file.flush().await?;

        if last_percent != Some(100) {
            progress(100.0);
        }

        tracing::debug!(url = %url, bytes = downloaded, "HTTP transfer finished");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
