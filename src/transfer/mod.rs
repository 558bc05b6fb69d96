//! Byte transfer collaborator
//!
//! The download core does not move bytes itself. It hands a fully prepared
//! [`TransferRequest`] (final URL, destination, parallelism, headers) to a
//! [`Transfer`] implementation and listens to its progress callback.
//!
//! - [`HttpTransfer`]: bundled single-stream HTTP implementation (reqwest)
//! - any chunked/resumable engine can be plugged in by implementing [`Transfer`]
//!
//! ## Usage
//!
//! ```no_run
//! use media_dl::transfer::{HttpTransfer, Transfer, TransferRequest};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transfer = HttpTransfer::new();
//!     let request = TransferRequest {
//!         url: "https://example.com/video.mp4".to_string(),
//!         destination: "downloads/video.mp4".into(),
//!         parallelism: 4,
//!         headers: HashMap::new(),
//!     };
//!
//!     transfer
//!         .start(request, Arc::new(|percent| println!("{percent:.0}%")))
//!         .await?;
//!     Ok(())
//! }
//! ```

mod http;
mod traits;

pub use http::HttpTransfer;
pub use traits::{ProgressCallback, Transfer, TransferRequest};
