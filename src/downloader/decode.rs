//! Decode a downloaded file into a copy, leaving the source untouched.

use std::path::{Path, PathBuf};

use crate::decoder;
use crate::error::{Error, Result};
use crate::types::MediaInfo;

use super::MediaDownloader;

/// Extension marker replaced in the source filename
const ENCRYPTED_MARKER: &str = ".mp4";

/// Replacement marking the decoded copy
const DECRYPTED_MARKER: &str = "_decrypted.mp4";

/// Suffix inserted before the extension when the filename has no marker
const DECRYPTED_SUFFIX: &str = "_decrypted";

/// Path of the decoded copy for `source`
///
/// `clip.mp4` becomes `clip_decrypted.mp4`. Names without the `.mp4` marker
/// get `_decrypted` before their extension so the copy never overwrites the
/// source.
pub(crate) fn decrypted_path(source: &Path) -> PathBuf {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let new_name = if file_name.contains(ENCRYPTED_MARKER) {
        file_name.replace(ENCRYPTED_MARKER, DECRYPTED_MARKER)
    } else {
        match (
            source.file_stem().map(|s| s.to_string_lossy()),
            source.extension().map(|e| e.to_string_lossy()),
        ) {
            (Some(stem), Some(ext)) => format!("{stem}{DECRYPTED_SUFFIX}.{ext}"),
            _ => format!("{file_name}{DECRYPTED_SUFFIX}"),
        }
    };

    source.with_file_name(new_name)
}

impl MediaDownloader {
    /// Decode `source` into a sibling copy and return the copy's path
    ///
    /// The source bytes are copied verbatim to the derived path, then the
    /// copy is decoded in place with `decode_key`. The source file is never
    /// modified.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the source cannot be read or the copy created
    /// - [`Error::Decode`] if the key is invalid or the copy cannot be rewritten
    pub async fn wx_file_decode(
        &self,
        media: &MediaInfo,
        source: &Path,
        decode_key: &str,
    ) -> Result<PathBuf> {
        let source = source.to_path_buf();
        let destination = decrypted_path(&source);
        if destination == source {
            return Err(Error::Other(format!(
                "cannot derive a decoded path distinct from {}",
                source.display()
            )));
        }

        let key = decode_key.to_string();
        let target = destination.clone();
        let copied = tokio::task::spawn_blocking(move || -> Result<u64> {
            let copied = std::fs::copy(&source, &target)?;
            decoder::decode_file(&target, &key)?;
            Ok(copied)
        })
        .await
        .map_err(|e| Error::Other(format!("decode task failed: {e}")))??;

        tracing::info!(
            resource_id = %media.id,
            path = %destination.display(),
            bytes = copied,
            "Decoded copy written"
        );
        Ok(destination)
    }
}
