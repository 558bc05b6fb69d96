//! Fixed-length XOR deobfuscation of a file's leading bytes
//!
//! Some media hosts obfuscate the first `K` bytes of a file by XOR-ing them
//! with a per-resource key delivered as base64. Decoding XORs the same key
//! over the same region again; because XOR is self-inverse, running the
//! transform twice restores the original bytes.
//!
//! The transform covers `min(K, file length)` bytes. Files shorter than the
//! key are transformed over their actual length only and are never extended.

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::DecodeError;

/// Decode a standard-alphabet base64 key into raw bytes
pub fn decode_key(base64_key: &str) -> Result<Vec<u8>, DecodeError> {
    let key = STANDARD.decode(base64_key.trim())?;
    if key.is_empty() {
        return Err(DecodeError::EmptyKey);
    }
    Ok(key)
}

/// XOR `key` over `buf` position by position
///
/// Only `min(buf.len(), key.len())` bytes are touched.
pub fn xor_in_place(buf: &mut [u8], key: &[u8]) {
    for (b, k) in buf.iter_mut().zip(key) {
        *b ^= k;
    }
}

/// Reverse the XOR obfuscation of `path` in place
///
/// Returns the number of bytes transformed. Bytes past the key length are
/// never read or written.
///
/// # Errors
///
/// - [`DecodeError::InvalidKey`] / [`DecodeError::EmptyKey`] for a bad key
/// - [`DecodeError::Io`] if the file cannot be opened, read or written
///
/// # Examples
///
/// ```no_run
/// use media_dl::decoder::decode_file;
/// use std::path::Path;
///
/// let transformed = decode_file(Path::new("downloads/clip.mp4"), "AAECAw==")?;
/// assert!(transformed <= 4);
/// # Ok::<(), media_dl::DecodeError>(())
/// ```
pub fn decode_file(path: &Path, base64_key: &str) -> Result<usize, DecodeError> {
    let key = decode_key(base64_key)?;

    let mut file = OpenOptions::new().read(true).write(true).open(path)?;

    let mut head = Vec::with_capacity(key.len());
    std::io::Read::by_ref(&mut file).take(key.len() as u64).read_to_end(&mut head)?;

    if head.len() < key.len() {
        tracing::debug!(
            path = %path.display(),
            key_len = key.len(),
            file_len = head.len(),
            "File shorter than decode key, transforming available bytes only"
        );
    }

    xor_in_place(&mut head, &key);

    file.seek(SeekFrom::Start(0))?;
    file.write_all(&head)?;
    file.flush()?;

    Ok(head.len())
}
