//! Request header assembly from side metadata.

use std::collections::HashMap;

use crate::error::Result;
use crate::types::{HEADERS_KEY, MediaInfo};

/// Parse the `headers` side-metadata entry into a flat header map
///
/// The entry is JSON of the form `{"Name": ["first", "second"]}`; only the
/// first value of each header is kept and headers with no values are
/// dropped. A missing entry yields an empty map.
pub(crate) fn parse_headers(media: &MediaInfo) -> Result<HashMap<String, String>> {
    let Some(raw) = media.other_data.get(HEADERS_KEY) else {
        return Ok(HashMap::new());
    };

    let multi: HashMap<String, Vec<String>> = serde_json::from_str(raw)?;
    Ok(multi
        .into_iter()
        .filter_map(|(name, values)| values.into_iter().next().map(|v| (name, v)))
        .collect())
}

/// Like [`parse_headers`], but malformed JSON degrades to no headers
pub(crate) fn assemble_headers(media: &MediaInfo) -> HashMap<String, String> {
    parse_headers(media).unwrap_or_else(|e| {
        tracing::warn!(
            resource_id = %media.id,
            error = %e,
            "Ignoring malformed header metadata"
        );
        HashMap::new()
    })
}
