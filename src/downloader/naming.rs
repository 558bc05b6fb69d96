//! Destination filename derivation.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;
use crate::types::MediaInfo;

/// Anything that is not an ASCII word character or a Han ideograph
#[allow(clippy::expect_used)]
static STEM_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_\p{Han}]").expect("static pattern compiles"));

/// Timestamp appended to stems when `filename_time` is set
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Lowercase hex MD5 of the source URL, the stem used when there is no description
pub(crate) fn url_stem(url: &str) -> String {
    format!("{:x}", md5::compute(url.as_bytes()))
}

/// Strip a description down to word characters and Han ideographs, keeping
/// at most `max_chars` code points
pub(crate) fn description_stem(description: &str, max_chars: usize) -> String {
    STEM_STRIP
        .replace_all(description, "")
        .chars()
        .take(max_chars)
        .collect()
}

/// Compute the output path for `media`
///
/// The stem is the sanitized description, or the URL hash when nothing of
/// the description survives sanitizing; `_<timestamp>` is appended when configured, then the suffix.
pub(crate) fn derive_save_path(config: &Config, media: &MediaInfo) -> PathBuf {
    let mut stem = description_stem(&media.description, config.effective_filename_len());
    if stem.is_empty() {
        stem = url_stem(&media.url);
    }

    if config.filename_time {
        stem.push('_');
        stem.push_str(&chrono::Local::now().format(TIMESTAMP_FORMAT).to_string());
    }

    stem.push_str(&media.suffix);
    config.save_directory.join(stem)
}
