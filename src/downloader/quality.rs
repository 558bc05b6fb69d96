//! Source URL rewriting for quality negotiation.

use url::Url;

/// Content host whose URLs understand the quality parameters below
const CONTENT_HOST: &str = "qq.com";

/// Query parameter carrying the encrypted file key
const ENC_FILE_KEY_PARAM: &str = "encfilekey";

/// Query parameter carrying the access token
const TOKEN_PARAM: &str = "token";

/// Query parameter selecting an alternate encoded variant
const VARIANT_PARAM: &str = "X-snsvideoflag";

fn is_content_host(url: &Url) -> bool {
    url.host_str().is_some_and(|host| {
        host == CONTENT_HOST
            || host
                .strip_suffix(CONTENT_HOST)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

fn query_value(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

/// Pick first, middle or last of a `#`-delimited descriptor list
///
/// `index` 0, 1 and 2 select first, middle (`len / 2`) and last respectively.
fn select_format(formats: &str, index: usize) -> Option<&str> {
    let list: Vec<&str> = formats.split('#').collect();
    let choices = [list[0], list[list.len() / 2], list[list.len() - 1]];
    choices.get(index).copied()
}

/// Rewrite `raw_url` for the configured quality tier
///
/// - tier 1: when the URL carries both `encfilekey` and `token`, keep only
///   those two query parameters
/// - tier >= 2: append the format descriptor chosen by `quality - 2` from
///   `formats`
/// - anything else, or a URL outside the content host, is returned unchanged
pub(crate) fn negotiate_url(raw_url: &str, quality: i32, formats: Option<&str>) -> String {
    let Ok(mut url) = Url::parse(raw_url) else {
        return raw_url.to_string();
    };
    if !is_content_host(&url) {
        return raw_url.to_string();
    }

    match quality {
        1 => {
            let (Some(key), Some(token)) = (
                query_value(&url, ENC_FILE_KEY_PARAM),
                query_value(&url, TOKEN_PARAM),
            ) else {
                return raw_url.to_string();
            };
            url.set_query(None);
            url.set_fragment(None);
            url.query_pairs_mut()
                .append_pair(ENC_FILE_KEY_PARAM, &key)
                .append_pair(TOKEN_PARAM, &token);
            tracing::debug!(url = %url, "Reduced URL to key and token");
            url.into()
        }
        q if q >= 2 => {
            let Some(formats) = formats else {
                return raw_url.to_string();
            };
            match select_format(formats, (q - 2) as usize) {
                Some(variant) => {
                    url.query_pairs_mut().append_pair(VARIANT_PARAM, variant);
                    tracing::debug!(quality = q, variant, "Requested alternate variant");
                    url.into()
                }
                None => {
                    tracing::debug!(quality = q, "Quality tier beyond available variants");
                    raw_url.to_string()
                }
            }
        }
        _ => raw_url.to_string(),
    }
}
