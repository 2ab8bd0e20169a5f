//! Cache-busting query parameters.

use std::time::{SystemTime, UNIX_EPOCH};

/// A per-load-unique query parameter, `v=<epoch-ms>`, used to defeat HTTP
/// and browser caching of fragments.
pub fn cache_buster() -> String {
    let ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("v={}", ms)
}

/// Append a cache-busting parameter to a URL, respecting any existing
/// query string.
pub fn with_cache_buster(url: &str) -> String {
    append_param(url, &cache_buster())
}

/// Append one query parameter, using `?` or `&` as appropriate.
pub fn append_param(url: &str, param: &str) -> String {
    if url.contains('?') {
        format!("{}&{}", url, param)
    } else {
        format!("{}?{}", url, param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buster_is_epoch_millis() {
        let v = cache_buster();
        let digits = v.strip_prefix("v=").unwrap();
        assert!(digits.parse::<u128>().unwrap() > 0);
    }

    #[test]
    fn appends_with_correct_separator() {
        assert_eq!(append_param("/components/navbar.html", "v=1"), "/components/navbar.html?v=1");
        assert_eq!(append_param("/data/posts.json?raw", "v=1"), "/data/posts.json?raw&v=1");
    }
}
