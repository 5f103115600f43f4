//! URL helper functions for the upstream site
//!
//! Builds the analyze/convert endpoints and the browser-like
//! `Origin`/`Referer` values, relative to a configurable base URL.

use regex::Regex;
use std::sync::LazyLock;

/// Default upstream base URL
pub const BASE_URL: &str = "https://yt1d.com";

/// Static page hash the upstream expects on the analyze endpoint
const ANALYZE_MHASH: &str = "2eb5f4c999fea86c";

static YOUTUBE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(https?://)?(www\.)?(youtube\.com|youtu\.?be)/(watch\?v=|embed/|v/|shorts/|playlist\?|.*[?&]v=)?([^#&?]*).*",
    )
    .expect("youtube url pattern is valid")
});

fn trim_base(base: &str) -> &str {
    base.trim_end_matches('/')
}

/// Builds the analyze endpoint URL
///
/// # Example
/// ```
/// use ytmate_core::url::build_analyze_url;
/// let url = build_analyze_url("https://yt1d.com");
/// assert_eq!(
///     url,
///     "https://yt1d.com/mates/en/analyze/ajax?retry=undefined&platform=youtube&mhash=2eb5f4c999fea86c"
/// );
/// ```
pub fn build_analyze_url(base: &str) -> String {
    format!(
        "{}/mates/en/analyze/ajax?retry=undefined&platform=youtube&mhash={}",
        trim_base(base),
        ANALYZE_MHASH
    )
}

/// Builds the convert endpoint URL for an upstream identifier
///
/// The identifier is URL encoded.
///
/// # Example
/// ```
/// use ytmate_core::url::build_convert_url;
/// let url = build_convert_url("https://yt1d.com/", "abc 123");
/// assert_eq!(url, "https://yt1d.com/mates/en/convert?id=abc%20123");
/// ```
pub fn build_convert_url(base: &str, id: &str) -> String {
    format!(
        "{}/mates/en/convert?id={}",
        trim_base(base),
        urlencoding::encode(id)
    )
}

/// `Origin` header value for the upstream
pub fn origin(base: &str) -> String {
    trim_base(base).to_string()
}

/// `Referer` header value for the upstream
pub fn referer(base: &str) -> String {
    format!("{}/en307/", trim_base(base))
}

/// Loose sanity check that a string looks like a YouTube link
///
/// Accepts watch, short, embed, shorts and playlist forms, with or
/// without scheme. The analyzer does not require this to pass.
///
/// # Example
/// ```
/// use ytmate_core::url::is_youtube_url;
/// assert!(is_youtube_url("https://youtu.be/dQw4w9WgXcQ"));
/// assert!(!is_youtube_url("https://vimeo.com/123"));
/// ```
pub fn is_youtube_url(input: &str) -> bool {
    YOUTUBE_URL_RE.is_match(input.trim())
}
