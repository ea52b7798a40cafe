use regex::Regex;
use scraper::Selector;
use std::borrow::Cow;
use url::Url;

pub fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

pub fn compile_static_selector(selector: &str) -> Selector {
    Selector::parse(selector)
        .unwrap_or_else(|e| panic!("invalid static selector '{selector}': {e:?}"))
}

/// The URL path with percent-escapes decoded, or the raw path if it is not valid UTF-8 once decoded.
pub fn decoded_url_path(url: &Url) -> Cow<'_, str> {
    urlencoding::decode(url.path()).unwrap_or_else(|e| {
        tracing::debug!(url = %url, error = %e, "Keeping percent-encoded path");
        Cow::Borrowed(url.path())
    })
}

/// Returns everything after the last `/`, which may be empty.
pub fn final_path_segment(locator: &str) -> &str {
    locator.rsplit('/').next().unwrap_or(locator)
}

/// Returns the last non-empty `/`-separated segment, ignoring trailing separators.
pub fn last_non_empty_segment(locator: &str) -> Option<&str> {
    locator.split('/').rev().find(|segment| !segment.is_empty())
}
