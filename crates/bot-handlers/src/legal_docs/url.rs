use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

/// http(s) url with a domain, localhost or ipv4 host, optional port and path
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^https?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z]{2,6}\.?",
        r"|localhost",
        r"|[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})",
        r"(?::[0-9]+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("url regex is valid")
});

pub fn is_valid_url(url: &str) -> bool {
    URL_RE.is_match(url)
}

/// Url of a document button, None if it doesn't pass validation
pub(crate) fn parse_document_url(url: &str) -> Option<Url> {
    if !is_valid_url(url) {
        return None;
    }
    Url::parse(url)
        .inspect_err(|e| log::error!("failed to parse document url {url}: {e}"))
        .ok()
}
