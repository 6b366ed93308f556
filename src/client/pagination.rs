use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, LINK};

static NEXT_LINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<([^>]+)>\s*;\s*rel="next""#).expect("NEXT_LINK_REGEX is a valid regex pattern")
});

/// URL of the next page announced in a `Link` header, if any.
pub fn next_page_url(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(parse_next_link)
}

pub fn parse_next_link(link_header: &str) -> Option<String> {
    link_header
        .split(',')
        .find_map(|part| NEXT_LINK_REGEX.captures(part))
        .map(|captures| captures[1].to_string())
}
