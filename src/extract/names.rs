use std::sync::LazyLock;

use regex::Regex;

use crate::document::{DocumentNode, Query};

// "Acebutolol and Taurine Interactions" / "... Drug Interactions"
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(.+?)\s+and\s+(.+?)\s+(?:Interactions?|Drug)").unwrap()
});

/// Drug names as printed on the page: from the `<h1>`, else the last two breadcrumb items.
pub fn extract<N: DocumentNode>(root: &N) -> Option<(String, String)> {
    from_heading(root).or_else(|| from_breadcrumb(root))
}

fn from_heading<N: DocumentNode>(root: &N) -> Option<(String, String)> {
    let title = root.find_first(&Query::tag("h1"))?.text_content();
    let caps = TITLE_RE.captures(&title)?;
    Some((caps[1].trim().to_string(), caps[2].trim().to_string()))
}

fn from_breadcrumb<N: DocumentNode>(root: &N) -> Option<(String, String)> {
    let nav = root.find_first(&Query::tag("nav").with_class("breadcrumb"))?;
    let items = nav.find_all(&Query::tag("li"));
    match items.as_slice() {
        [.., first, second] => Some((first.text_content(), second.text_content())),
        _ => None,
    }
}
