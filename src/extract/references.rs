use std::sync::LazyLock;

use regex::Regex;

use crate::document::{DocumentNode, Query};
use crate::record::Reference;

static SECTION_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"reference|citation").unwrap());

/// Links from the references section, in page order. Links without an href
/// or visible text are skipped.
pub fn extract<N: DocumentNode>(root: &N) -> Vec<Reference> {
    let Some(section) = root.find_first(
        &Query::tags(&["div", "section"]).with_class_matching(SECTION_CLASS_RE.clone()),
    ) else {
        return Vec::new();
    };

    section
        .find_all(&Query::tag("a"))
        .iter()
        .filter_map(|link| {
            let url = link.attribute("href").filter(|href| !href.trim().is_empty())?;
            let text = link.text_content();
            (!text.is_empty()).then(|| Reference { text, url })
        })
        .collect()
}
