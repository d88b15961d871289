use std::sync::LazyLock;

use regex::Regex;

use crate::document::{DocumentNode, Query};
use crate::record::ProfessionalInfo;

static SECTION_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"professional|clinical|mechanism").unwrap());
static MECHANISM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)mechanism").unwrap());
static MANAGEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)management|recommendation").unwrap());

const CONTAINER_TAGS: &[&str] = &["p", "div"];

/// Mechanism and management notes from the clinical section, each independently optional.
pub fn extract<N: DocumentNode>(root: &N) -> Option<ProfessionalInfo> {
    let section = root.find_first(
        &Query::tags(&["div", "section"]).with_class_matching(SECTION_CLASS_RE.clone()),
    )?;

    let info = ProfessionalInfo {
        mechanism: container_text(&section, &MECHANISM_RE),
        management: container_text(&section, &MANAGEMENT_RE),
    };
    (!info.is_empty()).then_some(info)
}

fn container_text<N: DocumentNode>(section: &N, pattern: &Regex) -> Option<String> {
    section
        .find_text_container(pattern, CONTAINER_TAGS)
        .map(|el| el.text_content())
        .filter(|text| !text.is_empty())
}
