use std::sync::LazyLock;

use regex::Regex;

use crate::document::{DocumentNode, Query};

const MIN_PARAGRAPH_CHARS: usize = 50;
const FALLBACK_LIMIT: usize = 3;
const BOILERPLATE_PREFIXES: &[&str] = &["Home", "Navigate", "Copyright"];

static SECTION_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"interaction|content|description").unwrap());
static MAIN_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"content|main").unwrap());

/// Substantive paragraphs describing the interaction, in page order.
/// Empty when nothing long enough was found.
pub fn extract<N: DocumentNode>(root: &N) -> Vec<String> {
    let found = from_sections(root);
    if !found.is_empty() {
        return found;
    }
    from_main_content(root)
}

fn from_sections<N: DocumentNode>(root: &N) -> Vec<String> {
    let sections = Query::tags(&["div", "section"]).with_class_matching(SECTION_CLASS_RE.clone());
    let mut visited: Vec<N> = Vec::new();
    let mut out = Vec::new();

    // Containers nest; a section inside one already walked adds nothing new.
    for section in root.find_all(&sections) {
        if visited.iter().any(|outer| section.is_within(outer)) {
            continue;
        }
        for p in section.find_all(&Query::tag("p")) {
            let text = p.text_content();
            if is_substantive(&text) && !is_boilerplate(&text) {
                out.push(text);
            }
        }
        visited.push(section);
    }
    out
}

fn from_main_content<N: DocumentNode>(root: &N) -> Vec<String> {
    let main = Query::tags(&["main", "article", "div"]).with_id_matching(MAIN_ID_RE.clone());
    let Some(container) = root.find_first(&main) else {
        return Vec::new();
    };
    container
        .find_all(&Query::tag("p"))
        .iter()
        .map(DocumentNode::text_content)
        .filter(|text| is_substantive(text))
        .take(FALLBACK_LIMIT)
        .collect()
}

fn is_substantive(text: &str) -> bool {
    text.chars().count() > MIN_PARAGRAPH_CHARS
}

fn is_boilerplate(text: &str) -> bool {
    BOILERPLATE_PREFIXES.iter().any(|prefix| text.starts_with(prefix))
}
