use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;
use tracing::debug;
use url::Url;

use crate::catalog::Catalog;
use crate::normalize::{CanonicalName, DrugPairKey};

const INTERACTIONS_DIR: &str = "/drug-interactions/";
const PAGE_SUFFIX: &str = ".html";
const PAIR_SEPARATOR: &str = "-with-";

// Trailing document id run: "-123" or "-123-0-456". Anchored to the end only.
static TRAILING_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-\d+(?:-\d+)*$").unwrap());

/// Decode a catalog URL shaped like `/drug-interactions/<a>-with-<b>-<id..>.html`
/// into its drug pair. Anything outside that shape yields `None`.
pub fn decode_url(url: &str) -> Option<DrugPairKey> {
    let path = url_path(url);
    let path = path.strip_prefix(INTERACTIONS_DIR).unwrap_or(path.as_str());
    let path = path.strip_suffix(PAGE_SUFFIX).unwrap_or(path);

    let (first, second) = path.split_once(PAIR_SEPARATOR)?;
    let first = strip_trailing_id(first);
    let second = strip_trailing_id(second);
    if first.is_empty() || second.is_empty() {
        return None;
    }
    Some(DrugPairKey::new(
        CanonicalName::new(first),
        CanonicalName::new(second),
    ))
}

/// Path component of `url`, percent-decoded so escaped names compare as typed.
fn url_path(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Bare paths and slugs have no scheme; drop any query or fragment by hand.
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    percent_decode_str(&path).decode_utf8_lossy().into_owned()
}

fn strip_trailing_id(segment: &str) -> &str {
    match TRAILING_ID_RE.find(segment) {
        Some(m) => &segment[..m.start()],
        None => segment,
    }
}

/// Scan the whole catalog for pages describing the given pair, in catalog order.
/// Argument order does not matter.
pub fn find_interactions(catalog: &Catalog, drug1: &str, drug2: &str) -> Vec<String> {
    let query = DrugPairKey::from_raw(drug1, drug2);
    debug!("Looking up {} across {} catalog entries", query, catalog.len());

    catalog
        .entries()
        .iter()
        .filter(|url| decode_url(url).is_some_and(|pair| pair == query))
        .cloned()
        .collect()
}
