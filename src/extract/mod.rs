pub mod description;
pub mod names;
pub mod professional;
pub mod references;
pub mod severity;

use tracing::debug;

use crate::document::{DocumentNode, Page};
use crate::record::InteractionRecord;

/// Run every extractor against a parsed page and assemble the record.
/// Never fails: whatever could not be found is simply left out.
pub fn extract_all(url: &str, page: &Page) -> InteractionRecord {
    extract_from(url, &page.root())
}

pub fn extract_from<N: DocumentNode>(url: &str, root: &N) -> InteractionRecord {
    let mut record = InteractionRecord::new(url);

    match names::extract(root) {
        Some((drug1, drug2)) => {
            debug!("Drug names: {} + {}", drug1, drug2);
            record.drug1 = Some(drug1);
            record.drug2 = Some(drug2);
        }
        None => debug!("No drug names found on {}", url),
    }

    record.severity = severity::extract(root);
    match &record.severity {
        Some(s) => debug!("Severity: {}", s.label()),
        None => debug!("No severity indicator on {}", url),
    }

    record.descriptions = description::extract(root);
    gap_or_count("description paragraphs", record.descriptions.len(), url);

    record.professional_info = professional::extract(root);
    if record.professional_info.is_none() {
        debug!("No professional info on {}", url);
    }

    record.references = references::extract(root);
    gap_or_count("references", record.references.len(), url);

    record
}

fn gap_or_count(what: &str, n: usize, url: &str) {
    if n == 0 {
        debug!("No {} on {}", what, url);
    } else {
        debug!("Found {} {}", n, what);
    }
}

// ── Tests ──
