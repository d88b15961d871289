use crate::document::{DocumentNode, Query};
use crate::record::{Severity, SeverityLevel};

/// Dedicated indicator classes, highest priority first.
const INDICATOR_CLASSES: &[&str] = &["interaction-severity", "ddc-status", "severity"];
const INDICATOR_TAGS: &[&str] = &["div", "span"];
const ALERT_CLASSES: &[&str] = &["alert", "warning", "ddc-alert"];

/// Severity from the first indicator element found, else from a generic alert
/// box. `None` when the page carries no severity at all.
pub fn extract<N: DocumentNode>(root: &N) -> Option<Severity> {
    from_indicator(root).or_else(|| from_alert(root))
}

fn from_indicator<N: DocumentNode>(root: &N) -> Option<Severity> {
    INDICATOR_CLASSES
        .iter()
        .flat_map(|&class| {
            INDICATOR_TAGS
                .iter()
                .map(move |&tag| Query::tag(tag).with_class(class))
        })
        .find_map(|query| root.find_first(&query))
        .map(|el| Severity::classify(&el.text_content()))
}

// Alerts are only trusted when they name a level; other alert text is not a severity.
fn from_alert<N: DocumentNode>(root: &N) -> Option<Severity> {
    let alert = root.find_first(&Query::tag("div").with_any_class(ALERT_CLASSES))?;
    let severity = Severity::classify(&alert.text_content());
    (severity.level != SeverityLevel::Unknown).then_some(severity)
}
