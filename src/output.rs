use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::PersistError;
use crate::record::{InteractionRecord, SeverityLevel};

const DESCRIPTION_PREVIEW: usize = 200;
const PROFESSIONAL_PREVIEW: usize = 150;

/// Write `value` as pretty-printed JSON, replacing any existing file.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Data saved to {}", path.display());
    Ok(())
}

/// Human-readable report of one record.
pub fn summary(record: &InteractionRecord) -> String {
    let rule = "=".repeat(70);
    let mut out = String::new();
    let _ = writeln!(out, "{}\nDRUG INTERACTION SUMMARY\n{}", rule, rule);
    let _ = writeln!(out, "\nSource: {}", record.url);

    if let (Some(d1), Some(d2)) = (&record.drug1, &record.drug2) {
        let _ = writeln!(out, "Drugs: {} + {}", d1, d2);
    }

    if let Some(severity) = &record.severity {
        let marker = match severity.level {
            SeverityLevel::Major => "[!!!]",
            SeverityLevel::Moderate => "[!!]",
            SeverityLevel::Minor => "[!]",
            SeverityLevel::Unknown => "[?]",
        };
        let _ = writeln!(out, "{} Severity: {}", marker, severity.label());
    }

    if !record.descriptions.is_empty() {
        let _ = writeln!(out, "\nDescription:");
        for (i, desc) in record.descriptions.iter().enumerate() {
            let _ = writeln!(out, "   {}. {}", i + 1, truncate(desc, DESCRIPTION_PREVIEW));
        }
    }

    if let Some(info) = &record.professional_info {
        let _ = writeln!(out, "\nProfessional Information:");
        if let Some(m) = &info.mechanism {
            let _ = writeln!(out, "   Mechanism: {}", truncate(m, PROFESSIONAL_PREVIEW));
        }
        if let Some(m) = &info.management {
            let _ = writeln!(out, "   Management: {}", truncate(m, PROFESSIONAL_PREVIEW));
        }
    }

    if !record.references.is_empty() {
        let _ = writeln!(out, "\nReferences: {} found", record.references.len());
    }

    let _ = write!(out, "\n{}", rule);
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
