use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityLevel {
    Major,
    Moderate,
    Minor,
    Unknown,
}

/// Severity read off the page. `raw` is the indicator text as found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Severity {
    pub level: SeverityLevel,
    pub raw: String,
}

impl Severity {
    /// Classify by keyword containment, checked major, moderate, minor in that order.
    pub fn classify(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        let level = if lower.contains("major") {
            SeverityLevel::Major
        } else if lower.contains("moderate") {
            SeverityLevel::Moderate
        } else if lower.contains("minor") {
            SeverityLevel::Minor
        } else {
            SeverityLevel::Unknown
        };
        Severity {
            level,
            raw: raw.to_string(),
        }
    }

    /// "Major" / "Moderate" / "Minor", or the raw text when unclassified.
    pub fn label(&self) -> &str {
        match self.level {
            SeverityLevel::Major => "Major",
            SeverityLevel::Moderate => "Moderate",
            SeverityLevel::Minor => "Minor",
            SeverityLevel::Unknown => &self.raw,
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfessionalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management: Option<String>,
}

impl ProfessionalInfo {
    pub fn is_empty(&self) -> bool {
        self.mechanism.is_none() && self.management.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub text: String,
    pub url: String,
}

/// Everything extracted from one interaction page. Only `url` is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InteractionRecord {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drug1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drug2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(rename = "description", skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_info: Option<ProfessionalInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
}

impl InteractionRecord {
    pub fn new(url: impl Into<String>) -> Self {
        InteractionRecord {
            url: url.into(),
            ..Default::default()
        }
    }
}
