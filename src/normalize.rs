use std::fmt;

/// A substance name in comparable form: trimmed, lowercased, whitespace runs
/// replaced by a single hyphen.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalName(String);

impl CanonicalName {
    pub fn new(raw: &str) -> Self {
        CanonicalName(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalize a free-form drug name. Idempotent.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Unordered pair of canonical names. Stored sorted so `{a,b} == {b,a}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DrugPairKey {
    low: CanonicalName,
    high: CanonicalName,
}

impl DrugPairKey {
    pub fn new(a: CanonicalName, b: CanonicalName) -> Self {
        if a <= b {
            DrugPairKey { low: a, high: b }
        } else {
            DrugPairKey { low: b, high: a }
        }
    }

    /// Build a key from two raw user-supplied names.
    pub fn from_raw(a: &str, b: &str) -> Self {
        Self::new(CanonicalName::new(a), CanonicalName::new(b))
    }

    pub fn names(&self) -> (&CanonicalName, &CanonicalName) {
        (&self.low, &self.high)
    }
}

impl fmt::Display for DrugPairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_and_space_insensitive() {
        assert_eq!(normalize("  Taurine "), "taurine");
        assert_eq!(normalize("taurine"), "taurine");
        assert_eq!(normalize("Vitamin  C"), "vitamin-c");
        assert_eq!(normalize("Sodium\tBicarbonate\n"), "sodium-bicarbonate");
    }

    #[test]
    fn idempotent() {
        for raw in ["  Fish Oil ", "ACEBUTOLOL", "st. john's wort", "", "b-12"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn empty_input_gives_empty_name() {
        assert!(CanonicalName::new("   ").is_empty());
    }

    #[test]
    fn pair_key_is_order_independent() {
        let ab = DrugPairKey::from_raw("Acebutolol", "Taurine");
        let ba = DrugPairKey::from_raw("taurine ", " ACEBUTOLOL");
        assert_eq!(ab, ba);
        assert_eq!(ab.names().0.as_str(), "acebutolol");
    }

    #[test]
    fn pair_key_distinguishes_different_pairs() {
        assert_ne!(
            DrugPairKey::from_raw("warfarin", "aspirin"),
            DrugPairKey::from_raw("warfarin", "ibuprofen")
        );
    }
}
