//! Company/asset profile model returned by profile providers.

use serde::{Deserialize, Serialize};

/// Classification metadata for an instrument.
///
/// All fields are optional; providers differ widely in coverage
/// (ETFs in particular often come back with no country).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AssetProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
}

impl AssetProfile {
    /// Whether both country and sector carry usable values.
    ///
    /// "Unknown" is a sentinel some providers return instead of omitting
    /// the field; it counts as missing.
    pub fn is_complete(&self) -> bool {
        fn usable(v: &Option<String>) -> bool {
            v.as_deref()
                .map(|s| !s.is_empty() && !s.eq_ignore_ascii_case("unknown"))
                .unwrap_or(false)
        }
        usable(&self.country) && usable(&self.sector)
    }

    /// Fill empty fields of `self` from `other`, keeping existing values.
    pub fn merge_missing(&mut self, other: AssetProfile) {
        fn fill(slot: &mut Option<String>, value: Option<String>) {
            if slot.as_deref().map(str::is_empty).unwrap_or(true) {
                if let Some(v) = value.filter(|v| !v.is_empty()) {
                    *slot = Some(v);
                }
            }
        }
        fill(&mut self.country, other.country);
        fill(&mut self.sector, other.sector);
        fill(&mut self.industry, other.industry);
        fill(&mut self.exchange, other.exchange);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sentinel_is_incomplete() {
        let profile = AssetProfile {
            country: Some("Unknown".to_string()),
            sector: Some("Technology".to_string()),
            ..Default::default()
        };
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_merge_missing_keeps_existing() {
        let mut profile = AssetProfile {
            country: Some("Turkey".to_string()),
            ..Default::default()
        };
        profile.merge_missing(AssetProfile {
            country: Some("USA".to_string()),
            sector: Some("Industrials".to_string()),
            ..Default::default()
        });
        assert_eq!(profile.country.as_deref(), Some("Turkey"));
        assert_eq!(profile.sector.as_deref(), Some("Industrials"));
    }
}
