//! Read-only alias snapshot used during resolution.

use std::collections::HashMap;

use super::aliases_model::AliasRecord;

/// Immutable view of a user's alias memory, loaded once per import.
///
/// Resolution never writes aliases; learning happens sequentially
/// during the merge phase. Keys are upper-cased source strings.
#[derive(Clone, Debug, Default)]
pub struct AliasSnapshot {
    by_source: HashMap<String, Vec<AliasRecord>>,
}

impl AliasSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<AliasRecord>) -> Self {
        let mut by_source: HashMap<String, Vec<AliasRecord>> = HashMap::new();
        for record in records {
            let key = record.source_string.trim().to_uppercase();
            by_source.entry(key).or_default().push(record);
        }
        Self { by_source }
    }

    /// Look up a source string, preferring an alias recorded for the
    /// same platform, then any verified alias, then any alias at all.
    pub fn resolve(&self, source: &str, platform: Option<&str>) -> Option<&AliasRecord> {
        let key = source.trim().to_uppercase();
        let candidates = self.by_source.get(&key)?;

        if let Some(platform) = platform {
            if let Some(record) = candidates.iter().find(|r| {
                r.platform
                    .as_deref()
                    .map(|p| p.eq_ignore_ascii_case(platform))
                    .unwrap_or(false)
            }) {
                return Some(record);
            }
        }

        candidates
            .iter()
            .find(|r| r.is_verified)
            .or_else(|| candidates.first())
    }

    pub fn len(&self) -> usize {
        self.by_source.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }
}
