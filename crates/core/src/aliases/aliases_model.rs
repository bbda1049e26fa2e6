use serde::{Deserialize, Serialize};

/// A remembered mapping from a source string seen in an import file
/// (name, symbol, or ISIN) to the instrument symbol it resolved to.
///
/// Unique per `(user_id, source_string, platform)`. Source strings are
/// stored upper-cased so lookups are case-insensitive.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasRecord {
    pub user_id: String,
    pub source_string: String,
    pub platform: Option<String>,
    pub resolved_symbol: String,
    /// True when the mapping came from an identifier-based (ISIN) match
    /// rather than a name-similarity match.
    pub is_verified: bool,
}

impl AliasRecord {
    pub fn new(
        user_id: impl Into<String>,
        source_string: impl Into<String>,
        platform: Option<String>,
        resolved_symbol: impl Into<String>,
        is_verified: bool,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            source_string: source_string.into().trim().to_uppercase(),
            platform,
            resolved_symbol: resolved_symbol.into(),
            is_verified,
        }
    }
}
