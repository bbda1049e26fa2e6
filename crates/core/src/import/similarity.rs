//! Token-set name similarity.
//!
//! Compares two free-text instrument names with a Jaccard index over
//! filtered token sets. Without stopword filtering, two unrelated
//! instruments sharing an issuer or asset-type word ("ETF", "Global")
//! score as similar; the filter removes that noise while keeping
//! product-identifying words ("Physical", "Futures") intact.

use std::collections::HashSet;

/// Tokens that carry no product identity: legal-entity suffixes,
/// asset-type words, currency codes, share-class words, and generic
/// corporate filler.
const STOPWORDS: [&str; 50] = [
    // legal-entity suffixes
    "INC", "CORP", "CORPORATION", "LTD", "LIMITED", "PLC", "HOLDING", "HOLDINGS", "GROUP",
    "COMPANY", "CO", "AG", "NV", "SA", "SE", "ASA", "AB", "OYJ", "GMBH", "SPA",
    // asset-type words
    "ETF", "ETC", "ETN", "FUND", "FON", "FONU", "TRUST", "UCITS", "INDEX", "SHARES", "SHARE",
    // currency codes
    "USD", "EUR", "TRY", "GBP", "CHF", "CAD", "AUD", "JPY",
    // share-class words
    "CLASS", "ACC", "DIST", "ORD", "ADR",
    // generic corporate words
    "THE", "AND", "VE", "OF", "NEW", "GLOBAL",
];

/// Tokenize a name: uppercase, collapse non-alphanumeric runs to
/// spaces, drop single-character tokens and stopwords.
fn tokenize(name: &str) -> HashSet<String> {
    let upper = name.to_uppercase();
    let cleaned: String = upper
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|t| t.len() > 1)
        .filter(|t| !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity between two names, in [0, 1].
///
/// Deterministic and symmetric; zero when either name tokenizes to
/// nothing.
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();

    intersection as f64 / union as f64
}
