//! Display-name cleaning for instrument names.
//!
//! Broker exports and provider search results decorate names with legal
//! suffixes ("Apple Inc."), share-class noise ("DIAGEO PLC ORD 28
//! 101/108P") and currency words ("Bitcoin EUR"). Stored display names
//! carry none of that.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// British nominal-value patterns, stripped before the generic
    /// suffixes so "ORD 25P" doesn't survive inside a longer tail.
    static ref NOMINAL_PATTERNS: Vec<Regex> = [
        r"(?i) ORD \d+[\d\s/]*P?$",
        r"(?i) ORD [\d./]+P$",
        r"(?i) ORD GBP[\d.]+$",
        r"(?i) ORD USD[\d.]+$",
        r"(?i) ORD EUR[\d.]+$",
        r"(?i) ORD \$[\d.]+$",
        r"(?i) ORD £[\d.]+$",
        r"(?i) ORD€[\d.]+$",
        r"(?i) ORD$",
        r"(?i) ORDINARY SHARES?$",
        r"(?i) COM(MON)?$",
        r"(?i) CL(ASS)? [A-Z]$",
        r"(?i) ADR$",
        r"(?i) ADS$",
        r"(?i) REIT$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    /// Legal-entity and currency suffixes, applied repeatedly so
    /// stacked tails like "Company AG EUR" fully unwind.
    static ref SUFFIX_PATTERNS: Vec<Regex> = [
        r"(?i) Inc\.?$",
        r"(?i) Corp\.?$",
        r"(?i) Corporation$",
        r"(?i) Ltd\.?$",
        r"(?i) Limited$",
        r"(?i) A\.S\.?$",
        r"(?i) A\.Ş\.?$",
        r"(?i) AS$",
        r"(?i) Holding\.?$",
        r"(?i) N\.V\.?$",
        r"(?i) PLC\.?$",
        r"(?i) S\.A\.?$",
        r"(?i) Group$",
        r"(?i) GmbH$",
        r"(?i) Sanayi$",
        r"(?i) ve Ticaret$",
        r"(?i) San\.?$",
        r"(?i) Tic\.?$",
        r"(?i) AG\.?$",
        r"(?i) A/S$",
        r"(?i) SE$",
        r"(?i) SpA$",
        r"(?i) NV$",
        r"(?i) Oyj?$",
        r"(?i) Abp$",
        r"(?i) ASA$",
        r"(?i) AB$",
        r"(?i) Co\.?$",
        r"(?i) Company$",
        r"(?i) & Co\.?$",
        r"(?i) EUR$",
        r"(?i) USD$",
        r"(?i) TRY$",
        r"(?i) GBP$",
        r"(?i) CAD$",
        r"(?i) AUD$",
        r"(?i) CHF$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref TRAILING_SEPARATORS: Vec<Regex> = [
        r"(?i) ve$",
        r" &$",
        r"-$",
        r",$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

/// Strip legal suffixes and share-class noise from an instrument name.
pub fn clean_asset_name(name: &str) -> String {
    let mut cleaned = name.trim().to_string();

    for pattern in NOMINAL_PATTERNS.iter() {
        cleaned = pattern.replace(&cleaned, "").trim().to_string();
    }

    loop {
        let before = cleaned.clone();
        for pattern in SUFFIX_PATTERNS.iter() {
            cleaned = pattern.replace(&cleaned, "").trim().to_string();
        }
        for pattern in TRAILING_SEPARATORS.iter() {
            cleaned = pattern.replace(&cleaned, "").trim().to_string();
        }
        if cleaned == before {
            break;
        }
    }

    cleaned
}
