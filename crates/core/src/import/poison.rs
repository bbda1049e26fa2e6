//! Poison-link detection.
//!
//! A stored instrument is a poison link when its name no longer
//! plausibly corresponds to new input referencing the same ticker -
//! usually a broker reusing or corrupting a symbol. Linking such an
//! instrument as an update target would silently overwrite an
//! unrelated holding.

use super::import_constants::SIMILARITY_THRESHOLD;
use super::similarity::name_similarity;

/// Whether a stored instrument's name fails to validate against the
/// input that resolved to its symbol.
pub fn is_poison_link(stored_name: &str, input_name: &str) -> bool {
    name_similarity(stored_name, input_name) < SIMILARITY_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrelated_name_is_poison() {
        assert!(is_poison_link("Old Corp", "Gold Physical"));
    }

    #[test]
    fn test_matching_name_is_not_poison() {
        assert!(!is_poison_link("Apple", "Apple Inc."));
    }

    #[test]
    fn test_placeholder_name_equal_to_symbol_is_not_poison() {
        assert!(!is_poison_link("XAU", "XAU"));
    }
}
