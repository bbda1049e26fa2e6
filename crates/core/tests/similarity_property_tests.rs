//! Property tests for the name similarity scorer.

use folionest_core::import::name_similarity;
use proptest::prelude::*;

proptest! {
    #[test]
    fn similarity_is_bounded(a in "[A-Za-z0-9 .&-]{0,60}", b in "[A-Za-z0-9 .&-]{0,60}") {
        let score = name_similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn similarity_is_symmetric(a in "[A-Za-z0-9 .&-]{0,60}", b in "[A-Za-z0-9 .&-]{0,60}") {
        let ab = name_similarity(&a, &b);
        let ba = name_similarity(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn self_similarity_is_one_or_tokenless(a in "[A-Za-z0-9 ]{0,60}") {
        // Either the name carries no usable tokens (score 0) or it
        // matches itself perfectly
        let score = name_similarity(&a, &a);
        prop_assert!(score == 0.0 || (score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn stopword_noise_never_raises_a_zero_score(a in "[a-z]{4,12}", b in "[a-z]{4,12}") {
        prop_assume!(a != b);
        let plain = name_similarity(&a, &b);
        let noisy = name_similarity(&format!("{} ETF UCITS", a), &format!("{} ETF UCITS", b));
        // Shared asset-type words must not make unrelated names similar
        prop_assert!((noisy - plain).abs() < 1e-12);
    }
}
