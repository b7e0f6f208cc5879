//! caBLE v2 Parsing and Scoring Properties
//!
//! Checks the layout and score invariants over a spread of generated byte
//! strings rather than single hand-picked vectors.

use cable_scan::detection::scorer::score_fields;
use cable_scan::detection::{analyse_candidate, detect_patterns, parse_cable_v2};
use cable_scan::types::{PatternTag, CABLE_V2_LENGTH, MIN_CANDIDATE_LENGTH};

use crate::common::{cable_payload, full_score_payload, DISTINCT_NONCE};

/// Deterministic byte stream (xorshift) so failures reproduce
fn generated_bytes(seed: u32, len: usize) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

#[test]
fn test_no_structure_below_sixteen_bytes() {
    for seed in 1..50 {
        for len in 0..MIN_CANDIDATE_LENGTH {
            let data = generated_bytes(seed, len);
            assert!(analyse_candidate(&data).is_none());
            assert!(parse_cable_v2(&data).is_none());
        }
    }
}

#[test]
fn test_fields_sliced_at_fixed_offsets() {
    for seed in 1..50 {
        let len = CABLE_V2_LENGTH + (seed as usize % 12);
        let data = generated_bytes(seed, len);
        let structure = parse_cable_v2(&data).unwrap();

        assert_eq!(structure.flags, data[0]);
        assert_eq!(&structure.nonce[..], &data[1..11]);
        assert_eq!(&structure.routing_id[..], &data[11..14]);
        assert_eq!(&structure.tunnel_service[..], &data[14..16]);
        assert_eq!(
            structure.tunnel_service_id,
            data[14] as u16 | (data[15] as u16) << 8
        );
        assert_eq!(&structure.hmac_tag[..], &data[16..20]);
        assert_eq!(structure.flags_valid, data[0] == 0);
    }
}

#[test]
fn test_score_always_within_bounds() {
    for seed in 1..500 {
        let data = generated_bytes(seed, CABLE_V2_LENGTH);
        let analysis = analyse_candidate(&data).unwrap();
        let score = analysis.score.unwrap();

        assert!(score.total <= 100);
        assert_eq!(
            score.total,
            score.flags + score.nonce_entropy + score.routing_id + score.tunnel_service + score.non_trivial
        );
    }
}

#[test]
fn test_documented_extremes() {
    let best = score_fields(0x00, &DISTINCT_NONCE, &[0x01, 0x00, 0x00], &[0x00, 0x00]);
    assert_eq!(best.total, 100);

    let worst = score_fields(0xFF, &[0; 10], &[0; 3], &[0xFF, 0xFF]);
    assert_eq!(worst.total, 0);

    let analysis = analyse_candidate(&full_score_payload()).unwrap();
    assert_eq!(analysis.structure_score(), Some(100));
}

#[test]
fn test_scoring_ignores_hmac_and_trailing_bytes() {
    let base = cable_payload(0x03, DISTINCT_NONCE, [0, 0, 9], [0x10, 0x00], [0, 0, 0, 0]);
    let mut other = cable_payload(0x03, DISTINCT_NONCE, [0, 0, 9], [0x10, 0x00], [1, 2, 3, 4]);
    other.extend_from_slice(&[0xFF; 8]);

    assert_eq!(
        analyse_candidate(&base).unwrap().score,
        analyse_candidate(&other).unwrap().score
    );
}

#[test]
fn test_all_same_byte_scenario() {
    let analysis = analyse_candidate(&[0xAA; 20]).unwrap();

    assert_eq!(analysis.patterns, vec![PatternTag::AllSameByte(0xAA)]);
    assert_eq!(analysis.patterns[0].to_string(), "all_same_byte_0xaa");
    let score = analysis.score.unwrap();
    assert_eq!(score.nonce_entropy, 0);
    assert_eq!(score.total, 30);
}

#[test]
fn test_pattern_tags_are_unique_and_ordered() {
    let rank = |tag: &PatternTag| match tag {
        PatternTag::AllSameByte(_) => 0,
        PatternTag::SequentialBytes => 1,
        PatternTag::MostlyZeros { .. } => 2,
        PatternTag::HighEntropy => 3,
    };

    for seed in 1..200 {
        let mut data = generated_bytes(seed, 1 + seed as usize % 40);
        if seed % 3 == 0 {
            for b in data.iter_mut().step_by(2) {
                *b = 0;
            }
        }
        let tags = detect_patterns(&data);
        let ranks: Vec<_> = tags.iter().map(rank).collect();
        assert!(ranks.windows(2).all(|w| w[0] < w[1]), "{:?}", tags);
    }
}
