//! Advertisement Decomposition Tests
//!
//! Vendor rules for manufacturer data, UUID handling for service data, and
//! the two FIDO UUID predicates.

use cable_scan::decomposer::{
    analyse_manufacturer_data, analyse_service_data, decompose_manufacturer_data, VendorRule,
};
use cable_scan::detection::{
    collapse_uuid, expand_short_uuid, is_fido_related_uuid, is_known_fido_short_uuid,
};
use cable_scan::types::{
    CandidateKind, CandidateSource, ConfidenceHint, VendorBreakdown, APPLE_COMPANY_ID,
};
use std::collections::BTreeMap;

use crate::common::{apple_payload, cable_payload, full_score_payload, DISTINCT_NONCE};

#[test]
fn test_short_uuid_round_trip() {
    for short in ["fffd", "fff9", "fffc", "fffe", "180f"] {
        let full = expand_short_uuid(short).unwrap();
        assert!(full.starts_with("0000"));
        assert!(full.ends_with("-0000-1000-8000-00805f9b34fb"));
        assert_eq!(collapse_uuid(&full).as_deref(), Some(short));
    }
    assert_eq!(
        expand_short_uuid("fff9").as_deref(),
        Some("0000fff9-0000-1000-8000-00805f9b34fb")
    );
}

#[test]
fn test_fido_predicates_stay_distinct() {
    // canonical forms: both agree
    assert!(is_known_fido_short_uuid("fffd"));
    assert!(is_fido_related_uuid("0000fffd-0000-1000-8000-00805f9b34fb"));

    // substring only: loose check accepts, strict check has nothing to match
    let lookalike = "a1b2fffc-0000-1000-8000-00805f9b34fb";
    assert!(is_fido_related_uuid(lookalike));
    let collapsed = collapse_uuid(lookalike);
    assert!(collapsed.is_none());
    assert!(!is_known_fido_short_uuid(lookalike));
}

#[test]
fn test_apple_header_is_stripped_from_candidate() {
    let body = cable_payload(0x00, DISTINCT_NONCE, [0x00, 0x00, 0x00], [0x00, 0x00], [0; 4]);
    let payload = apple_payload(0x10, 0x05, &body);

    let (breakdown, candidates) = decompose_manufacturer_data(APPLE_COMPANY_ID, &payload);

    let Some(VendorBreakdown::Apple(apple)) = breakdown else {
        panic!("expected Apple breakdown");
    };
    assert_eq!((apple.type_flag, apple.subtype), (0x10, 0x05));
    assert_eq!(candidates[0].kind, CandidateKind::AppleCableCandidate);
    assert_eq!(candidates[0].data, body);
    assert_eq!(
        candidates[0].source,
        CandidateSource::Manufacturer {
            company_id: APPLE_COMPANY_ID
        }
    );
    // 22-byte payload: generic only, not exact length
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[1].kind, CandidateKind::GenericCableCandidate);
}

#[test]
fn test_apple_scenario_routing_only_body() {
    // flags 0 and routing nonzero in the trimmed slice; nonce and tunnel zero
    let body = cable_payload(0x00, [0; 10], [0x00, 0x5A, 0x00], [0x00, 0x00], [0; 4]);
    let analysis = analyse_manufacturer_data(APPLE_COMPANY_ID, &apple_payload(0x01, 0x02, &body));

    let apple = &analysis.possible_fido_structures[0];
    let score = apple.analysis.as_ref().unwrap().score.unwrap();
    assert_eq!(score.flags, 30);
    assert_eq!(score.routing_id, 20);
    assert_eq!(score.nonce_entropy, 0);
    assert_eq!(score.tunnel_service, 15);
    assert_eq!(score.non_trivial, 10);
    assert_eq!(apple.score(), Some(75));
}

#[test]
fn test_entry_score_is_max_of_overlapping_structures() {
    // Apple body scores 100; the whole payload starts with the header byte 0x12
    let analysis = analyse_manufacturer_data(
        APPLE_COMPANY_ID,
        &apple_payload(0x12, 0x00, &full_score_payload()),
    );

    let scores: Vec<_> = analysis
        .possible_fido_structures
        .iter()
        .map(|s| s.score())
        .collect();
    assert_eq!(scores[0], Some(100));
    assert!(scores[1].unwrap() < 100);
    assert_eq!(analysis.max_score(), Some(100));
}

#[test]
fn test_vendor_rule_only_adds_candidates() {
    let payload = full_score_payload();
    let generic = decompose_manufacturer_data(0x0499, &payload).1;
    let apple = decompose_manufacturer_data(APPLE_COMPANY_ID, &payload).1;

    assert_eq!(VendorRule::for_company(0x0499), VendorRule::Generic);
    assert_eq!(apple.len(), generic.len() + 1);

    let shape = |c: &cable_scan::types::CandidateByteString| (c.kind, c.data.clone(), c.confidence_hint);
    let apple_generic: Vec<_> = apple[1..].iter().map(shape).collect();
    let generic_only: Vec<_> = generic.iter().map(shape).collect();
    assert_eq!(apple_generic, generic_only);
    assert_eq!(generic[1].confidence_hint, Some(ConfidenceHint::High));
}

#[test]
fn test_service_data_map() {
    let mut service_data = BTreeMap::new();
    service_data.insert("fff9".to_string(), full_score_payload());
    service_data.insert("180f".to_string(), vec![0x64]);
    service_data.insert(
        "0000fffd-0000-1000-8000-00805f9b34fb".to_string(),
        vec![0u8; 16],
    );

    let analyses = analyse_service_data(&service_data);
    assert_eq!(analyses.len(), 3);

    // BTreeMap order: full UUID first, then 180f, then fff9
    let full = &analyses[0];
    assert!(full.full_uuid.is_none());
    assert!(!full.is_fido_uuid);
    assert!(full.fido_analysis.is_some());
    assert_eq!(full.max_score(), None);

    let battery = &analyses[1];
    assert!(!battery.is_fido_uuid);
    assert!(battery.fido_analysis.is_none());

    let cable = &analyses[2];
    assert!(cable.is_fido_uuid);
    assert_eq!(cable.max_score(), Some(100));
}
