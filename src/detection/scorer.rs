use crate::detection::patterns::distinct_bytes;
use crate::types::{CableV2Structure, ScoreBreakdown};

/// Term weights; the sum of all maxima is exactly 100
pub const FLAGS_ZERO_SCORE: u8 = 30;
pub const FLAGS_SMALL_SCORE: u8 = 10;
pub const NONCE_HIGH_ENTROPY_SCORE: u8 = 25;
pub const NONCE_MEDIUM_ENTROPY_SCORE: u8 = 15;
pub const ROUTING_ID_SCORE: u8 = 20;
pub const TUNNEL_ZERO_SCORE: u8 = 15;
pub const TUNNEL_SMALL_SCORE: u8 = 10;
pub const NON_TRIVIAL_SCORE: u8 = 10;

/// Score a parsed caBLE v2 structure
pub fn score_structure(structure: &CableV2Structure) -> ScoreBreakdown {
    score_fields(
        structure.flags,
        &structure.nonce,
        &structure.routing_id,
        &structure.tunnel_service,
    )
}

/// Plausibility of a field tuple as a caBLE v2 advertisement, 0-100
pub fn score_fields(
    flags: u8,
    nonce: &[u8; 10],
    routing_id: &[u8; 3],
    tunnel_service: &[u8; 2],
) -> ScoreBreakdown {
    let flags_term = match flags {
        0x00 => FLAGS_ZERO_SCORE,
        0x01..=0x0F => FLAGS_SMALL_SCORE,
        _ => 0,
    };

    // A random nonce should rarely repeat bytes
    let nonce_term = match distinct_bytes(nonce) {
        8.. => NONCE_HIGH_ENTROPY_SCORE,
        6..=7 => NONCE_MEDIUM_ENTROPY_SCORE,
        _ => 0,
    };

    let routing_term = if routing_id.iter().any(|&b| b != 0) {
        ROUTING_ID_SCORE
    } else {
        0
    };

    let tunnel_term = match u16::from_le_bytes(*tunnel_service) {
        0x0000 => TUNNEL_ZERO_SCORE,
        0x0001..=0x00FF => TUNNEL_SMALL_SCORE,
        _ => 0,
    };

    let non_trivial_term = if nonce
        .iter()
        .chain(routing_id.iter())
        .chain(tunnel_service.iter())
        .any(|&b| b != 0)
    {
        NON_TRIVIAL_SCORE
    } else {
        0
    };

    ScoreBreakdown::new(
        flags_term,
        nonce_term,
        routing_term,
        tunnel_term,
        non_trivial_term,
    )
}
