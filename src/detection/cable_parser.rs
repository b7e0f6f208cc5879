use crate::detection::{detect_patterns, score_structure};
use crate::types::{CableAnalysis, CableV2Structure, CABLE_V2_LENGTH, MIN_CANDIDATE_LENGTH};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;
use tracing::debug;

/// Decompose the first 20 bytes of a candidate into the caBLE v2 layout
///
/// Returns `None` for candidates shorter than [`CABLE_V2_LENGTH`]; fields are
/// never zero-filled.
pub fn parse_cable_v2(data: &[u8]) -> Option<CableV2Structure> {
    let layout = data.get(..CABLE_V2_LENGTH)?;

    let flags = layout[0];
    let nonce: [u8; 10] = layout[1..11].try_into().ok()?;
    let routing_id: [u8; 3] = layout[11..14].try_into().ok()?;
    let tunnel_service: [u8; 2] = layout[14..16].try_into().ok()?;
    let tunnel_service_id = Cursor::new(&tunnel_service[..])
        .read_u16::<LittleEndian>()
        .ok()?;
    let hmac_tag: [u8; 4] = layout[16..20].try_into().ok()?;

    Some(CableV2Structure {
        flags,
        flags_valid: flags == 0x00,
        nonce,
        routing_id,
        tunnel_service,
        tunnel_service_id,
        hmac_tag,
    })
}

/// Analyse a candidate byte string as a caBLE v2 payload
///
/// - shorter than 16 bytes: `None`, nothing worth reporting
/// - 16 to 19 bytes: pattern tags only
/// - 20 bytes or more: structure, score and pattern tags over the whole candidate
pub fn analyse_candidate(data: &[u8]) -> Option<CableAnalysis> {
    if data.len() < MIN_CANDIDATE_LENGTH {
        return None;
    }

    let structure = parse_cable_v2(data);
    let score = structure.as_ref().map(score_structure);
    let patterns = detect_patterns(data);

    debug!(
        "caBLE analysis: {} bytes, score {:?}, patterns {:?}",
        data.len(),
        score.map(|s| s.total),
        patterns
    );

    Some(CableAnalysis {
        length: data.len(),
        structure,
        score,
        patterns,
    })
}
