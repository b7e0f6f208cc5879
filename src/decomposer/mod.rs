//! Candidate extraction from advertisement sub-structures
//!
//! Each decomposer cuts candidate byte strings out of one kind of payload and
//! runs every candidate through the caBLE v2 parser and scorer.

pub mod manufacturer;
pub mod service_data;

pub use manufacturer::{analyse_manufacturer_data, decompose_manufacturer_data, VendorRule};
pub use service_data::{analyse_service_data, analyse_service_data_entry};

use crate::detection::analyse_candidate;
use crate::types::{CandidateByteString, ScoredStructure};

/// Run one candidate through the parser and scorer
pub fn score_candidate(candidate: CandidateByteString) -> ScoredStructure {
    let analysis = analyse_candidate(&candidate.data);
    ScoredStructure {
        kind: candidate.kind,
        source: candidate.source,
        data: candidate.data,
        analysis,
        confidence: candidate.confidence_hint,
    }
}
