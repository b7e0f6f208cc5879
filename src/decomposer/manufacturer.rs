use super::score_candidate;
use crate::types::{
    AppleBreakdown, CandidateByteString, CandidateKind, CandidateSource, ConfidenceHint,
    ManufacturerAnalysis, VendorBreakdown, APPLE_COMPANY_ID, CABLE_V2_LENGTH,
    MIN_CANDIDATE_LENGTH,
};
use tracing::debug;

/// Apple payloads shorter than this carry no caBLE candidate
const APPLE_MIN_LENGTH: usize = 9;

/// Apple type + subtype header
const APPLE_HEADER_LENGTH: usize = 2;

/// Vendor-specific decomposition rule for manufacturer data
///
/// Vendor rules only add candidates; the generic whole-payload rules run for
/// every company identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorRule {
    /// Company 76: `[type][subtype][caBLE candidate...]`
    Apple,
    /// No vendor-specific layout known
    Generic,
}

impl VendorRule {
    pub fn for_company(company_id: u16) -> Self {
        match company_id {
            APPLE_COMPANY_ID => VendorRule::Apple,
            _ => VendorRule::Generic,
        }
    }

    /// Vendor header breakdown and vendor-specific candidates
    fn decompose(
        &self,
        company_id: u16,
        data: &[u8],
    ) -> (Option<VendorBreakdown>, Vec<CandidateByteString>) {
        match self {
            VendorRule::Apple if data.len() >= APPLE_MIN_LENGTH => {
                let remaining = data[APPLE_HEADER_LENGTH..].to_vec();
                let breakdown = VendorBreakdown::Apple(AppleBreakdown {
                    type_flag: data[0],
                    subtype: data[1],
                    remaining_data: remaining.clone(),
                });
                let candidate = CandidateByteString::new(
                    CandidateSource::Manufacturer { company_id },
                    CandidateKind::AppleCableCandidate,
                    remaining,
                );
                (Some(breakdown), vec![candidate])
            }
            VendorRule::Apple | VendorRule::Generic => (None, Vec::new()),
        }
    }
}

/// Candidates from the rules that apply to every company identifier
fn generic_candidates(company_id: u16, data: &[u8]) -> Vec<CandidateByteString> {
    let source = CandidateSource::Manufacturer { company_id };
    let mut candidates = Vec::new();

    if data.len() >= MIN_CANDIDATE_LENGTH {
        candidates.push(CandidateByteString::new(
            source.clone(),
            CandidateKind::GenericCableCandidate,
            data.to_vec(),
        ));
    }

    if data.len() == CABLE_V2_LENGTH {
        candidates.push(
            CandidateByteString::new(source, CandidateKind::ExactCableV2Length, data.to_vec())
                .with_hint(ConfidenceHint::High),
        );
    }

    candidates
}

/// Extract all candidate byte strings from one manufacturer data entry
pub fn decompose_manufacturer_data(
    company_id: u16,
    data: &[u8],
) -> (Option<VendorBreakdown>, Vec<CandidateByteString>) {
    let (breakdown, mut candidates) = VendorRule::for_company(company_id).decompose(company_id, data);
    candidates.extend(generic_candidates(company_id, data));
    (breakdown, candidates)
}

/// Analyse one manufacturer data entry
///
/// A single entry can yield several overlapping structures; the highest score
/// among them represents the entry.
pub fn analyse_manufacturer_data(company_id: u16, data: &[u8]) -> ManufacturerAnalysis {
    let (vendor_specific, candidates) = decompose_manufacturer_data(company_id, data);
    let possible_fido_structures: Vec<_> = candidates.into_iter().map(score_candidate).collect();

    debug!(
        "Manufacturer data company {}: {} bytes, {} candidate(s)",
        company_id,
        data.len(),
        possible_fido_structures.len()
    );

    ManufacturerAnalysis {
        company_id,
        raw_data: data.to_vec(),
        length: data.len(),
        vendor_specific,
        possible_fido_structures,
    }
}
