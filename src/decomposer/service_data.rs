use super::score_candidate;
use crate::detection::uuid::{expand_short_uuid, is_known_fido_short_uuid, is_short_uuid};
use crate::types::{
    CandidateByteString, CandidateKind, CandidateSource, ServiceDataAnalysis, MIN_CANDIDATE_LENGTH,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Analyse one service data entry
pub fn analyse_service_data_entry(uuid: &str, data: &[u8]) -> ServiceDataAnalysis {
    let short = is_short_uuid(uuid);
    let full_uuid = if short { expand_short_uuid(uuid) } else { None };
    let is_fido_uuid = short && is_known_fido_short_uuid(uuid);

    let fido_analysis = (data.len() >= MIN_CANDIDATE_LENGTH).then(|| {
        score_candidate(CandidateByteString::new(
            CandidateSource::ServiceData {
                uuid: uuid.to_string(),
            },
            CandidateKind::ServiceDataCandidate,
            data.to_vec(),
        ))
    });

    if is_fido_uuid {
        debug!(
            "FIDO service data {}: {} bytes, score {:?}",
            uuid,
            data.len(),
            fido_analysis.as_ref().and_then(|s| s.score())
        );
    }

    ServiceDataAnalysis {
        uuid: uuid.to_string(),
        full_uuid,
        is_fido_uuid,
        data: data.to_vec(),
        length: data.len(),
        fido_analysis,
    }
}

/// Analyse every service data entry of an advertisement
pub fn analyse_service_data(service_data: &BTreeMap<String, Vec<u8>>) -> Vec<ServiceDataAnalysis> {
    service_data
        .iter()
        .map(|(uuid, data)| analyse_service_data_entry(uuid, data))
        .collect()
}
