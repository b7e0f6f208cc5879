use crate::types::{CableAnalysis, CableV2Structure};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which advertisement sub-structure a candidate was cut from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum CandidateSource {
    Manufacturer { company_id: u16 },
    ServiceData { uuid: String },
}

/// Extraction rule that produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    /// Apple manufacturer payload with the type/subtype bytes stripped
    AppleCableCandidate,
    /// Whole manufacturer payload
    GenericCableCandidate,
    /// Whole manufacturer payload of exactly caBLE v2 length
    ExactCableV2Length,
    /// Whole service data payload
    ServiceDataCandidate,
}

impl CandidateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateKind::AppleCableCandidate => "apple_cable_candidate",
            CandidateKind::GenericCableCandidate => "generic_cable_candidate",
            CandidateKind::ExactCableV2Length => "exact_cable_v2_length",
            CandidateKind::ServiceDataCandidate => "service_data_candidate",
        }
    }
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation hint attached by an extraction rule; never feeds the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceHint {
    High,
}

/// Byte string extracted from an advertisement for caBLE v2 analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateByteString {
    pub source: CandidateSource,
    pub kind: CandidateKind,
    pub data: Vec<u8>,
    pub confidence_hint: Option<ConfidenceHint>,
}

impl CandidateByteString {
    pub fn new(source: CandidateSource, kind: CandidateKind, data: Vec<u8>) -> Self {
        Self {
            source,
            kind,
            data,
            confidence_hint: None,
        }
    }

    pub fn with_hint(mut self, hint: ConfidenceHint) -> Self {
        self.confidence_hint = Some(hint);
        self
    }
}

/// A candidate together with its caBLE v2 analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredStructure {
    #[serde(rename = "type")]
    pub kind: CandidateKind,
    #[serde(flatten)]
    pub source: CandidateSource,
    #[serde(serialize_with = "crate::types::hex_bytes::serialize")]
    pub data: Vec<u8>,
    /// Absent when the candidate is too short to analyse
    pub analysis: Option<CableAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceHint>,
}

impl ScoredStructure {
    pub fn score(&self) -> Option<u8> {
        self.analysis.as_ref().and_then(CableAnalysis::structure_score)
    }

    pub fn structure(&self) -> Option<&CableV2Structure> {
        self.analysis.as_ref().and_then(|a| a.structure.as_ref())
    }
}

/// Apple manufacturer data header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppleBreakdown {
    pub type_flag: u8,
    pub subtype: u8,
    #[serde(serialize_with = "crate::types::hex_bytes::serialize")]
    pub remaining_data: Vec<u8>,
}

/// Vendor-specific view of a manufacturer data entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "vendor", rename_all = "snake_case")]
pub enum VendorBreakdown {
    Apple(AppleBreakdown),
}

/// Analysis of one manufacturer data entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManufacturerAnalysis {
    pub company_id: u16,
    #[serde(serialize_with = "crate::types::hex_bytes::serialize")]
    pub raw_data: Vec<u8>,
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_specific: Option<VendorBreakdown>,
    pub possible_fido_structures: Vec<ScoredStructure>,
}

impl ManufacturerAnalysis {
    /// Highest structure score among this entry's candidates
    pub fn max_score(&self) -> Option<u8> {
        self.possible_fido_structures
            .iter()
            .filter_map(ScoredStructure::score)
            .max()
    }
}

/// Analysis of one service data entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDataAnalysis {
    pub uuid: String,
    /// 128-bit form, present when `uuid` was a 16-bit short form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_uuid: Option<String>,
    pub is_fido_uuid: bool,
    #[serde(serialize_with = "crate::types::hex_bytes::serialize")]
    pub data: Vec<u8>,
    pub length: usize,
    pub fido_analysis: Option<ScoredStructure>,
}

impl ServiceDataAnalysis {
    pub fn max_score(&self) -> Option<u8> {
        self.fido_analysis.as_ref().and_then(ScoredStructure::score)
    }
}

/// A service UUID listed in the advertisement itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvertisedService {
    pub uuid: String,
    /// Loose FIDO match, see [`crate::detection::is_fido_related_uuid`]
    pub fido_related: bool,
}

/// Sighting history of one device address within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceSighting {
    pub first_seen: DateTime<Utc>,
    pub scan_count: u64,
}

impl DeviceSighting {
    pub fn first(seen_at: DateTime<Utc>) -> Self {
        Self {
            first_seen: seen_at,
            scan_count: 1,
        }
    }
}

/// Per-event output of the aggregator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventAnalysis {
    pub timestamp: DateTime<Utc>,
    /// Position of this event in the session, starting at 1
    pub scan_index: u64,
    pub address: String,
    pub name: Option<String>,
    pub rssi: i16,
    /// Times this address has been seen in the session, this event included
    pub scan_count: u64,
    pub first_seen: DateTime<Utc>,
    pub advertised_services: Vec<AdvertisedService>,
    pub manufacturer_data_candidates: Vec<ManufacturerAnalysis>,
    pub service_data_candidates: Vec<ServiceDataAnalysis>,
    pub total_score: u8,
    pub is_fido_candidate: bool,
    /// Scored in the verbose band below the candidate threshold, or named like a target device
    pub verbose: bool,
    /// Device name matched one of the configured target hints
    pub is_target_device: bool,
}

impl EventAnalysis {
    /// Any advertised service UUID looks FIDO-related
    pub fn has_fido_service(&self) -> bool {
        self.advertised_services.iter().any(|s| s.fido_related)
    }

    /// Candidates, verbose events and FIDO service advertisers get the detailed view
    pub fn needs_detail(&self) -> bool {
        self.is_fido_candidate || self.verbose || self.has_fido_service()
    }

    /// All scored structures across both sub-structures, manufacturer data first
    pub fn structures(&self) -> impl Iterator<Item = &ScoredStructure> {
        self.manufacturer_data_candidates
            .iter()
            .flat_map(|m| m.possible_fido_structures.iter())
            .chain(
                self.service_data_candidates
                    .iter()
                    .filter_map(|s| s.fido_analysis.as_ref()),
            )
    }
}

/// An advertisement event that crossed the candidate threshold
///
/// This is the record shape external export code must match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FidoCandidateRecord {
    pub timestamp: DateTime<Utc>,
    pub address: String,
    pub name: Option<String>,
    pub rssi: i16,
    pub score: u8,
    /// Structures with a caBLE v2 decomposition, in extraction order
    pub structures: Vec<ScoredStructure>,
}

impl FidoCandidateRecord {
    pub fn from_analysis(analysis: &EventAnalysis) -> Self {
        Self {
            timestamp: analysis.timestamp,
            address: analysis.address.clone(),
            name: analysis.name.clone(),
            rssi: analysis.rssi,
            score: analysis.total_score,
            structures: analysis
                .structures()
                .filter(|s| s.structure().is_some())
                .cloned()
                .collect(),
        }
    }
}

/// Session totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanSummary {
    pub total_scans: u64,
    /// Distinct device addresses analysed
    pub devices_seen: usize,
    /// Events dropped for breaking the input contract
    pub rejected_events: u64,
    pub candidates_found: usize,
    pub scan_duration_secs: f64,
}

/// Finished session: summary plus candidates ranked by score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub scan_summary: ScanSummary,
    pub candidates: Vec<FidoCandidateRecord>,
}

impl SessionReport {
    pub fn top(&self, n: usize) -> &[FidoCandidateRecord] {
        &self.candidates[..n.min(self.candidates.len())]
    }
}
