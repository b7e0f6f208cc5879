use serde::{Serialize, Serializer};
use std::fmt;

/// Length of the caBLE v2 advertisement layout in bytes
pub const CABLE_V2_LENGTH: usize = 20;

/// Shortest candidate worth analysing at all
pub const MIN_CANDIDATE_LENGTH: usize = 16;

/// Parsed caBLE v2 advertisement layout
///
/// ```text
/// [flags:1][nonce:10][routing_id:3][tunnel_service:2 LE][hmac_tag:4]
/// ```
///
/// Only ever built from candidates of at least [`CABLE_V2_LENGTH`] bytes; bytes
/// past offset 20 are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CableV2Structure {
    #[serde(serialize_with = "serialize_flags")]
    pub flags: u8,
    /// caBLE v2 expects a zero flags byte
    pub flags_valid: bool,
    #[serde(serialize_with = "crate::types::hex_bytes::serialize")]
    pub nonce: [u8; 10],
    #[serde(serialize_with = "crate::types::hex_bytes::serialize")]
    pub routing_id: [u8; 3],
    #[serde(serialize_with = "crate::types::hex_bytes::serialize")]
    pub tunnel_service: [u8; 2],
    /// `tunnel_service` decoded as little-endian u16
    pub tunnel_service_id: u16,
    #[serde(serialize_with = "crate::types::hex_bytes::serialize")]
    pub hmac_tag: [u8; 4],
}

fn serialize_flags<S>(flags: &u8, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&format_args!("0x{:02x}", flags))
}

/// Weighted sub-scores of a caBLE v2 plausibility assessment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub flags: u8,
    pub nonce_entropy: u8,
    pub routing_id: u8,
    pub tunnel_service: u8,
    pub non_trivial: u8,
    /// Sum of the terms above, clamped to `[0, 100]`
    pub total: u8,
}

impl ScoreBreakdown {
    pub const MAX_SCORE: u8 = 100;

    pub fn new(flags: u8, nonce_entropy: u8, routing_id: u8, tunnel_service: u8, non_trivial: u8) -> Self {
        let total = [nonce_entropy, routing_id, tunnel_service, non_trivial]
            .iter()
            .fold(flags, |acc, term| acc.saturating_add(*term))
            .min(Self::MAX_SCORE);

        Self {
            flags,
            nonce_entropy,
            routing_id,
            tunnel_service,
            non_trivial,
            total,
        }
    }
}

/// Statistical anomaly found in a byte string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternTag {
    /// Every byte has this value
    AllSameByte(u8),
    /// `data[i] == data[0] + i` for every index
    SequentialBytes,
    /// More than half the bytes are zero
    MostlyZeros { zeros: usize, length: usize },
    /// Distinct byte values exceed 80% of the length
    HighEntropy,
}

impl fmt::Display for PatternTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternTag::AllSameByte(byte) => write!(f, "all_same_byte_0x{:02x}", byte),
            PatternTag::SequentialBytes => write!(f, "sequential_bytes"),
            PatternTag::MostlyZeros { zeros, length } => {
                write!(f, "mostly_zeros_{}/{}", zeros, length)
            }
            PatternTag::HighEntropy => write!(f, "high_entropy"),
        }
    }
}

impl Serialize for PatternTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Result of analysing one candidate byte string as a caBLE v2 payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CableAnalysis {
    pub length: usize,
    /// Absent when the candidate is shorter than [`CABLE_V2_LENGTH`]
    pub structure: Option<CableV2Structure>,
    /// Present exactly when `structure` is
    pub score: Option<ScoreBreakdown>,
    pub patterns: Vec<PatternTag>,
}

impl CableAnalysis {
    pub fn structure_score(&self) -> Option<u8> {
        self.score.map(|s| s.total)
    }
}
