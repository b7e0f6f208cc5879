//! caBLE v2 structure detection
//!
//! Pure, allocation-light analysis of a single candidate byte string:
//! pattern tagging, fixed-layout parsing and plausibility scoring. Nothing in
//! here knows where the bytes came from.

pub mod cable_parser;
pub mod patterns;
pub mod scorer;
pub mod uuid;

pub use cable_parser::{analyse_candidate, parse_cable_v2};
pub use patterns::detect_patterns;
pub use scorer::score_structure;
pub use uuid::{collapse_uuid, expand_short_uuid, is_fido_related_uuid, is_known_fido_short_uuid};
