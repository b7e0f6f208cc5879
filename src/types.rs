//! caBLE v2 Advertisement Analyser - Type System
//!
//! - `advertisement`: Decoded BLE advertisement events as delivered by the scanning stack
//! - `cable`: caBLE v2 field layout, score breakdown and per-candidate analysis
//! - `candidate`: Candidate byte strings, their provenance and session-level records
//! - `hex_bytes`: Serde helpers for hex-encoded payloads

mod advertisement;
mod cable;
mod candidate;
pub mod hex_bytes;

pub use advertisement::*;
pub use cable::*;
pub use candidate::*;
