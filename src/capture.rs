//! Captured advertisement replay
//!
//! A capture is a JSON Lines file with one [`AdvertisementEvent`] per line and
//! payloads as hex strings:
//!
//! ```text
//! {"address":"AA:BB:CC:DD:EE:FF","name":"iPad","rssi":-58,"manufacturer_data":{"76":"1005..."}}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use crate::errors::{AppError, AppResult};
use crate::types::AdvertisementEvent;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Parse capture lines into events, reporting the first malformed line
pub fn parse_capture<R: BufRead>(reader: R) -> AppResult<Vec<AdvertisementEvent>> {
    let mut events = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let event: AdvertisementEvent =
            serde_json::from_str(trimmed).map_err(|e| AppError::InvalidRecord {
                line: index + 1,
                reason: e.to_string(),
            })?;
        events.push(event);
    }

    debug!("Parsed {} captured advertisement(s)", events.len());
    Ok(events)
}

/// Load a capture file from disk
pub fn load_capture(path: &Path) -> AppResult<Vec<AdvertisementEvent>> {
    let file = File::open(path)?;
    let events = parse_capture(BufReader::new(file))?;
    info!("Loaded {} advertisement(s) from {}", events.len(), path.display());
    Ok(events)
}
