//! Common Test Utilities
//!
//! Builders for advertisement events and caBLE v2 payloads shared across the
//! unit and integration suites.

#![allow(dead_code)]

use cable_scan::types::AdvertisementEvent;
use std::io::Write;
use tempfile::NamedTempFile;

/// Distinct nonce bytes: scores the full nonce entropy term
pub const DISTINCT_NONCE: [u8; 10] = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA];

/// Build a 20-byte caBLE v2 payload from its fields
pub fn cable_payload(
    flags: u8,
    nonce: [u8; 10],
    routing_id: [u8; 3],
    tunnel_service: [u8; 2],
    hmac_tag: [u8; 4],
) -> Vec<u8> {
    let mut payload = vec![flags];
    payload.extend_from_slice(&nonce);
    payload.extend_from_slice(&routing_id);
    payload.extend_from_slice(&tunnel_service);
    payload.extend_from_slice(&hmac_tag);
    payload
}

/// Payload that scores exactly 100
pub fn full_score_payload() -> Vec<u8> {
    cable_payload(
        0x00,
        DISTINCT_NONCE,
        [0x01, 0x00, 0x00],
        [0x00, 0x00],
        [0xDE, 0xAD, 0xBE, 0xEF],
    )
}

/// Apple manufacturer payload: 2-byte header followed by `body`
pub fn apple_payload(type_flag: u8, subtype: u8, body: &[u8]) -> Vec<u8> {
    let mut payload = vec![type_flag, subtype];
    payload.extend_from_slice(body);
    payload
}

pub fn event(address: &str, rssi: i16) -> AdvertisementEvent {
    AdvertisementEvent::new(address, rssi)
}

/// Write events to a temporary JSON Lines capture file
pub fn write_capture(events: &[AdvertisementEvent]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for event in events {
        writeln!(file, "{}", serde_json::to_string(event).unwrap()).unwrap();
    }
    file.flush().unwrap();
    file
}
