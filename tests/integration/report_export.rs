//! Session Report Export Tests
//!
//! The exported JSON is the compatibility surface for external tooling, so
//! these tests pin its field names.

use cable_scan::config::DetectionConfig;
use cable_scan::output::OutputManager;
use cable_scan::processor::CandidateAggregator;
use cable_scan::types::{ScanSummary, SessionReport, APPLE_COMPANY_ID};
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use crate::common::{apple_payload, event, full_score_payload};

fn finished_report() -> SessionReport {
    let mut aggregator = CandidateAggregator::new(DetectionConfig::default());
    aggregator.start().unwrap();

    let seen_at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
    aggregator
        .ingest_at(
            &event("AA:BB:CC:DD:EE:FF", -61)
                .with_name("iPad")
                .with_manufacturer_data(APPLE_COMPANY_ID, apple_payload(0x12, 0x19, &full_score_payload()))
                .with_service_data("fff9", vec![0u8; 17]),
            seen_at,
        )
        .unwrap();

    let candidates = aggregator.finish().unwrap();
    SessionReport {
        scan_summary: ScanSummary {
            total_scans: aggregator.scan_count(),
            devices_seen: aggregator.devices_seen(),
            rejected_events: 0,
            candidates_found: candidates.len(),
            scan_duration_secs: 1.5,
        },
        candidates,
    }
}

#[test]
fn test_record_json_shape() {
    let report = finished_report();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["scan_summary"]["total_scans"], 1);
    assert_eq!(json["scan_summary"]["devices_seen"], 1);
    assert_eq!(json["scan_summary"]["candidates_found"], 1);

    let record = &json["candidates"][0];
    assert_eq!(record["timestamp"], "2025-03-14T09:26:53Z");
    assert_eq!(record["address"], "AA:BB:CC:DD:EE:FF");
    assert_eq!(record["name"], "iPad");
    assert_eq!(record["rssi"], -61);
    assert_eq!(record["score"], 100);

    let structure = &record["structures"][0];
    assert_eq!(structure["type"], "apple_cable_candidate");
    assert_eq!(structure["source"], "manufacturer");
    assert_eq!(structure["company_id"], 76);
    assert_eq!(structure["analysis"]["length"], 20);
    assert_eq!(structure["analysis"]["structure"]["flags"], "0x00");
    assert_eq!(structure["analysis"]["structure"]["nonce"], "112233445566778899aa");
    assert_eq!(structure["analysis"]["structure"]["tunnel_service_id"], 0);
    assert_eq!(structure["analysis"]["score"]["total"], 100);
    assert_eq!(structure["analysis"]["patterns"], serde_json::json!([]));
}

#[test]
fn test_write_session_report_creates_directory() {
    let temp = TempDir::new().unwrap();
    let out_dir = temp.path().join("logs").join("nested");
    let manager = OutputManager::new(&out_dir);

    let path = manager.write_session_report(&finished_report()).unwrap();

    assert!(path.starts_with(&out_dir));
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("universal_fido_analysis_"));
    assert!(name.ends_with(".json"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["candidates"][0]["score"], 100);
}
