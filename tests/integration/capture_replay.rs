//! Capture Replay Tests
//!
//! Round-trips advertisement events through a JSON Lines capture file and
//! replays them through a session.

use cable_scan::capture::load_capture;
use cable_scan::config::{DetectionConfig, SessionConfig};
use cable_scan::errors::AppError;
use cable_scan::processor::ScanSession;
use cable_scan::types::APPLE_COMPANY_ID;
use std::io::Write;
use tempfile::NamedTempFile;

use crate::common::{apple_payload, event, full_score_payload, write_capture};

#[tokio::test]
async fn test_replayed_capture_matches_live_events() -> anyhow::Result<()> {
    let events = vec![
        event("11:22:33:44:55:66", -58)
            .with_name("Living Room iPad")
            .with_service_uuid("0000fff9-0000-1000-8000-00805f9b34fb")
            .with_manufacturer_data(APPLE_COMPANY_ID, vec![0x10, 0x05, 0x03, 0x18, 0x2a, 0x7c, 0x11, 0x00, 0x01]),
        event("AA:BB:CC:DD:EE:FF", -64)
            .with_manufacturer_data(APPLE_COMPANY_ID, apple_payload(0x12, 0x19, &full_score_payload())),
    ];
    let capture = write_capture(&events);

    let loaded = load_capture(capture.path())?;
    assert_eq!(loaded, events);

    let (session, handle) = ScanSession::new(
        DetectionConfig::default(),
        &SessionConfig {
            duration_secs: 0,
            channel_capacity: 4,
        },
    );
    let producer = tokio::spawn(async move {
        for ev in loaded {
            handle.send(ev).await?;
        }
        handle.stop().await;
        anyhow::Ok(())
    });

    let mut analyses = Vec::new();
    let outcome = session.run(|a| analyses.push(a.clone())).await?;
    producer.await??;

    // iPad advert is short and scores nothing, but is still shown in detail
    assert_eq!(analyses[0].total_score, 0);
    assert!(analyses[0].is_target_device);
    assert!(analyses[0].verbose);
    assert!(analyses[0].has_fido_service());
    assert_eq!(analyses[1].total_score, 100);

    assert_eq!(outcome.report.candidates.len(), 1);
    assert_eq!(outcome.report.candidates[0].address, "AA:BB:CC:DD:EE:FF");
    Ok(())
}

#[test]
fn test_bad_hex_in_capture_is_invalid_record() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"address":"a","rssi":-40}}"#).unwrap();
    writeln!(file, r#"{{"address":"b","rssi":-40,"service_data":{{"fff9":"0g"}}}}"#).unwrap();
    file.flush().unwrap();

    match load_capture(file.path()) {
        Err(AppError::InvalidRecord { line, reason }) => {
            assert_eq!(line, 2);
            assert!(!reason.is_empty());
        }
        other => panic!("expected InvalidRecord, got {:?}", other.map(|e| e.len())),
    }
}

#[test]
fn test_missing_capture_is_io_error() {
    let result = load_capture(std::path::Path::new("does/not/exist.jsonl"));
    assert!(matches!(result, Err(AppError::Io(_))));
}
