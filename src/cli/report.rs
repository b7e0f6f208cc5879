//! Console presentation of analysis results

use crate::inspect::InspectResult;
use crate::types::{
    EventAnalysis, ManufacturerAnalysis, ScoredStructure, ServiceDataAnalysis, SessionReport,
    VendorBreakdown,
};

/// Print the detailed view of one event
pub fn print_event_analysis(analysis: &EventAnalysis, high_confidence_threshold: u8) {
    println!(
        "\n[{}] SCAN #{} - FIDO Analysis",
        analysis.timestamp.to_rfc3339(),
        analysis.scan_index
    );
    println!(
        "  Device: {} ({})",
        analysis.address,
        analysis.name.as_deref().unwrap_or("unknown")
    );
    println!("  RSSI: {} dBm", analysis.rssi);
    println!(
        "  Seen: {} time(s) since {}",
        analysis.scan_count,
        analysis.first_seen.to_rfc3339()
    );
    println!("  FIDO Score: {}/100", analysis.total_score);

    if analysis.is_target_device {
        println!("  *** TARGET DEVICE DETECTED ***");
    }

    if !analysis.advertised_services.is_empty() {
        println!("  Services:");
        for service in &analysis.advertised_services {
            let marker = if service.fido_related {
                " *** FIDO RELATED ***"
            } else {
                ""
            };
            println!("    {}{}", service.uuid, marker);
        }
        if analysis.has_fido_service() {
            println!("  *** FIDO/CTAP SERVICE DETECTED ***");
        }
    }

    for candidate in &analysis.manufacturer_data_candidates {
        print_manufacturer(candidate, high_confidence_threshold);
    }
    for candidate in &analysis.service_data_candidates {
        print_service_data(candidate, high_confidence_threshold);
    }

    println!("  {}", "=".repeat(60));
}

fn print_manufacturer(candidate: &ManufacturerAnalysis, high_confidence_threshold: u8) {
    println!("  Manufacturer Data (Company {}):", candidate.company_id);
    println!("    Raw: {}", hex::encode(&candidate.raw_data));

    if let Some(VendorBreakdown::Apple(apple)) = &candidate.vendor_specific {
        println!("    Apple Type: 0x{:02x}", apple.type_flag);
        println!("    Apple Subtype: 0x{:02x}", apple.subtype);
    }

    for structure in &candidate.possible_fido_structures {
        print_structure(structure, high_confidence_threshold);
    }
}

fn print_service_data(candidate: &ServiceDataAnalysis, high_confidence_threshold: u8) {
    let marker = if candidate.is_fido_uuid {
        " *** FIDO SERVICE ***"
    } else {
        ""
    };
    println!(
        "  Service Data ({}):{}",
        candidate.full_uuid.as_deref().unwrap_or(&candidate.uuid),
        marker
    );
    println!("    Raw: {} ({} bytes)", hex::encode(&candidate.data), candidate.length);

    if let Some(structure) = &candidate.fido_analysis {
        print_structure(structure, high_confidence_threshold);
    }
}

fn print_structure(structure: &ScoredStructure, high_confidence_threshold: u8) {
    println!("    {}:", structure.kind);

    let Some(analysis) = &structure.analysis else {
        println!("      Too short to analyse ({} bytes)", structure.data.len());
        return;
    };

    if let (Some(cable), Some(score)) = (&analysis.structure, &analysis.score) {
        println!("      Score: {}/100", score.total);
        println!(
            "      Flags: 0x{:02x} (valid: {})",
            cable.flags, cable.flags_valid
        );
        println!("      Nonce: {}", hex::encode(cable.nonce));
        println!("      Routing: {}", hex::encode(cable.routing_id));
        println!(
            "      Tunnel: {} (int: {})",
            hex::encode(cable.tunnel_service),
            cable.tunnel_service_id
        );
        println!("      HMAC: {}", hex::encode(cable.hmac_tag));

        if score.total >= high_confidence_threshold {
            println!("      *** HIGH CONFIDENCE FIDO STRUCTURE ***");
        }
    }

    if !analysis.patterns.is_empty() {
        let tags: Vec<String> = analysis.patterns.iter().map(|p| p.to_string()).collect();
        println!("      Patterns: {}", tags.join(", "));
    }
}

/// Print the end-of-session summary with the top `limit` candidates
pub fn print_session_summary(report: &SessionReport, limit: usize) {
    let summary = &report.scan_summary;
    println!("\nFIDO Analysis Summary:");
    println!("   Total scans: {}", summary.total_scans);
    println!("   Total devices seen: {}", summary.devices_seen);
    if summary.rejected_events > 0 {
        println!("   Rejected events: {}", summary.rejected_events);
    }
    println!("   FIDO candidates found: {}", summary.candidates_found);

    if report.candidates.is_empty() {
        println!("   No high-confidence FIDO structures detected");
        return;
    }

    println!("\nTop FIDO Candidates:");
    for (i, candidate) in report.top(limit).iter().enumerate() {
        println!(
            "   {}. {} ({}) - Score: {}/100",
            i + 1,
            candidate.name.as_deref().unwrap_or("unknown"),
            candidate.address,
            candidate.score
        );
    }
}

/// Print a single-payload inspection
pub fn print_inspect_result(result: &InspectResult, high_confidence_threshold: u8) {
    match result {
        InspectResult::Manufacturer(analysis) => {
            print_manufacturer(analysis, high_confidence_threshold)
        }
        InspectResult::ServiceData {
            analysis,
            fido_related,
        } => {
            print_service_data(analysis, high_confidence_threshold);
            println!("    FIDO-related UUID (substring match): {}", fido_related);
        }
    }
    println!(
        "  Max score: {}",
        result
            .max_score()
            .map(|s| format!("{}/100", s))
            .unwrap_or_else(|| "n/a".to_string())
    );
}
