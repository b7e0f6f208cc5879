//! Single-payload inspection for examining suspected caBLE v2 data by hand
//!
//! Runs one hex payload through the same decomposition the scan session
//! uses, either as manufacturer data for a company identifier or as service
//! data under a UUID.

use crate::decomposer::{analyse_manufacturer_data, analyse_service_data_entry};
use crate::detection::is_fido_related_uuid;
use crate::types::{ManufacturerAnalysis, ServiceDataAnalysis};
use anyhow::{Context, Result};

/// Where the inspected payload is assumed to come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadOrigin {
    Manufacturer { company_id: u16 },
    ServiceData { uuid: String },
}

/// Result of inspecting one payload
#[derive(Debug)]
pub enum InspectResult {
    Manufacturer(ManufacturerAnalysis),
    ServiceData {
        analysis: ServiceDataAnalysis,
        /// Loose substring check, reported next to the strict `is_fido_uuid`
        fido_related: bool,
    },
}

impl InspectResult {
    pub fn max_score(&self) -> Option<u8> {
        match self {
            InspectResult::Manufacturer(m) => m.max_score(),
            InspectResult::ServiceData { analysis, .. } => analysis.max_score(),
        }
    }
}

/// Decode a hex payload, tolerating whitespace, colons and a `0x` prefix
pub fn parse_hex_payload(input: &str) -> Result<Vec<u8>> {
    let cleaned: String = input
        .trim()
        .trim_start_matches("0x")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();

    anyhow::ensure!(!cleaned.is_empty(), "Payload is empty");
    hex::decode(&cleaned).with_context(|| format!("Payload is not valid hex: {}", input.trim()))
}

/// Inspect a hex payload as if it arrived from `origin`
pub fn inspect_payload(hex_payload: &str, origin: &PayloadOrigin) -> Result<InspectResult> {
    let data = parse_hex_payload(hex_payload)?;

    Ok(match origin {
        PayloadOrigin::Manufacturer { company_id } => {
            InspectResult::Manufacturer(analyse_manufacturer_data(*company_id, &data))
        }
        PayloadOrigin::ServiceData { uuid } => {
            anyhow::ensure!(!uuid.trim().is_empty(), "Service UUID is empty");
            InspectResult::ServiceData {
                analysis: analyse_service_data_entry(uuid, &data),
                fido_related: is_fido_related_uuid(uuid),
            }
        }
    })
}
