use crate::errors::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bluetooth SIG company identifier for Apple, Inc.
pub const APPLE_COMPANY_ID: u16 = 76;

/// One observed BLE advertisement, already decoded by the scanning stack
///
/// Payload maps are ordered so repeated analyses of the same event produce
/// identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertisementEvent {
    /// Platform address or identifier (MAC on Linux, UUID on macOS)
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Signal strength in dBm
    pub rssi: i16,
    #[serde(default)]
    pub service_uuids: Vec<String>,
    #[serde(default, with = "crate::types::hex_bytes::map")]
    pub service_data: BTreeMap<String, Vec<u8>>,
    #[serde(default, with = "crate::types::hex_bytes::map")]
    pub manufacturer_data: BTreeMap<u16, Vec<u8>>,
    #[serde(default)]
    pub local_name: Option<String>,
}

impl AdvertisementEvent {
    pub fn new(address: impl Into<String>, rssi: i16) -> Self {
        Self {
            address: address.into(),
            rssi,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_manufacturer_data(mut self, company_id: u16, data: Vec<u8>) -> Self {
        self.manufacturer_data.insert(company_id, data);
        self
    }

    pub fn with_service_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.service_uuids.push(uuid.into());
        self
    }

    pub fn with_service_data(mut self, uuid: impl Into<String>, data: Vec<u8>) -> Self {
        self.service_data.insert(uuid.into(), data);
        self
    }

    /// Name to display: device name, falling back to the advertised local name
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.local_name.as_deref())
    }

    /// Check the input contract the scanning stack must honour
    ///
    /// Low-scoring or structurally implausible payloads are never a violation;
    /// only events that cannot be attributed or keyed are rejected.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.address.trim().is_empty() {
            return Err(AnalysisError::ContractViolation(
                "advertisement event has an empty device address".to_string(),
            ));
        }
        if let Some(uuid) = self.service_data.keys().find(|k| k.trim().is_empty()) {
            return Err(AnalysisError::ContractViolation(format!(
                "service data keyed by an empty UUID {:?} on device {}",
                uuid, self.address
            )));
        }
        Ok(())
    }
}
