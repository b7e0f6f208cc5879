use crate::config::DetectionConfig;
use crate::decomposer::{analyse_manufacturer_data, analyse_service_data};
use crate::detection::is_fido_related_uuid;
use crate::errors::{AnalysisError, AnalysisResult};
use crate::types::{
    AdvertisedService, AdvertisementEvent, DeviceSighting, EventAnalysis, FidoCandidateRecord,
};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

/// Lifecycle of a scan session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Scanning,
    Finished,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Scanning => "scanning",
            SessionState::Finished => "finished",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analyse one advertisement event without touching any session state
///
/// `total_score` is the maximum over every scored structure from both
/// manufacturer data and service data. Without session history the event
/// counts as the first sighting of its address.
pub fn analyse_event(
    event: &AdvertisementEvent,
    config: &DetectionConfig,
    scan_index: u64,
    timestamp: DateTime<Utc>,
) -> EventAnalysis {
    analyse_sighting(
        event,
        config,
        scan_index,
        timestamp,
        DeviceSighting::first(timestamp),
    )
}

fn analyse_sighting(
    event: &AdvertisementEvent,
    config: &DetectionConfig,
    scan_index: u64,
    timestamp: DateTime<Utc>,
    sighting: DeviceSighting,
) -> EventAnalysis {
    let advertised_services = event
        .service_uuids
        .iter()
        .map(|uuid| AdvertisedService {
            uuid: uuid.clone(),
            fido_related: is_fido_related_uuid(uuid),
        })
        .collect();

    let manufacturer_data_candidates: Vec<_> = event
        .manufacturer_data
        .iter()
        .map(|(company_id, data)| analyse_manufacturer_data(*company_id, data))
        .collect();
    let service_data_candidates = analyse_service_data(&event.service_data);

    let total_score = manufacturer_data_candidates
        .iter()
        .filter_map(|m| m.max_score())
        .chain(service_data_candidates.iter().filter_map(|s| s.max_score()))
        .max()
        .unwrap_or(0);

    let is_fido_candidate = total_score >= config.candidate_threshold;
    let is_target_device = config.is_target_name(event.display_name());
    let in_verbose_band = !is_fido_candidate && total_score >= config.verbose_threshold;

    EventAnalysis {
        timestamp,
        scan_index,
        address: event.address.clone(),
        name: event.display_name().map(str::to_string),
        rssi: event.rssi,
        scan_count: sighting.scan_count,
        first_seen: sighting.first_seen,
        advertised_services,
        manufacturer_data_candidates,
        service_data_candidates,
        total_score,
        is_fido_candidate,
        verbose: in_verbose_band || is_target_device,
        is_target_device,
    }
}

/// Accumulates FIDO candidates across one scan session
///
/// Owned by the caller; every mutation goes through `&mut self`, so concurrent
/// producers must funnel events through a single consumer (see
/// [`crate::processor::session`]).
#[derive(Debug)]
pub struct CandidateAggregator {
    config: DetectionConfig,
    state: SessionState,
    scan_count: u64,
    devices: BTreeMap<String, DeviceSighting>,
    candidates: Vec<FidoCandidateRecord>,
}

impl CandidateAggregator {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            config,
            state: SessionState::Idle,
            scan_count: 0,
            devices: BTreeMap::new(),
            candidates: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Events analysed so far
    pub fn scan_count(&self) -> u64 {
        self.scan_count
    }

    /// Distinct addresses analysed so far
    pub fn devices_seen(&self) -> usize {
        self.devices.len()
    }

    pub fn device(&self, address: &str) -> Option<&DeviceSighting> {
        self.devices.get(address)
    }

    /// Stored candidates in arrival order
    pub fn candidates(&self) -> &[FidoCandidateRecord] {
        &self.candidates
    }

    /// Idle → Scanning
    pub fn start(&mut self) -> AnalysisResult<()> {
        self.expect_state(SessionState::Idle)?;
        self.state = SessionState::Scanning;
        info!("Scan session started");
        Ok(())
    }

    /// Analyse an event now
    pub fn ingest(&mut self, event: &AdvertisementEvent) -> AnalysisResult<EventAnalysis> {
        self.ingest_at(event, Utc::now())
    }

    /// Analyse an event observed at `timestamp`
    pub fn ingest_at(
        &mut self,
        event: &AdvertisementEvent,
        timestamp: DateTime<Utc>,
    ) -> AnalysisResult<EventAnalysis> {
        self.expect_state(SessionState::Scanning)?;
        event.validate()?;

        self.scan_count += 1;
        let sighting = *self
            .devices
            .entry(event.address.clone())
            .and_modify(|seen| seen.scan_count += 1)
            .or_insert_with(|| DeviceSighting::first(timestamp));
        let analysis = analyse_sighting(event, &self.config, self.scan_count, timestamp, sighting);

        debug!(
            "Event #{} from {} (sighting {}): score {}",
            analysis.scan_index, analysis.address, analysis.scan_count, analysis.total_score
        );

        for service in analysis.advertised_services.iter().filter(|s| s.fido_related) {
            info!(
                "FIDO/CTAP service advertised by {}: {}",
                analysis.address, service.uuid
            );
        }

        if analysis.is_fido_candidate {
            info!(
                "FIDO candidate {} ({}) score {}/100",
                analysis.address,
                analysis.name.as_deref().unwrap_or("unknown"),
                analysis.total_score
            );
            self.candidates
                .push(FidoCandidateRecord::from_analysis(&analysis));
        }

        Ok(analysis)
    }

    /// Scanning → Finished; candidates ranked by score, ties in arrival order
    pub fn finish(&mut self) -> AnalysisResult<Vec<FidoCandidateRecord>> {
        self.expect_state(SessionState::Scanning)?;
        self.state = SessionState::Finished;
        // stable sort keeps arrival order among equal scores
        self.candidates.sort_by_key(|record| Reverse(record.score));

        info!(
            "Scan session finished: {} events from {} devices, {} candidates",
            self.scan_count,
            self.devices.len(),
            self.candidates.len()
        );
        Ok(self.candidates.clone())
    }

    fn expect_state(&self, expected: SessionState) -> AnalysisResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(AnalysisError::SessionState {
                expected: expected.as_str(),
                actual: self.state.as_str(),
            })
        }
    }
}
