//! Scan session loop
//!
//! The scanning stack pushes events from its own execution context; the
//! analysis side is a single consumer draining a bounded channel. Stop
//! requests travel the same channel, so no state is shared between the two.

use crate::config::{DetectionConfig, SessionConfig};
use crate::errors::{AnalysisError, AppError, AppResult};
use crate::processor::aggregator::CandidateAggregator;
use crate::types::{AdvertisementEvent, EventAnalysis, ScanSummary, SessionReport};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Messages from the scanning stack to the analysis loop
#[derive(Debug)]
pub enum SessionMessage {
    Advertisement(AdvertisementEvent),
    Stop,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Explicit stop message
    Requested,
    /// Configured duration elapsed
    DurationExpired,
    /// Every sender was dropped
    ChannelClosed,
}

/// Producer side of a session, handed to the scanning stack
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionMessage>,
}

impl SessionHandle {
    /// Deliver an event, waiting for channel capacity
    pub async fn send(&self, event: AdvertisementEvent) -> AppResult<()> {
        self.tx
            .send(SessionMessage::Advertisement(event))
            .await
            .map_err(|_| AppError::SessionClosed)
    }

    /// Deliver an event from a non-async callback; drops it when the channel is full
    pub fn try_send(&self, event: AdvertisementEvent) -> bool {
        match self.tx.try_send(SessionMessage::Advertisement(event)) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("Scan session channel full, dropping advertisement");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    /// Ask the session to finish after draining what was sent before
    ///
    /// Returns false when the session had already stopped.
    pub async fn stop(&self) -> bool {
        self.tx.send(SessionMessage::Stop).await.is_ok()
    }
}

/// Outcome of a finished session
#[derive(Debug)]
pub struct SessionOutcome {
    pub report: SessionReport,
    pub stop_reason: StopReason,
}

/// Consumer side of a session: owns the aggregator and the receiver
pub struct ScanSession {
    aggregator: CandidateAggregator,
    rx: mpsc::Receiver<SessionMessage>,
    duration: Option<Duration>,
}

impl ScanSession {
    /// Create a session and the handle its producers send through
    pub fn new(detection: DetectionConfig, session: &SessionConfig) -> (Self, SessionHandle) {
        let (tx, rx) = mpsc::channel(session.channel_capacity.max(1));
        let duration = (session.duration_secs > 0).then(|| Duration::from_secs(session.duration_secs));

        let session = Self {
            aggregator: CandidateAggregator::new(detection),
            rx,
            duration,
        };
        (session, SessionHandle { tx })
    }

    /// Drain events until stopped, calling `observer` with every event analysis
    pub async fn run<F>(mut self, mut observer: F) -> AppResult<SessionOutcome>
    where
        F: FnMut(&EventAnalysis),
    {
        self.aggregator.start()?;
        let started = Instant::now();
        let mut rejected_events = 0u64;

        info!(
            "Scan session running{}",
            self.duration
                .map(|d| format!(" for {}s", d.as_secs()))
                .unwrap_or_default()
        );

        let deadline = sleep(self.duration.unwrap_or(Duration::MAX));
        tokio::pin!(deadline);

        let stop_reason = loop {
            let message = tokio::select! {
                message = self.rx.recv() => message,
                _ = &mut deadline, if self.duration.is_some() => break StopReason::DurationExpired,
            };

            match message {
                Some(SessionMessage::Advertisement(event)) => match self.aggregator.ingest(&event) {
                    Ok(analysis) => observer(&analysis),
                    Err(AnalysisError::ContractViolation(reason)) => {
                        warn!("Skipping advertisement: {}", reason);
                        rejected_events += 1;
                    }
                    Err(e) => return Err(e.into()),
                },
                Some(SessionMessage::Stop) => break StopReason::Requested,
                None => break StopReason::ChannelClosed,
            }
        };

        debug!("Scan session stopping: {:?}", stop_reason);
        self.rx.close();

        let candidates = self.aggregator.finish()?;
        let report = SessionReport {
            scan_summary: ScanSummary {
                total_scans: self.aggregator.scan_count(),
                devices_seen: self.aggregator.devices_seen(),
                rejected_events,
                candidates_found: candidates.len(),
                scan_duration_secs: started.elapsed().as_secs_f64(),
            },
            candidates,
        };

        Ok(SessionOutcome {
            report,
            stop_reason,
        })
    }
}
