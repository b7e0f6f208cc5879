pub mod aggregator;
pub mod session;

pub use aggregator::{analyse_event, CandidateAggregator, SessionState};
pub use session::{ScanSession, SessionHandle, SessionMessage, SessionOutcome, StopReason};
