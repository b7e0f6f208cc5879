//! Integration Tests Module
//!
//! End-to-end tests that drive advertisement events through a scan session
//! and export the resulting report.

pub mod capture_replay;
pub mod report_export;
