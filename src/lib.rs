//! caBLE v2 Advertisement Analyser
//!
//! Heuristic detection of FIDO hybrid-transport (caBLE v2) handshake data in
//! BLE advertisements. The core takes decoded advertisement events and returns
//! structured analyses; radio access, files and the console stay outside it.
//!
//! Pipeline: event → [`decomposer`] → [`detection`] → [`processor`].

pub mod capture;
pub mod cli;
pub mod config;
pub mod decomposer;
pub mod detection;
pub mod errors;
pub mod inspect;
pub mod output;
pub mod processor;
pub mod types;
