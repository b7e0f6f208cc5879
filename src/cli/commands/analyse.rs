use crate::capture::load_capture;
use crate::cli::report::{print_event_analysis, print_session_summary};
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::output::OutputManager;
use crate::processor::ScanSession;
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args)]
pub struct AnalyseCommand {
    /// Capture file: one JSON advertisement event per line
    capture: PathBuf,

    /// Session duration limit in seconds, 0 for none (overrides config.toml)
    #[arg(long)]
    duration: Option<u64>,

    /// Score at which an event becomes a FIDO candidate (overrides config.toml)
    #[arg(long)]
    candidate_threshold: Option<u8>,

    /// Number of top candidates to list
    #[arg(long, default_value = "5")]
    top: usize,

    /// Save the session report as JSON
    #[arg(long)]
    save: bool,

    /// Report directory (overrides config.toml)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl AnalyseCommand {
    pub async fn run(&self) -> AppResult<()> {
        info!("=== caBLE v2 Analyser - Capture Replay ===");

        let mut config = match AppConfig::load() {
            Ok(config) => {
                info!("Configuration loaded successfully");
                config
            }
            Err(e) => {
                warn!("Failed to load configuration: {}", e);
                info!("Using default configuration");
                AppConfig::default()
            }
        };

        if let Some(duration) = self.duration {
            config.session.duration_secs = duration;
        }
        if let Some(threshold) = self.candidate_threshold {
            config.detection.candidate_threshold = threshold;
            // keep the verbose band below the new threshold
            config.detection.verbose_threshold = config.detection.verbose_threshold.min(threshold);
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
        config.validate().map_err(AppError::Config)?;

        let events = load_capture(&self.capture)?;
        let high_confidence = config.detection.high_confidence_threshold;
        let (session, handle) = ScanSession::new(config.detection.clone(), &config.session);

        let producer = tokio::spawn(async move {
            for event in events {
                if handle.send(event).await.is_err() {
                    break;
                }
            }
            handle.stop().await;
        });

        let outcome = session
            .run(|analysis| {
                if analysis.needs_detail() {
                    print_event_analysis(analysis, high_confidence);
                }
            })
            .await?;
        producer
            .await
            .map_err(|e| AppError::InvalidData(format!("Capture replay task failed: {}", e)))?;

        info!("Session ended: {:?}", outcome.stop_reason);
        print_session_summary(&outcome.report, self.top);

        if self.save && !outcome.report.candidates.is_empty() {
            let path = OutputManager::new(config.output.directory.clone())
                .write_session_report(&outcome.report)?;
            println!("   Detailed analysis saved: {}", path.display());
        }

        Ok(())
    }
}
