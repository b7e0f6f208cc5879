use crate::cli::report::print_inspect_result;
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::inspect::{inspect_payload, InspectResult, PayloadOrigin};
use crate::types::APPLE_COMPANY_ID;
use clap::Args;

/// Analyse a single hex payload
#[derive(Args)]
pub struct InspectCommand {
    /// Payload bytes as hex
    pub payload: String,

    /// Treat the payload as manufacturer data for this company identifier
    #[arg(long, default_value_t = APPLE_COMPANY_ID, conflicts_with = "service_uuid")]
    pub company_id: u16,

    /// Treat the payload as service data under this UUID
    #[arg(long)]
    pub service_uuid: Option<String>,

    /// Output format: text, json
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl InspectCommand {
    pub fn run(&self) -> AppResult<()> {
        let origin = match &self.service_uuid {
            Some(uuid) => PayloadOrigin::ServiceData { uuid: uuid.clone() },
            None => PayloadOrigin::Manufacturer {
                company_id: self.company_id,
            },
        };

        let result = inspect_payload(&self.payload, &origin)
            .map_err(|e| AppError::InvalidData(format!("Inspection failed: {:#}", e)))?;

        match self.format.as_str() {
            "json" => print_inspect_json(&result)?,
            _ => print_inspect_result(
                &result,
                AppConfig::get_defaults().detection.high_confidence_threshold,
            ),
        }

        Ok(())
    }
}

fn print_inspect_json(result: &InspectResult) -> AppResult<()> {
    let json = match result {
        InspectResult::Manufacturer(analysis) => serde_json::to_value(analysis)?,
        InspectResult::ServiceData {
            analysis,
            fido_related,
        } => {
            let mut value = serde_json::to_value(analysis)?;
            value["fido_related"] = serde_json::Value::Bool(*fido_related);
            value
        }
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
