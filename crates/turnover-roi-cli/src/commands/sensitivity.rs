use clap::Args;
use serde_json::Value;

use turnover_roi_core::inputs::CostParameters;
use turnover_roi_core::sensitivity::{self, SensitivityInput};

use crate::commands::roi::with_defaults;
use crate::input;

/// Arguments for a one-way ROI sweep
#[derive(Args)]
pub struct SensitivityArgs {
    /// Path to JSON input file: {"base": {...}, "variable": {"field", "min", "max", "step"}}
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sensitivity(
    args: SensitivityArgs,
    defaults: &CostParameters,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut data: Value = input::load(args.input.as_deref())?
        .ok_or("--input file is required for sensitivity analysis")?;

    if let Some(base) = data.get_mut("base") {
        *base = with_defaults(base.take(), defaults)?;
    }

    let sensitivity_input: SensitivityInput = serde_json::from_value(data)?;
    let result = sensitivity::run_sensitivity(&sensitivity_input)?;
    Ok(serde_json::to_value(result)?)
}
