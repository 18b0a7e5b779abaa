use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use turnover_roi_core::analysis;
use turnover_roi_core::inputs::{CostParameters, RawInputs};
use turnover_roi_core::report;

use crate::input;

/// Form values. Any required field left out is reported by the validator.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RoiArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Average monthly salary
    #[arg(long, alias = "salary")]
    pub monthly_salary: Option<Decimal>,

    /// Total number of employees
    #[arg(long, alias = "employees")]
    pub total_employees: Option<Decimal>,

    /// Departures in the last 12 months
    #[arg(long, alias = "departures")]
    pub total_departures: Option<Decimal>,

    /// Annual cost of the HR system
    #[arg(long)]
    pub system_cost: Option<Decimal>,

    /// Payroll overhead multiplier applied to the monthly salary
    #[arg(long)]
    pub overhead_multiplier: Option<Decimal>,

    /// HR staff hourly cost
    #[arg(long)]
    pub hr_hourly_cost: Option<Decimal>,

    /// Manager hourly cost
    #[arg(long)]
    pub manager_hourly_cost: Option<Decimal>,

    /// Recruitment hours per replacement
    #[arg(long)]
    pub recruitment_hours: Option<Decimal>,

    /// Training hours per replacement
    #[arg(long)]
    pub training_hours: Option<Decimal>,

    /// Expected turnover reduction, percent
    #[arg(long, alias = "reduction")]
    pub turnover_reduction_percent: Option<Decimal>,
}

/// Arguments for the export snapshot
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub inputs: RoiArgs,

    /// Calculation date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

pub fn run_calculate(
    args: RoiArgs,
    defaults: &CostParameters,
) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = resolve_inputs(args, defaults)?;
    let result = analysis::analyze(&raw)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_report(
    args: RoiArgs,
    defaults: &CostParameters,
) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = resolve_inputs(args, defaults)?;
    let output = analysis::analyze(&raw)?;
    let card = report::build_report(&output.result);
    Ok(serde_json::json!({
        "result": card,
        "warnings": output.warnings,
        "methodology": output.methodology,
    }))
}

pub fn run_export(
    args: ExportArgs,
    defaults: &CostParameters,
) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = resolve_inputs(args.inputs, defaults)?;
    let output = analysis::analyze(&raw)?;
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let record = report::export_record(&output.result.metrics, date);
    Ok(serde_json::json!({ "result": record }))
}

/// Inputs come from `--input`, then piped stdin, then flags. Cost
/// parameters missing from any source fall back to `defaults`.
pub fn resolve_inputs(
    args: RoiArgs,
    defaults: &CostParameters,
) -> Result<RawInputs, Box<dyn std::error::Error>> {
    if let Some(data) = input::load(args.input.as_deref())? {
        let merged = with_defaults(data, defaults)?;
        return Ok(serde_json::from_value(merged)?);
    }

    let p = defaults.clone();
    Ok(RawInputs {
        monthly_salary: args.monthly_salary,
        total_employees: args.total_employees,
        total_departures: args.total_departures,
        system_cost: args.system_cost,
        parameters: CostParameters {
            overhead_multiplier: args.overhead_multiplier.unwrap_or(p.overhead_multiplier),
            hr_hourly_cost: args.hr_hourly_cost.unwrap_or(p.hr_hourly_cost),
            manager_hourly_cost: args.manager_hourly_cost.unwrap_or(p.manager_hourly_cost),
            recruitment_hours: args.recruitment_hours.unwrap_or(p.recruitment_hours),
            training_hours: args.training_hours.unwrap_or(p.training_hours),
            turnover_reduction_percent: args
                .turnover_reduction_percent
                .unwrap_or(p.turnover_reduction_percent),
        },
    })
}

/// Overlay a JSON input object on top of the default parameters.
pub fn with_defaults(
    data: Value,
    defaults: &CostParameters,
) -> Result<Value, Box<dyn std::error::Error>> {
    let Value::Object(fields) = data else {
        return Err("input must be a JSON object".into());
    };
    let mut merged = match serde_json::to_value(defaults)? {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    merged.extend(fields);
    Ok(Value::Object(merged))
}
