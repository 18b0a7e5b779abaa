use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

use turnover_roi_core::calculator::{self, DerivedMetrics};
use turnover_roi_core::inputs::RawInputs;
use turnover_roi_core::{analysis, format, insights, report, sensitivity, validation};
use turnover_roi_core::{RoiError, RoiResult};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Read a form object (`{"monthly_salary": "5000", ...}`) into raw inputs.
/// Numbers are accepted as well as strings; null counts as an empty field.
fn form_inputs(input_json: &str) -> RoiResult<RawInputs> {
    let value: Value = serde_json::from_str(input_json)?;
    let Value::Object(map) = value else {
        return Err(RoiError::InvalidInput {
            field: "input".into(),
            reason: "expected a JSON object of form fields".into(),
        });
    };

    let fields: BTreeMap<String, String> = map
        .into_iter()
        .map(|(key, val)| {
            let text = match val {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key, text)
        })
        .collect();

    RawInputs::from_fields(&fields)
}

fn to_json(value: &impl Serialize) -> NapiResult<String> {
    serde_json::to_string(value).map_err(to_napi_error)
}

#[derive(Serialize)]
struct ValidationReply {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl From<&RoiError> for ValidationReply {
    fn from(e: &RoiError) -> Self {
        Self {
            valid: false,
            message: Some(e.to_string()),
            field: e.field().map(str::to_string),
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Never throws for bad form values: the reply names the field to refocus.
#[napi]
pub fn validate_inputs(input_json: String) -> NapiResult<String> {
    let reply = match form_inputs(&input_json).and_then(|raw| validation::validate(&raw)) {
        Ok(_) => ValidationReply {
            valid: true,
            message: None,
            field: None,
        },
        Err(e) => ValidationReply::from(&e),
    };
    to_json(&reply)
}

#[napi]
pub fn calculate_roi(input_json: String) -> NapiResult<String> {
    let raw = form_inputs(&input_json).map_err(to_napi_error)?;
    let valid = validation::validate(&raw).map_err(to_napi_error)?;
    let metrics = calculator::calculate(&valid).map_err(to_napi_error)?;
    to_json(&metrics)
}

#[napi]
pub fn generate_insights(metrics_json: String) -> NapiResult<String> {
    let metrics: DerivedMetrics = serde_json::from_str(&metrics_json).map_err(to_napi_error)?;
    to_json(&insights::generate_insights(&metrics))
}

#[napi]
pub fn analyze_roi(input_json: String) -> NapiResult<String> {
    let raw = form_inputs(&input_json).map_err(to_napi_error)?;
    let output = analysis::analyze(&raw).map_err(to_napi_error)?;
    to_json(&output)
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

#[napi]
pub fn build_report(input_json: String) -> NapiResult<String> {
    let raw = form_inputs(&input_json).map_err(to_napi_error)?;
    let output = analysis::analyze(&raw).map_err(to_napi_error)?;
    to_json(&report::build_report(&output.result))
}

/// `date` is `YYYY-MM-DD`; today when omitted.
#[napi]
pub fn export_results(input_json: String, date: Option<String>) -> NapiResult<String> {
    let raw = form_inputs(&input_json).map_err(to_napi_error)?;
    let output = analysis::analyze(&raw).map_err(to_napi_error)?;
    let day = match date {
        Some(text) => chrono::NaiveDate::from_str(&text).map_err(to_napi_error)?,
        None => chrono::Local::now().date_naive(),
    };
    to_json(&report::export_record(&output.result.metrics, day))
}

#[napi]
pub fn run_sensitivity(input_json: String) -> NapiResult<String> {
    let input: sensitivity::SensitivityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = sensitivity::run_sensitivity(&input).map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn format_currency(value: String) -> NapiResult<String> {
    let amount = Decimal::from_str(value.trim()).map_err(to_napi_error)?;
    Ok(format::format_currency(amount))
}

#[napi]
pub fn format_percent(value: String) -> NapiResult<String> {
    let percent = Decimal::from_str(value.trim()).map_err(to_napi_error)?;
    Ok(format::format_percent(percent))
}
