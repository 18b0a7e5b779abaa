use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::calculator;
use crate::inputs::{InputField, RawInputs};
use crate::insights::{self, RoiTier};
use crate::validation;
use crate::{types::*, RoiError, RoiResult};

const MAX_POINTS: usize = 1_000;

/// A single form field swept from `min` to `max`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepVariable {
    pub field: InputField,
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityInput {
    pub base: RawInputs,
    pub variable: SweepVariable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub value: Decimal,
    pub annual_savings: Money,
    pub roi_percent: Percent,
    pub payback_months: Option<Months>,
    pub roi_tier: RoiTier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityOutput {
    pub field: InputField,
    pub points: Vec<SensitivityPoint>,
    /// First swept value at which ROI turns positive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_even_value: Option<Decimal>,
}

/// Recalculate ROI while one field moves across a range, all else fixed.
///
/// Every point goes through the validator, so a sweep that produces an
/// invalid combination (e.g. departures above headcount) fails as a whole.
pub fn run_sensitivity(
    input: &SensitivityInput,
) -> RoiResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    let values = generate_sweep_values(&input.variable)?;
    let mut points = Vec::with_capacity(values.len());

    for value in values {
        let mut raw = input.base.clone();
        raw.set(input.variable.field, value);

        let valid = validation::validate(&raw)?;
        let metrics = calculator::calculate(&valid)?;

        points.push(SensitivityPoint {
            value,
            annual_savings: metrics.annual_savings,
            roi_percent: metrics.roi_percent,
            payback_months: metrics.payback_months,
            roi_tier: insights::classify_roi(metrics.roi_percent),
        });
    }

    let break_even_value = points
        .iter()
        .find(|p| p.roi_percent > Decimal::ZERO)
        .map(|p| p.value);

    let output = SensitivityOutput {
        field: input.variable.field,
        points,
        break_even_value,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "field": input.variable.field.key(),
        "min": input.variable.min.to_string(),
        "max": input.variable.max.to_string(),
        "step": input.variable.step.to_string(),
    });

    Ok(with_metadata(
        "One-way ROI sensitivity",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// Values from min to max by step; max is always included.
fn generate_sweep_values(var: &SweepVariable) -> RoiResult<Vec<Decimal>> {
    let field = format!("variable:{}", var.field);
    if var.step <= Decimal::ZERO {
        return Err(RoiError::InvalidInput {
            field,
            reason: "Step must be positive".into(),
        });
    }
    if var.min > var.max {
        return Err(RoiError::InvalidInput {
            field,
            reason: "Min must be <= max".into(),
        });
    }

    let mut values = Vec::new();
    let mut current = var.min;
    while current <= var.max {
        values.push(current);
        if values.len() > MAX_POINTS {
            break;
        }
        current = current
            .checked_add(var.step)
            .ok_or_else(|| RoiError::ArithmeticOverflow {
                context: "sweep".into(),
            })?;
    }
    if let Some(&last) = values.last() {
        if last < var.max {
            values.push(var.max);
        }
    }

    // The trailing max counts towards the cap.
    if values.len() > MAX_POINTS {
        return Err(RoiError::InvalidInput {
            field,
            reason: format!("Sweep exceeds {MAX_POINTS} points"),
        });
    }

    Ok(values)
}
