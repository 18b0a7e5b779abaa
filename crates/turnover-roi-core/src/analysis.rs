use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::time::Instant;

use crate::calculator::{self, DerivedMetrics};
use crate::inputs::{RawInputs, ValidInputs};
use crate::insights::{self, Insight, RoiTier};
use crate::validation;
use crate::{types::*, RoiResult};

/// One complete calculation: the accepted inputs, what was derived from
/// them and the advice shown alongside.
#[derive(Debug, Clone, Serialize)]
pub struct RoiAnalysis {
    pub inputs: ValidInputs,
    pub metrics: DerivedMetrics,
    pub roi_tier: RoiTier,
    pub insights: Vec<Insight>,
}

/// Validate, calculate and generate insights in one go.
///
/// Validation failures abort before anything is calculated.
pub fn analyze(raw: &RawInputs) -> RoiResult<ComputationOutput<RoiAnalysis>> {
    let start = Instant::now();

    let valid = validation::validate(raw)?;
    let metrics = calculator::calculate(&valid)?;
    let insights = insights::generate_insights(&metrics);
    let roi_tier = insights::classify_roi(metrics.roi_percent);
    let warnings = collect_warnings(&valid, &metrics);

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "turnover_rate": "departures / employees * 100",
        "cost_per_departure": "recruitment_hours * hr_hourly_cost + training_hours * manager_hourly_cost + monthly_salary * overhead_multiplier",
        "annual_savings": "cost_per_departure * departures * turnover_reduction_percent / 100",
        "roi": "(annual_savings - system_cost) / system_cost * 100",
        "payback": "system_cost / (annual_savings / 12)",
        "parameters": valid.parameters(),
    });

    tracing::debug!(
        roi_percent = %metrics.roi_percent,
        tier = ?roi_tier,
        elapsed_us = elapsed,
        "analysis complete"
    );

    Ok(with_metadata(
        "HR turnover cost and system ROI",
        &assumptions,
        warnings,
        elapsed,
        RoiAnalysis {
            inputs: valid,
            metrics,
            roi_tier,
            insights,
        },
    ))
}

fn collect_warnings(valid: &ValidInputs, metrics: &DerivedMetrics) -> Vec<String> {
    let mut warnings = Vec::new();

    if valid.parameters().turnover_reduction_percent > dec!(100) {
        warnings.push(
            "turnover_reduction_percent exceeds 100%; projected savings exceed the total turnover cost."
                .to_string(),
        );
    }

    match metrics.payback_months {
        None => warnings.push(
            "Projected annual savings are zero; the system never pays back.".to_string(),
        ),
        Some(_) if metrics.annual_savings < Decimal::ZERO => warnings.push(
            "Projected annual savings are negative; the payback figure is negative and the system never pays back."
                .to_string(),
        ),
        Some(months) if months >= dec!(12) => warnings.push(format!(
            "Payback takes {} months, beyond the first year.",
            months.round_dp(1)
        )),
        Some(_) => {}
    }

    warnings
}
