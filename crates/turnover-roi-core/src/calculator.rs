use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::inputs::ValidInputs;
use crate::{types::*, RoiError, RoiResult};

const HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Everything derived from one set of validated inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Departures as a percentage of headcount
    pub turnover_rate_percent: Percent,
    /// HR time spent replacing one employee
    pub recruitment_cost: Money,
    /// Manager time spent onboarding one replacement
    pub training_cost: Money,
    /// Salary times overhead multiplier (charges, severance, lost productivity)
    pub departure_cost: Money,
    pub cost_per_departure: Money,
    pub annual_turnover_cost: Money,
    pub annual_savings: Money,
    pub roi_percent: Percent,
    /// `None` when projected savings are zero. Negative savings give a
    /// negative figure, kept as is.
    pub payback_months: Option<Months>,
}

/// Derive turnover cost, projected savings, ROI and payback.
///
/// The validator guarantees both divisors (employees, system cost) are
/// non-zero. The only failure left is overflow on absurdly large inputs.
pub fn calculate(valid: &ValidInputs) -> RoiResult<DerivedMetrics> {
    let p = valid.parameters();

    let turnover_rate_percent = mul(
        div(
            valid.total_departures(),
            valid.total_employees(),
            "turnover_rate_percent",
        )?,
        HUNDRED,
        "turnover_rate_percent",
    )?;

    let recruitment_cost = mul(p.recruitment_hours, p.hr_hourly_cost, "recruitment_cost")?;
    let training_cost = mul(p.training_hours, p.manager_hourly_cost, "training_cost")?;
    let departure_cost = mul(
        valid.monthly_salary(),
        p.overhead_multiplier,
        "departure_cost",
    )?;

    let cost_per_departure = add(
        add(recruitment_cost, training_cost, "cost_per_departure")?,
        departure_cost,
        "cost_per_departure",
    )?;

    let annual_turnover_cost = mul(
        cost_per_departure,
        valid.total_departures(),
        "annual_turnover_cost",
    )?;

    let annual_savings = mul(
        annual_turnover_cost,
        div(p.turnover_reduction_percent, HUNDRED, "annual_savings")?,
        "annual_savings",
    )?;

    let system_cost = valid.system_cost();
    let roi_percent = mul(
        div(
            sub(annual_savings, system_cost, "roi_percent")?,
            system_cost,
            "roi_percent",
        )?,
        HUNDRED,
        "roi_percent",
    )?;

    let payback_months = if annual_savings.is_zero() {
        None
    } else {
        let monthly_savings = div(annual_savings, MONTHS_PER_YEAR, "payback_months")?;
        Some(div(system_cost, monthly_savings, "payback_months")?)
    };

    let metrics = DerivedMetrics {
        turnover_rate_percent,
        recruitment_cost,
        training_cost,
        departure_cost,
        cost_per_departure,
        annual_turnover_cost,
        annual_savings,
        roi_percent,
        payback_months,
    };
    tracing::debug!(?metrics, "metrics calculated");
    Ok(metrics)
}

// ---------------------------------------------------------------------------
// Checked arithmetic
// ---------------------------------------------------------------------------

fn overflow(context: &str) -> RoiError {
    RoiError::ArithmeticOverflow {
        context: context.to_string(),
    }
}

fn add(a: Decimal, b: Decimal, context: &str) -> RoiResult<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(context))
}

fn sub(a: Decimal, b: Decimal, context: &str) -> RoiResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(context))
}

fn mul(a: Decimal, b: Decimal, context: &str) -> RoiResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(context))
}

fn div(a: Decimal, b: Decimal, context: &str) -> RoiResult<Decimal> {
    if b.is_zero() {
        return Err(RoiError::ZeroDenominator {
            field: context.to_string(),
        });
    }
    a.checked_div(b).ok_or_else(|| overflow(context))
}
