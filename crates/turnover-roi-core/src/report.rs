use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analysis::RoiAnalysis;
use crate::calculator::DerivedMetrics;
use crate::format::{format_currency, format_date, format_decimal, format_percent};
use crate::insights::RoiTier;
use crate::types::*;

const CHECK_MARK: &str = "✓";
const WARNING_MARK: &str = "⚠️";

/// Background band for the ROI highlight card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub tier: RoiTier,
    pub gradient: String,
}

impl From<RoiTier> for Highlight {
    fn from(tier: RoiTier) -> Self {
        let gradient = match tier {
            RoiTier::Excellent => "linear-gradient(135deg, #28a745 0%, #20c997 100%)",
            RoiTier::Good => "linear-gradient(135deg, #17a2b8 0%, #138496 100%)",
            RoiTier::Positive => "linear-gradient(135deg, #ffc107 0%, #e0a800 100%)",
            RoiTier::Negative => "linear-gradient(135deg, #dc3545 0%, #c82333 100%)",
        };
        Self {
            tier,
            gradient: gradient.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightLine {
    pub marker: String,
    pub text: String,
}

/// Results card, every figure already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiReport {
    pub turnover_rate: String,
    pub cost_per_departure: String,
    pub annual_turnover_cost: String,
    pub annual_savings: String,
    pub roi: String,
    pub payback: String,
    pub highlight: Highlight,
    pub insights: Vec<InsightLine>,
}

pub fn build_report(analysis: &RoiAnalysis) -> RoiReport {
    let m = &analysis.metrics;
    let last = analysis.insights.len().saturating_sub(1);

    let insights = analysis
        .insights
        .iter()
        .enumerate()
        .map(|(i, insight)| InsightLine {
            marker: if i == last { WARNING_MARK } else { CHECK_MARK }.to_string(),
            text: insight.message.clone(),
        })
        .collect();

    RoiReport {
        turnover_rate: format_percent(m.turnover_rate_percent),
        cost_per_departure: format_currency(m.cost_per_departure),
        annual_turnover_cost: format_currency(m.annual_turnover_cost),
        annual_savings: format_currency(m.annual_savings),
        roi: format_percent(m.roi_percent),
        payback: format_payback(m.payback_months),
        highlight: Highlight::from(analysis.roi_tier),
        insights,
    }
}

const NEVER_PAYS_BACK: &str = "não se paga";

/// Zero or negative savings both read as "never"; the raw figure stays in
/// the metrics and the export record.
fn format_payback(payback_months: Option<Months>) -> String {
    match payback_months {
        Some(months) if months > Decimal::ZERO => {
            format!("{} meses", format_decimal(months, 1))
        }
        _ => NEVER_PAYS_BACK.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Shareable snapshot of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub calculated_on: NaiveDate,
    /// `dd/mm/yyyy`
    pub calculated_on_display: String,
    pub turnover_rate_percent: Percent,
    pub cost_per_departure: Money,
    pub annual_turnover_cost: Money,
    pub annual_savings: Money,
    pub roi_percent: Percent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_months: Option<Months>,
}

pub fn export_record(metrics: &DerivedMetrics, calculated_on: NaiveDate) -> ExportRecord {
    ExportRecord {
        calculated_on,
        calculated_on_display: format_date(calculated_on),
        turnover_rate_percent: metrics.turnover_rate_percent,
        cost_per_departure: metrics.cost_per_departure,
        annual_turnover_cost: metrics.annual_turnover_cost,
        annual_savings: metrics.annual_savings,
        roi_percent: metrics.roi_percent,
        payback_months: metrics.payback_months,
    }
}
