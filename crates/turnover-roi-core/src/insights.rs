use rust_decimal::prelude::ToPrimitive;
use rust_decimal::RoundingStrategy;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculator::DerivedMetrics;
use crate::types::*;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

// Turnover rate, percent
const TURNOVER_ABOVE_AVERAGE: Percent = dec!(15);
const TURNOVER_AVERAGE: Percent = dec!(8);

// ROI, percent
const ROI_EXCELLENT: Percent = dec!(200);
const ROI_GOOD: Percent = dec!(100);
const ROI_POSITIVE: Percent = dec!(0);

// Payback, months
const PAYBACK_VERY_FAST: Months = dec!(6);
const PAYBACK_WITHIN_YEAR: Months = dec!(12);

// ---------------------------------------------------------------------------
// Classifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnoverTier {
    AboveAverage,
    Average,
    Low,
}

impl std::fmt::Display for TurnoverTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AboveAverage => write!(
                f,
                "Sua taxa de turnover está acima da média nacional (12%). Há potencial significativo de economia."
            ),
            Self::Average => write!(
                f,
                "Sua taxa de turnover está na média. O sistema pode ajudar a otimizar ainda mais."
            ),
            Self::Low => write!(
                f,
                "Excelente! Sua taxa de turnover está baixa. O sistema ajudará a manter essa performance."
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiTier {
    Excellent,
    Good,
    Positive,
    Negative,
}

impl std::fmt::Display for RoiTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(
                f,
                "ROI excelente! O investimento se paga rapidamente e gera economia substancial."
            ),
            Self::Good => write!(
                f,
                "Bom ROI. O sistema dobra o valor investido no primeiro ano."
            ),
            Self::Positive => write!(
                f,
                "ROI positivo. O sistema gera economia mesmo com taxa de turnover baixa."
            ),
            Self::Negative => write!(
                f,
                "Com a taxa atual de turnover, considere outros benefícios qualitativos do sistema."
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaybackTier {
    VeryFast,
    /// Rounded month count, 6..=12
    WithinYear { months: u32 },
}

impl std::fmt::Display for PaybackTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VeryFast => write!(
                f,
                "Payback muito rápido! O investimento se paga em menos de 6 meses."
            ),
            Self::WithinYear { months } => {
                write!(f, "Investimento se paga em {months} meses.")
            }
        }
    }
}

/// Largest component of the cost of one departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominantCost {
    Departure,
    Training,
    Recruitment,
}

impl std::fmt::Display for DominantCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Departure => write!(
                f,
                "O maior custo está na perda de produtividade. Focar na retenção é fundamental."
            ),
            Self::Training => write!(
                f,
                "Alto custo de treinamento. Melhorar o fit cultural pode reduzir significativamente os custos."
            ),
            Self::Recruitment => write!(
                f,
                "Alto custo de recrutamento. Automatizar processos pode gerar grande economia."
            ),
        }
    }
}

pub fn classify_turnover(turnover_rate_percent: Percent) -> TurnoverTier {
    if turnover_rate_percent > TURNOVER_ABOVE_AVERAGE {
        TurnoverTier::AboveAverage
    } else if turnover_rate_percent > TURNOVER_AVERAGE {
        TurnoverTier::Average
    } else {
        TurnoverTier::Low
    }
}

pub fn classify_roi(roi_percent: Percent) -> RoiTier {
    if roi_percent > ROI_EXCELLENT {
        RoiTier::Excellent
    } else if roi_percent > ROI_GOOD {
        RoiTier::Good
    } else if roi_percent > ROI_POSITIVE {
        RoiTier::Positive
    } else {
        RoiTier::Negative
    }
}

/// `None` when the system does not pay back within a year, or when there
/// are no savings at all. A negative payback (negative savings) falls in
/// the fastest tier, as any figure under six months does.
pub fn classify_payback(payback_months: Option<Months>) -> Option<PaybackTier> {
    let months = payback_months?;
    if months < PAYBACK_VERY_FAST {
        Some(PaybackTier::VeryFast)
    } else if months < PAYBACK_WITHIN_YEAR {
        // Half away from zero; months is at least 6 here so this is half-up.
        let rounded = months
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()?;
        Some(PaybackTier::WithinYear { months: rounded })
    } else {
        None
    }
}

/// Ties go to departure, then training, then recruitment.
pub fn dominant_cost(recruitment: Money, training: Money, departure: Money) -> DominantCost {
    let max = recruitment.max(training).max(departure);
    if max == departure {
        DominantCost::Departure
    } else if max == training {
        DominantCost::Training
    } else {
        DominantCost::Recruitment
    }
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    TurnoverRate,
    Roi,
    Payback,
    DominantCost,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub category: InsightCategory,
    pub message: String,
}

impl Insight {
    fn new(category: InsightCategory, message: impl std::fmt::Display) -> Self {
        Self {
            category,
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Turn a set of metrics into advisory texts.
///
/// Always three or four items, in order: turnover rate, ROI, payback (only
/// when under 12 months) and the dominant cost component.
pub fn generate_insights(metrics: &DerivedMetrics) -> Vec<Insight> {
    let mut insights = Vec::with_capacity(4);

    insights.push(Insight::new(
        InsightCategory::TurnoverRate,
        classify_turnover(metrics.turnover_rate_percent),
    ));

    insights.push(Insight::new(
        InsightCategory::Roi,
        classify_roi(metrics.roi_percent),
    ));

    if let Some(tier) = classify_payback(metrics.payback_months) {
        insights.push(Insight::new(InsightCategory::Payback, tier));
    }

    insights.push(Insight::new(
        InsightCategory::DominantCost,
        dominant_cost(
            metrics.recruitment_cost,
            metrics.training_cost,
            metrics.departure_cost,
        ),
    ));

    tracing::debug!(count = insights.len(), "insights generated");
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn metrics() -> DerivedMetrics {
        DerivedMetrics {
            turnover_rate_percent: dec!(10),
            recruitment_cost: dec!(2000),
            training_cost: dec!(6000),
            departure_cost: dec!(8350),
            cost_per_departure: dec!(16350),
            annual_turnover_cost: dec!(163500),
            annual_savings: dec!(49050),
            roi_percent: dec!(145.25),
            payback_months: Some(dec!(4.89)),
        }
    }

    #[test]
    fn test_turnover_boundaries() {
        assert_eq!(classify_turnover(dec!(15.0001)), TurnoverTier::AboveAverage);
        assert_eq!(classify_turnover(dec!(15.0)), TurnoverTier::Average);
        assert_eq!(classify_turnover(dec!(8.0001)), TurnoverTier::Average);
        assert_eq!(classify_turnover(dec!(8)), TurnoverTier::Low);
        assert_eq!(classify_turnover(Decimal::ZERO), TurnoverTier::Low);
    }

    #[test]
    fn test_roi_boundaries() {
        assert_eq!(classify_roi(dec!(200.01)), RoiTier::Excellent);
        assert_eq!(classify_roi(dec!(200)), RoiTier::Good);
        assert_eq!(classify_roi(dec!(100)), RoiTier::Positive);
        assert_eq!(classify_roi(dec!(0.01)), RoiTier::Positive);
        assert_eq!(classify_roi(Decimal::ZERO), RoiTier::Negative);
        assert_eq!(classify_roi(dec!(-100)), RoiTier::Negative);
    }

    #[test]
    fn test_payback_boundaries() {
        assert_eq!(classify_payback(Some(dec!(5.99))), Some(PaybackTier::VeryFast));
        assert_eq!(
            classify_payback(Some(dec!(6))),
            Some(PaybackTier::WithinYear { months: 6 })
        );
        assert_eq!(
            classify_payback(Some(dec!(8.5))),
            Some(PaybackTier::WithinYear { months: 9 })
        );
        assert_eq!(
            classify_payback(Some(dec!(11.6))),
            Some(PaybackTier::WithinYear { months: 12 })
        );
        assert_eq!(classify_payback(Some(dec!(12))), None);
        assert_eq!(classify_payback(None), None);
    }

    #[test]
    fn test_dominant_cost_tie_break() {
        let d = dec!(100);
        assert_eq!(dominant_cost(d, d, d), DominantCost::Departure);
        assert_eq!(dominant_cost(d, d, dec!(50)), DominantCost::Training);
        assert_eq!(dominant_cost(d, dec!(50), dec!(50)), DominantCost::Recruitment);
        assert_eq!(dominant_cost(dec!(50), d, d), DominantCost::Departure);
    }

    #[test]
    fn test_reference_insights() {
        let insights = generate_insights(&metrics());
        let categories: Vec<_> = insights.iter().map(|i| i.category).collect();
        assert_eq!(
            categories,
            vec![
                InsightCategory::TurnoverRate,
                InsightCategory::Roi,
                InsightCategory::Payback,
                InsightCategory::DominantCost,
            ]
        );
        assert_eq!(insights[0].message, TurnoverTier::Average.to_string());
        assert_eq!(insights[1].message, RoiTier::Good.to_string());
        assert_eq!(insights[2].message, PaybackTier::VeryFast.to_string());
        assert_eq!(insights[3].message, DominantCost::Departure.to_string());
    }

    #[test]
    fn test_payback_insight_omitted_after_a_year() {
        let mut m = metrics();
        m.payback_months = Some(dec!(12));
        let insights = generate_insights(&m);
        assert_eq!(insights.len(), 3);
        assert!(insights.iter().all(|i| i.category != InsightCategory::Payback));
    }

    #[test]
    fn test_negative_payback_is_very_fast() {
        assert_eq!(classify_payback(Some(dec!(-14.68))), Some(PaybackTier::VeryFast));

        let mut m = metrics();
        m.annual_savings = dec!(-16350);
        m.roi_percent = dec!(-181.75);
        m.payback_months = Some(dec!(-14.68));
        let insights = generate_insights(&m);
        assert_eq!(insights.len(), 4);
        assert_eq!(insights[1].message, RoiTier::Negative.to_string());
        assert_eq!(insights[2].message, PaybackTier::VeryFast.to_string());
    }

    #[test]
    fn test_within_year_message_has_rounded_months() {
        assert_eq!(
            PaybackTier::WithinYear { months: 9 }.to_string(),
            "Investimento se paga em 9 meses."
        );
    }
}
