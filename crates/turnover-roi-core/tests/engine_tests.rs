use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use turnover_roi_core::calculator::{self, DerivedMetrics};
use turnover_roi_core::inputs::{InputField, RawInputs};
use turnover_roi_core::insights::{self, DominantCost, InsightCategory, RoiTier, TurnoverTier};
use turnover_roi_core::validation;
use turnover_roi_core::RoiError;

fn reference_inputs() -> RawInputs {
    // Form defaults: overhead 1.67, HR 100/h, manager 150/h, 20h + 40h, 30%
    RawInputs::new(dec!(5000), dec!(100), dec!(10), dec!(20000))
}

fn metrics_for(raw: &RawInputs) -> DerivedMetrics {
    let valid = validation::validate(raw).unwrap();
    calculator::calculate(&valid).unwrap()
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_every_required_field_rejects_empty_and_negative() {
    for field in InputField::REQUIRED {
        for bad in [None, Some(dec!(-1)), Some(dec!(-0.01))] {
            let mut raw = reference_inputs();
            match bad {
                Some(v) => raw.set(field, v),
                None => match field {
                    InputField::MonthlySalary => raw.monthly_salary = None,
                    InputField::TotalEmployees => raw.total_employees = None,
                    InputField::TotalDepartures => raw.total_departures = None,
                    InputField::SystemCost => raw.system_cost = None,
                    _ => unreachable!(),
                },
            }

            match validation::validate(&raw).unwrap_err() {
                RoiError::MissingOrNegativeField { field: reported } => {
                    assert_eq!(reported, field.key())
                }
                other => panic!("Expected MissingOrNegativeField for {field}, got {other:?}"),
            }
        }
    }
}

#[test]
fn test_departures_above_employees_always_rejected() {
    let salaries = [dec!(0), dec!(1500), dec!(90000)];
    let costs = [dec!(0), dec!(1), dec!(1_000_000)];

    for salary in salaries {
        for cost in costs {
            let mut raw = RawInputs::new(salary, dec!(50), dec!(50.5), cost);
            raw.parameters.turnover_reduction_percent = dec!(-5);
            assert!(
                matches!(
                    validation::validate(&raw).unwrap_err(),
                    RoiError::DeparturesExceedEmployees { .. }
                ),
                "salary={salary} cost={cost}"
            );
        }
    }
}

#[test]
fn test_zero_headcount_is_rejected_not_infinite() {
    let raw = RawInputs::new(dec!(5000), Decimal::ZERO, Decimal::ZERO, dec!(20000));
    let err = validation::validate(&raw).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.field(), Some("total_employees"));
}

#[test]
fn test_form_field_map_end_to_end() {
    let fields: BTreeMap<String, String> = [
        ("monthly_salary", "5000"),
        ("total_employees", "100"),
        ("total_departures", "10"),
        ("system_cost", ""),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let raw = RawInputs::from_fields(&fields).unwrap();
    let err = validation::validate(&raw).unwrap_err();
    assert_eq!(err.field(), Some("system_cost"));
}

// ===========================================================================
// Calculator
// ===========================================================================

#[test]
fn test_reference_scenario_metrics() {
    let m = metrics_for(&reference_inputs());

    assert_eq!(m.turnover_rate_percent, dec!(10));
    assert_eq!(m.recruitment_cost, dec!(2000));
    assert_eq!(m.training_cost, dec!(6000));
    assert_eq!(m.departure_cost, dec!(8350));
    assert_eq!(m.cost_per_departure, dec!(16350));
    assert_eq!(m.annual_turnover_cost, dec!(163500));
    assert_eq!(m.annual_savings, dec!(49050));
    assert_eq!(m.roi_percent, dec!(145.25));
    assert_eq!(m.payback_months.unwrap().round_dp(2), dec!(4.89));
}

#[test]
fn test_calculation_is_deterministic() {
    let raw = reference_inputs();
    let first = metrics_for(&raw);
    let second = metrics_for(&raw);
    assert_eq!(first, second);
}

#[test]
fn test_annual_cost_monotonic_in_departures() {
    let mut previous = Decimal::MIN;
    for departures in 0..=100 {
        let mut raw = reference_inputs();
        raw.total_departures = Some(Decimal::from(departures));
        let m = metrics_for(&raw);
        assert!(
            m.annual_turnover_cost >= previous,
            "annual cost fell at {departures} departures"
        );
        previous = m.annual_turnover_cost;
    }
}

// ===========================================================================
// Insights
// ===========================================================================

#[test]
fn test_reference_scenario_insights() {
    let m = metrics_for(&reference_inputs());
    let messages: Vec<String> = insights::generate_insights(&m)
        .into_iter()
        .map(|i| i.message)
        .collect();

    assert_eq!(
        messages,
        vec![
            TurnoverTier::Average.to_string(),
            RoiTier::Good.to_string(),
            "Payback muito rápido! O investimento se paga em menos de 6 meses.".to_string(),
            DominantCost::Departure.to_string(),
        ]
    );
}

#[test]
fn test_insight_count_tracks_payback() {
    // Departures 0..=100 cover payback from "never" down to well under 6 months.
    for departures in 0..=100 {
        let mut raw = reference_inputs();
        raw.total_departures = Some(Decimal::from(departures));
        let m = metrics_for(&raw);
        let list = insights::generate_insights(&m);

        let fast = m.payback_months.is_some_and(|p| p < dec!(12));
        assert_eq!(list.len(), if fast { 4 } else { 3 }, "departures={departures}");
        assert_eq!(list[0].category, InsightCategory::TurnoverRate);
        assert_eq!(list[1].category, InsightCategory::Roi);
        assert_eq!(list.last().unwrap().category, InsightCategory::DominantCost);
    }
}

#[test]
fn test_negative_reduction_keeps_four_insights() {
    let mut raw = reference_inputs();
    raw.parameters.turnover_reduction_percent = dec!(-10);
    let m = metrics_for(&raw);

    assert_eq!(m.annual_savings, dec!(-16350));
    assert_eq!(m.payback_months.unwrap().round_dp(2), dec!(-14.68));

    let list = insights::generate_insights(&m);
    assert_eq!(list.len(), 4);
    assert_eq!(list[1].message, RoiTier::Negative.to_string());
    assert_eq!(list[2].category, InsightCategory::Payback);
}

#[test]
fn test_fifteen_percent_turnover_is_average() {
    let raw = RawInputs::new(dec!(5000), dec!(100), dec!(15), dec!(20000));
    let m = metrics_for(&raw);
    assert_eq!(m.turnover_rate_percent, dec!(15));
    assert_eq!(
        insights::classify_turnover(m.turnover_rate_percent),
        TurnoverTier::Average
    );
}

#[test]
fn test_training_dominant_when_salary_is_low() {
    let raw = RawInputs::new(dec!(1000), dec!(100), dec!(10), dec!(20000));
    let m = metrics_for(&raw);
    // departure 1,670 < training 6,000
    let list = insights::generate_insights(&m);
    assert_eq!(list.last().unwrap().message, DominantCost::Training.to_string());
}

#[test]
fn test_recruitment_dominant() {
    let mut raw = RawInputs::new(dec!(1000), dec!(100), dec!(10), dec!(20000));
    raw.parameters.recruitment_hours = dec!(100);
    let m = metrics_for(&raw);
    // recruitment 10,000 > training 6,000 > departure 1,670
    assert_eq!(
        insights::dominant_cost(m.recruitment_cost, m.training_cost, m.departure_cost),
        DominantCost::Recruitment
    );
}
