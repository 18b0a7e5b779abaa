use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::{types::*, RoiError, RoiResult};

// ---------------------------------------------------------------------------
// Form defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_OVERHEAD_MULTIPLIER: Decimal = dec!(1.67);
pub const DEFAULT_HR_HOURLY_COST: Money = dec!(100);
pub const DEFAULT_MANAGER_HOURLY_COST: Money = dec!(150);
pub const DEFAULT_RECRUITMENT_HOURS: Hours = dec!(20);
pub const DEFAULT_TRAINING_HOURS: Hours = dec!(40);
pub const DEFAULT_TURNOVER_REDUCTION_PERCENT: Percent = dec!(30);

// ---------------------------------------------------------------------------
// Field catalogue
// ---------------------------------------------------------------------------

/// Every field on the calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    MonthlySalary,
    TotalEmployees,
    TotalDepartures,
    SystemCost,
    OverheadMultiplier,
    HrHourlyCost,
    ManagerHourlyCost,
    RecruitmentHours,
    TrainingHours,
    TurnoverReductionPercent,
}

impl InputField {
    /// Fields that must be present and non-negative, in validation order.
    pub const REQUIRED: [InputField; 4] = [
        Self::MonthlySalary,
        Self::TotalEmployees,
        Self::TotalDepartures,
        Self::SystemCost,
    ];

    pub const ALL: [InputField; 10] = [
        Self::MonthlySalary,
        Self::TotalEmployees,
        Self::TotalDepartures,
        Self::SystemCost,
        Self::OverheadMultiplier,
        Self::HrHourlyCost,
        Self::ManagerHourlyCost,
        Self::RecruitmentHours,
        Self::TrainingHours,
        Self::TurnoverReductionPercent,
    ];

    /// snake_case key used in JSON input and field maps.
    pub fn key(&self) -> &'static str {
        match self {
            Self::MonthlySalary => "monthly_salary",
            Self::TotalEmployees => "total_employees",
            Self::TotalDepartures => "total_departures",
            Self::SystemCost => "system_cost",
            Self::OverheadMultiplier => "overhead_multiplier",
            Self::HrHourlyCost => "hr_hourly_cost",
            Self::ManagerHourlyCost => "manager_hourly_cost",
            Self::RecruitmentHours => "recruitment_hours",
            Self::TrainingHours => "training_hours",
            Self::TurnoverReductionPercent => "turnover_reduction_percent",
        }
    }

    /// Human-readable form label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MonthlySalary => "Average monthly salary",
            Self::TotalEmployees => "Total employees",
            Self::TotalDepartures => "Departures in the last 12 months",
            Self::SystemCost => "Annual system cost",
            Self::OverheadMultiplier => "Payroll overhead multiplier",
            Self::HrHourlyCost => "HR hourly cost",
            Self::ManagerHourlyCost => "Manager hourly cost",
            Self::RecruitmentHours => "Recruitment hours per hire",
            Self::TrainingHours => "Training hours per hire",
            Self::TurnoverReductionPercent => "Expected turnover reduction (%)",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    pub fn from_key(key: &str) -> Option<InputField> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ---------------------------------------------------------------------------
// Raw inputs
// ---------------------------------------------------------------------------

/// Cost assumptions behind the per-departure cost. Missing values fall back
/// to the form defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostParameters {
    /// Salary multiplier covering payroll charges, severance and lost productivity
    pub overhead_multiplier: Decimal,
    pub hr_hourly_cost: Money,
    pub manager_hourly_cost: Money,
    pub recruitment_hours: Hours,
    pub training_hours: Hours,
    /// Expected reduction in turnover cost once the system is in place
    pub turnover_reduction_percent: Percent,
}

impl Default for CostParameters {
    fn default() -> Self {
        Self {
            overhead_multiplier: DEFAULT_OVERHEAD_MULTIPLIER,
            hr_hourly_cost: DEFAULT_HR_HOURLY_COST,
            manager_hourly_cost: DEFAULT_MANAGER_HOURLY_COST,
            recruitment_hours: DEFAULT_RECRUITMENT_HOURS,
            training_hours: DEFAULT_TRAINING_HOURS,
            turnover_reduction_percent: DEFAULT_TURNOVER_REDUCTION_PERCENT,
        }
    }
}

/// Form values as entered. Required fields are optional here so that an
/// empty field can reach the validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_salary: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_employees: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_departures: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_cost: Option<Money>,
    #[serde(flatten)]
    pub parameters: CostParameters,
}

impl RawInputs {
    /// Inputs with the four required fields filled and default parameters.
    pub fn new(
        monthly_salary: Money,
        total_employees: Decimal,
        total_departures: Decimal,
        system_cost: Money,
    ) -> Self {
        Self {
            monthly_salary: Some(monthly_salary),
            total_employees: Some(total_employees),
            total_departures: Some(total_departures),
            system_cost: Some(system_cost),
            parameters: CostParameters::default(),
        }
    }

    pub fn get(&self, field: InputField) -> Option<Decimal> {
        let p = &self.parameters;
        match field {
            InputField::MonthlySalary => self.monthly_salary,
            InputField::TotalEmployees => self.total_employees,
            InputField::TotalDepartures => self.total_departures,
            InputField::SystemCost => self.system_cost,
            InputField::OverheadMultiplier => Some(p.overhead_multiplier),
            InputField::HrHourlyCost => Some(p.hr_hourly_cost),
            InputField::ManagerHourlyCost => Some(p.manager_hourly_cost),
            InputField::RecruitmentHours => Some(p.recruitment_hours),
            InputField::TrainingHours => Some(p.training_hours),
            InputField::TurnoverReductionPercent => Some(p.turnover_reduction_percent),
        }
    }

    pub fn set(&mut self, field: InputField, value: Decimal) {
        let p = &mut self.parameters;
        match field {
            InputField::MonthlySalary => self.monthly_salary = Some(value),
            InputField::TotalEmployees => self.total_employees = Some(value),
            InputField::TotalDepartures => self.total_departures = Some(value),
            InputField::SystemCost => self.system_cost = Some(value),
            InputField::OverheadMultiplier => p.overhead_multiplier = value,
            InputField::HrHourlyCost => p.hr_hourly_cost = value,
            InputField::ManagerHourlyCost => p.manager_hourly_cost = value,
            InputField::RecruitmentHours => p.recruitment_hours = value,
            InputField::TrainingHours => p.training_hours = value,
            InputField::TurnoverReductionPercent => p.turnover_reduction_percent = value,
        }
    }

    /// Build inputs from a flat field-name -> text mapping, as collected
    /// from a form.
    ///
    /// Blank or non-numeric required fields are left empty so the validator
    /// reports them. A cost parameter that is present but not a number is
    /// rejected here; a blank one keeps its default. Unknown keys are ignored.
    pub fn from_fields(fields: &BTreeMap<String, String>) -> RoiResult<Self> {
        Self::from_fields_with_defaults(fields, CostParameters::default())
    }

    /// Same as [`RawInputs::from_fields`], starting from the given parameters.
    pub fn from_fields_with_defaults(
        fields: &BTreeMap<String, String>,
        defaults: CostParameters,
    ) -> RoiResult<Self> {
        let mut raw = RawInputs {
            parameters: defaults,
            ..Default::default()
        };

        for (key, text) in fields {
            let Some(field) = InputField::from_key(key) else {
                continue;
            };
            match parse_number(text) {
                Ok(Some(value)) => raw.set(field, value),
                Ok(None) => {}
                Err(_) if field.is_required() => {}
                Err(reason) => {
                    return Err(RoiError::InvalidInput {
                        field: field.key().to_string(),
                        reason,
                    })
                }
            }
        }

        Ok(raw)
    }
}

/// Parse a form value. `Ok(None)` for blank text.
pub fn parse_number(text: &str) -> Result<Option<Decimal>, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map(Some)
        .map_err(|_| format!("'{trimmed}' is not a number"))
}

// ---------------------------------------------------------------------------
// Validated inputs
// ---------------------------------------------------------------------------

/// Inputs that passed validation. Only [`crate::validation::validate`]
/// constructs this type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidInputs {
    pub(crate) monthly_salary: Money,
    pub(crate) total_employees: Decimal,
    pub(crate) total_departures: Decimal,
    pub(crate) system_cost: Money,
    pub(crate) parameters: CostParameters,
}

impl ValidInputs {
    pub fn monthly_salary(&self) -> Money {
        self.monthly_salary
    }

    pub fn total_employees(&self) -> Decimal {
        self.total_employees
    }

    pub fn total_departures(&self) -> Decimal {
        self.total_departures
    }

    pub fn system_cost(&self) -> Money {
        self.system_cost
    }

    pub fn parameters(&self) -> &CostParameters {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_match_form() {
        let p = CostParameters::default();
        assert_eq!(p.overhead_multiplier, dec!(1.67));
        assert_eq!(p.hr_hourly_cost, dec!(100));
        assert_eq!(p.manager_hourly_cost, dec!(150));
        assert_eq!(p.recruitment_hours, dec!(20));
        assert_eq!(p.training_hours, dec!(40));
        assert_eq!(p.turnover_reduction_percent, dec!(30));
    }

    #[test]
    fn test_from_fields_parses_values() {
        let raw = RawInputs::from_fields(&fields(&[
            ("monthly_salary", "5000"),
            ("total_employees", " 100 "),
            ("total_departures", "10"),
            ("system_cost", "20000"),
            ("overhead_multiplier", "1.8"),
            ("unknown_key", "whatever"),
        ]))
        .unwrap();

        assert_eq!(raw.monthly_salary, Some(dec!(5000)));
        assert_eq!(raw.total_employees, Some(dec!(100)));
        assert_eq!(raw.parameters.overhead_multiplier, dec!(1.8));
        // untouched parameters keep their defaults
        assert_eq!(raw.parameters.training_hours, dec!(40));
    }

    #[test]
    fn test_from_fields_blank_and_garbage_required_are_absent() {
        let raw = RawInputs::from_fields(&fields(&[
            ("monthly_salary", ""),
            ("total_employees", "abc"),
        ]))
        .unwrap();
        assert_eq!(raw.monthly_salary, None);
        assert_eq!(raw.total_employees, None);
    }

    #[test]
    fn test_from_fields_rejects_garbage_parameter() {
        let err = RawInputs::from_fields(&fields(&[("hr_hourly_cost", "cem")])).unwrap_err();
        match err {
            RoiError::InvalidInput { field, .. } => assert_eq!(field, "hr_hourly_cost"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_number_scientific() {
        assert_eq!(parse_number("2e3").unwrap(), Some(dec!(2000)));
        assert_eq!(parse_number("   ").unwrap(), None);
        assert!(parse_number("1,5").is_err());
    }

    #[test]
    fn test_json_without_parameters_uses_defaults() {
        let raw: RawInputs = serde_json::from_str(
            r#"{"monthly_salary": 5000, "total_employees": 100, "total_departures": 10, "system_cost": "20000"}"#,
        )
        .unwrap();
        assert_eq!(raw.system_cost, Some(dec!(20000)));
        assert_eq!(raw.parameters, CostParameters::default());
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in InputField::ALL {
            assert_eq!(InputField::from_key(field.key()), Some(field));
        }
        assert_eq!(InputField::from_key("salary"), None);
    }
}
