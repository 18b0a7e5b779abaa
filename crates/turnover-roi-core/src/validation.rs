use rust_decimal::Decimal;

use crate::inputs::{InputField, RawInputs, ValidInputs};
use crate::{RoiError, RoiResult};

/// Check a set of form values and hand back the parsed numbers unchanged.
///
/// Order of checks (first failure wins):
/// 1. each required field, in form order, must be present and `>= 0`
/// 2. departures must not exceed employees
/// 3. employees and system cost must be non-zero, since both are divisors
pub fn validate(raw: &RawInputs) -> RoiResult<ValidInputs> {
    let monthly_salary = required(raw, InputField::MonthlySalary)?;
    let total_employees = required(raw, InputField::TotalEmployees)?;
    let total_departures = required(raw, InputField::TotalDepartures)?;
    let system_cost = required(raw, InputField::SystemCost)?;

    if total_departures > total_employees {
        return Err(RoiError::DeparturesExceedEmployees {
            departures: total_departures,
            employees: total_employees,
        });
    }

    non_zero(total_employees, InputField::TotalEmployees)?;
    non_zero(system_cost, InputField::SystemCost)?;

    tracing::debug!(
        %monthly_salary,
        %total_employees,
        %total_departures,
        %system_cost,
        "inputs validated"
    );

    Ok(ValidInputs {
        monthly_salary,
        total_employees,
        total_departures,
        system_cost,
        parameters: raw.parameters.clone(),
    })
}

fn required(raw: &RawInputs, field: InputField) -> RoiResult<Decimal> {
    match raw.get(field) {
        Some(value) if value >= Decimal::ZERO => Ok(value),
        _ => Err(RoiError::MissingOrNegativeField {
            field: field.key().to_string(),
        }),
    }
}

fn non_zero(value: Decimal, field: InputField) -> RoiResult<()> {
    if value.is_zero() {
        return Err(RoiError::ZeroDenominator {
            field: field.key().to_string(),
        });
    }
    Ok(())
}
