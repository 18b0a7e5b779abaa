use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoiError {
    #[error("Missing or negative value: {field} must be filled in with a number >= 0")]
    MissingOrNegativeField { field: String },

    #[error("The number of departures ({departures}) cannot exceed the total number of employees ({employees})")]
    DeparturesExceedEmployees {
        departures: Decimal,
        employees: Decimal,
    },

    #[error("Division by zero: {field} must be greater than zero")]
    ZeroDenominator { field: String },

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl RoiError {
    /// True for errors the user can fix by correcting a form field.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingOrNegativeField { .. }
                | Self::DeparturesExceedEmployees { .. }
                | Self::ZeroDenominator { .. }
                | Self::InvalidInput { .. }
        )
    }

    /// The input field a form should return focus to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingOrNegativeField { field }
            | Self::ZeroDenominator { field }
            | Self::InvalidInput { field, .. } => Some(field),
            Self::DeparturesExceedEmployees { .. } => Some("total_departures"),
            Self::ArithmeticOverflow { .. } | Self::SerializationError(_) => None,
        }
    }
}

impl From<serde_json::Error> for RoiError {
    fn from(e: serde_json::Error) -> Self {
        RoiError::SerializationError(e.to_string())
    }
}
