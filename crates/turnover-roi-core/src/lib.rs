pub mod analysis;
pub mod calculator;
pub mod error;
pub mod format;
pub mod inputs;
pub mod insights;
pub mod types;
pub mod validation;

#[cfg(feature = "report")]
pub mod report;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

pub use error::RoiError;
pub use types::*;

/// Standard result type for all turnover-roi operations
pub type RoiResult<T> = Result<T, RoiError>;
