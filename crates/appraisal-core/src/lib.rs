pub mod appraisal;
pub mod error;
pub mod time_value;
pub mod types;

pub use error::AppraisalError;
pub use types::*;

/// Standard result type for all appraisal operations
pub type AppraisalResult<T> = Result<T, AppraisalError>;
