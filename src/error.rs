use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AmortizationError {
    #[error("invalid argument `{parameter}`: {reason}")]
    InvalidArgument {
        parameter: &'static str,
        reason: String,
    },
}

impl AmortizationError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        AmortizationError::InvalidArgument {
            parameter,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AmortizationError>;
