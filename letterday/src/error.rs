use jiff::civil::Date;

use crate::order::Period;

/// All errors produced by letterday.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RotationError {
    /// A rotation label outside `A..G` was requested.
    #[error("unknown letter day '{0}', expected one of A-G")]
    UnknownLabel(String),

    /// A lunch option that no division recognizes.
    #[error("unknown lunch option '{0}', expected first, second, grade6, grade7 or grade8")]
    UnknownLunchOption(String),

    /// A division name other than upper or middle.
    #[error("unknown division '{0}', expected upper or middle")]
    UnknownDivision(String),

    /// A period number outside `[1, 7]`.
    #[error("period must be between 1 and 7, got {0}")]
    InvalidPeriod(String),

    /// The forward search examined its whole window without a match.
    #[error("no meeting of period {period} within {limit} days after {from}")]
    NoOccurrenceFound {
        period: Period,
        from: Date,
        limit: u32,
    },

    /// Calendar arithmetic left the range jiff can represent.
    #[error("date out of range: {message}")]
    DateOutOfRange { message: String },
}

impl RotationError {
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::DateOutOfRange {
            message: message.into(),
        }
    }

    /// True for errors caused by a value outside one of the closed
    /// enumerations (labels, lunch options, divisions, periods).
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownLabel(_)
                | Self::UnknownLunchOption(_)
                | Self::UnknownDivision(_)
                | Self::InvalidPeriod(_)
        )
    }
}
