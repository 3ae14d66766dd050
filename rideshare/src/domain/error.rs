//! Domain error types.
//!
//! These errors represent validation failures when constructing entities.
//! They are distinct from dispatcher lookup errors and loader IO errors.

use chrono::{DateTime, Utc};

use super::{InvalidId, InvalidRating, InvalidVin};

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Identifier is not a positive integer
    #[error(transparent)]
    InvalidId(#[from] InvalidId),

    /// Vehicle identification number is malformed
    #[error(transparent)]
    InvalidVin(#[from] InvalidVin),

    /// Rating outside 1..=5
    #[error(transparent)]
    InvalidRating(#[from] InvalidRating),

    /// Driver status is neither AVAILABLE nor UNAVAILABLE
    #[error("invalid driver status: {0:?}")]
    InvalidStatus(String),

    /// Trip ends before it starts
    #[error("trip ends at {end} before it starts at {start}")]
    EndBeforeStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Cost is negative or not a finite number
    #[error("invalid trip cost {0}: must be a finite, non-negative amount")]
    InvalidCost(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PassengerId, Rating, Vin};
    use chrono::TimeZone;

    #[test]
    fn error_display() {
        let err: DomainError = PassengerId::new(0).unwrap_err().into();
        assert_eq!(err.to_string(), "invalid passenger id 0: must be positive");

        let err: DomainError = Vin::parse("short").unwrap_err().into();
        assert_eq!(err.to_string(), "invalid VIN: must be exactly 17 characters");

        let err: DomainError = Rating::new(7).unwrap_err().into();
        assert_eq!(err.to_string(), "invalid rating 7: must be between 1 and 5");

        let err = DomainError::InvalidStatus("BUSY".into());
        assert_eq!(err.to_string(), "invalid driver status: \"BUSY\"");

        let start = Utc.with_ymd_and_hms(2016, 8, 9, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2016, 8, 8, 0, 0, 0).unwrap();
        let err = DomainError::EndBeforeStart { start, end };
        assert_eq!(
            err.to_string(),
            "trip ends at 2016-08-08 00:00:00 UTC before it starts at 2016-08-09 00:00:00 UTC"
        );

        let err = DomainError::InvalidCost(-1.5);
        assert_eq!(
            err.to_string(),
            "invalid trip cost -1.5: must be a finite, non-negative amount"
        );
    }
}
