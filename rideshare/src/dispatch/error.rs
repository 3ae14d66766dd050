//! Dispatcher error types.

use crate::domain::{DomainError, DriverId, InvalidId, TripId};

/// Errors from dispatcher construction, lookups and trip operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DispatchError {
    /// Identifier is zero or negative
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidId),

    /// Well-formed identifier with no matching entity
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u32 },

    /// Every driver is unavailable
    #[error("no drivers available")]
    NoAvailableDriver,

    /// A loaded trip points at a passenger or driver that does not exist
    #[error("trip {trip} references unknown {kind} {id}")]
    UnresolvedReference {
        trip: TripId,
        kind: &'static str,
        id: u32,
    },

    /// A passenger or driver lists a trip that is missing or belongs to someone else
    #[error("{kind} {id} lists trip {trip}, which is not theirs")]
    MislinkedTrip {
        kind: &'static str,
        id: u32,
        trip: TripId,
    },

    /// Two entities of the same kind share an identifier
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },

    /// Trip already has an end time
    #[error("trip {0} is already completed")]
    TripAlreadyCompleted(TripId),

    /// Every trip identifier up to `u32::MAX` is in use
    #[error("no trip ids left")]
    TripIdsExhausted,

    /// Driver cannot be made available while one of their trips is running
    #[error("driver {driver} is on trip {trip}")]
    DriverOnTrip { driver: DriverId, trip: TripId },

    /// Entity validation failed
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PassengerId;

    #[test]
    fn error_display() {
        let err: DispatchError = PassengerId::new(0).unwrap_err().into();
        assert_eq!(err.to_string(), "invalid passenger id 0: must be positive");

        let err = DispatchError::NotFound {
            kind: "driver",
            id: 12,
        };
        assert_eq!(err.to_string(), "driver 12 not found");

        assert_eq!(
            DispatchError::NoAvailableDriver.to_string(),
            "no drivers available"
        );

        let err = DispatchError::UnresolvedReference {
            trip: TripId::new(4).unwrap(),
            kind: "passenger",
            id: 99,
        };
        assert_eq!(err.to_string(), "trip 4 references unknown passenger 99");

        let err = DispatchError::MislinkedTrip {
            kind: "driver",
            id: 3,
            trip: TripId::new(5).unwrap(),
        };
        assert_eq!(err.to_string(), "driver 3 lists trip 5, which is not theirs");

        assert_eq!(DispatchError::TripIdsExhausted.to_string(), "no trip ids left");

        let err = DispatchError::DuplicateId {
            kind: "trip",
            id: 3,
        };
        assert_eq!(err.to_string(), "duplicate trip id 3");

        let err = DispatchError::TripAlreadyCompleted(TripId::new(5).unwrap());
        assert_eq!(err.to_string(), "trip 5 is already completed");

        let err = DispatchError::DriverOnTrip {
            driver: DriverId::new(2).unwrap(),
            trip: TripId::new(6).unwrap(),
        };
        assert_eq!(err.to_string(), "driver 2 is on trip 6");
    }
}
