//! Trip: the join between a passenger and a driver.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::{DomainError, DriverId, PassengerId, Rating, TripId};

/// A single ride.
///
/// A trip with no end time is in progress. A trip with no cost has not been
/// settled yet. Validity (end not before start, sane cost) is enforced at
/// construction and by [`Trip::complete`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    id: TripId,
    passenger: PassengerId,
    driver: DriverId,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    cost: Option<f64>,
    rating: Option<Rating>,
}

impl Trip {
    /// Create a trip, checking that its times and cost are consistent.
    pub fn new(
        id: TripId,
        passenger: PassengerId,
        driver: DriverId,
        start_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
        cost: Option<f64>,
        rating: Option<Rating>,
    ) -> Result<Self, DomainError> {
        if let Some(end) = end_time {
            check_end(start_time, end)?;
        }
        if let Some(cost) = cost {
            check_cost(cost)?;
        }
        Ok(Self {
            id,
            passenger,
            driver,
            start_time,
            end_time,
            cost,
            rating,
        })
    }

    /// Create a trip that has just started: no end time, cost or rating.
    pub fn start(
        id: TripId,
        passenger: PassengerId,
        driver: DriverId,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            passenger,
            driver,
            start_time,
            end_time: None,
            cost: None,
            rating: None,
        }
    }

    pub fn id(&self) -> TripId {
        self.id
    }

    pub fn passenger(&self) -> PassengerId {
        self.passenger
    }

    pub fn driver(&self) -> DriverId {
        self.driver
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    pub fn cost(&self) -> Option<f64> {
        self.cost
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    /// True while the trip has no end time.
    pub fn is_in_progress(&self) -> bool {
        self.end_time.is_none()
    }

    /// Time between start and end, or `None` while in progress.
    pub fn duration(&self) -> Option<Duration> {
        self.end_time.map(|end| end - self.start_time)
    }

    /// Check that this trip could be completed with the given values.
    ///
    /// Does not modify the trip; pair with [`Trip::complete`].
    pub(crate) fn validate_completion(
        &self,
        end_time: DateTime<Utc>,
        cost: f64,
    ) -> Result<(), DomainError> {
        check_end(self.start_time, end_time)?;
        check_cost(cost)
    }

    /// Settle an in-progress trip.
    pub fn complete(
        &mut self,
        end_time: DateTime<Utc>,
        cost: f64,
        rating: Option<Rating>,
    ) -> Result<(), DomainError> {
        self.validate_completion(end_time, cost)?;
        self.end_time = Some(end_time);
        self.cost = Some(cost);
        self.rating = rating;
        Ok(())
    }
}

fn check_end(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), DomainError> {
    if end < start {
        return Err(DomainError::EndBeforeStart { start, end });
    }
    Ok(())
}

fn check_cost(cost: f64) -> Result<(), DomainError> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(DomainError::InvalidCost(cost));
    }
    Ok(())
}

/// Resolves trip identifiers to trips.
///
/// Passengers and drivers only store [`TripId`]s; anything that owns the
/// trips themselves can answer their aggregate queries.
pub trait TripLookup {
    fn trip(&self, id: TripId) -> Option<&Trip>;
}

impl TripLookup for HashMap<TripId, Trip> {
    fn trip(&self, id: TripId) -> Option<&Trip> {
        self.get(&id)
    }
}

impl TripLookup for [Trip] {
    fn trip(&self, id: TripId) -> Option<&Trip> {
        self.iter().find(|t| t.id == id)
    }
}

impl TripLookup for Vec<Trip> {
    fn trip(&self, id: TripId) -> Option<&Trip> {
        self.as_slice().trip(id)
    }
}
