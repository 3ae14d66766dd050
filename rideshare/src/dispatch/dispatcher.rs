//! The trip dispatcher.
//!
//! Owns every passenger, driver and trip. Entities refer to each other by
//! identifier and all navigation goes through the dispatcher, so there is a
//! single owner and no reference cycles.
//!
//! Every mutating operation performs all of its fallible checks before it
//! touches any collection, so a failed call leaves the dispatcher unchanged.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{
    Driver, DriverId, DriverStatus, Passenger, PassengerId, Rating, Trip, TripId, TripLookup,
};

use super::DispatchError;
use super::registry::Registry;
use super::selection::select_driver;

/// In-memory owner of the ride-share entity graph.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    passengers: Registry<Passenger>,
    drivers: Registry<Driver>,
    trips: Registry<Trip>,
    next_trip_id: Option<TripId>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            passengers: Registry::default(),
            drivers: Registry::default(),
            trips: Registry::default(),
            next_trip_id: Some(TripId::FIRST),
        }
    }
}

impl Dispatcher {
    /// Build a dispatcher and wire every trip to its passenger and driver.
    ///
    /// Fails if any identifier is duplicated within a collection, or if a
    /// trip refers to a passenger or driver that is not present. Trip ids
    /// already listed on an entity must name trips that belong to it; they
    /// are kept and not appended twice.
    ///
    /// A driver with a trip still in progress is marked unavailable
    /// regardless of the status they were constructed with.
    pub fn new(
        passengers: Vec<Passenger>,
        drivers: Vec<Driver>,
        trips: Vec<Trip>,
    ) -> Result<Self, DispatchError> {
        let mut passengers = Registry::from_vec(passengers)?;
        let mut drivers = Registry::from_vec(drivers)?;
        let trips = Registry::from_vec(trips)?;

        for passenger in passengers.iter() {
            check_linked_trips(
                PassengerId::KIND,
                passenger.id().get(),
                passenger.trips(),
                &trips,
                |t| t.passenger() == passenger.id(),
            )?;
        }
        for driver in drivers.iter() {
            check_linked_trips(
                DriverId::KIND,
                driver.id().get(),
                driver.trips(),
                &trips,
                |t| t.driver() == driver.id(),
            )?;
        }

        for trip in trips.iter() {
            let p_idx = passengers.position(trip.passenger()).ok_or_else(|| {
                DispatchError::UnresolvedReference {
                    trip: trip.id(),
                    kind: PassengerId::KIND,
                    id: trip.passenger().get(),
                }
            })?;
            let d_idx = drivers.position(trip.driver()).ok_or_else(|| {
                DispatchError::UnresolvedReference {
                    trip: trip.id(),
                    kind: DriverId::KIND,
                    id: trip.driver().get(),
                }
            })?;

            let passenger = passengers.at_mut(p_idx);
            if !passenger.trips().contains(&trip.id()) {
                passenger.add_trip(trip.id());
            }
            let driver = drivers.at_mut(d_idx);
            if !driver.trips().contains(&trip.id()) {
                driver.add_trip(trip.id());
            }
        }

        let next_trip_id = match trips.iter().map(Trip::id).max() {
            Some(max) => max.next(),
            None => Some(TripId::FIRST),
        };

        let mut dispatcher = Self {
            passengers,
            drivers,
            trips,
            next_trip_id,
        };
        dispatcher.reconcile_driver_status();

        debug!(
            passengers = dispatcher.passengers.len(),
            drivers = dispatcher.drivers.len(),
            trips = dispatcher.trips.len(),
            "dispatcher built"
        );
        Ok(dispatcher)
    }

    /// Mark drivers with a running trip as unavailable.
    fn reconcile_driver_status(&mut self) {
        let on_trip: Vec<usize> = self
            .drivers
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_available())
            .filter(|(_, d)| d.active_trip(&*self).is_some())
            .map(|(idx, _)| idx)
            .collect();

        for idx in on_trip {
            let driver = self.drivers.at_mut(idx);
            warn!(driver = %driver.id(), "driver is on a trip but marked available; marking unavailable");
            driver.set_status(DriverStatus::Unavailable);
        }
    }

    /// All passengers in load order.
    pub fn passengers(&self) -> &[Passenger] {
        self.passengers.as_slice()
    }

    /// All drivers in load order.
    pub fn drivers(&self) -> &[Driver] {
        self.drivers.as_slice()
    }

    /// All trips: loaded trips first, then requested trips in request order.
    pub fn trips(&self) -> &[Trip] {
        self.trips.as_slice()
    }

    /// Drivers that can currently take a trip.
    pub fn available_drivers(&self) -> impl Iterator<Item = &Driver> {
        self.drivers.iter().filter(|d| d.is_available())
    }

    /// Look up a passenger by raw identifier.
    ///
    /// Identifiers ≤ 0 fail with `InvalidIdentifier` before any search.
    pub fn find_passenger(&self, id: i64) -> Result<&Passenger, DispatchError> {
        self.passengers.require(PassengerId::new(id)?)
    }

    /// Look up a driver by raw identifier.
    pub fn find_driver(&self, id: i64) -> Result<&Driver, DispatchError> {
        self.drivers.require(DriverId::new(id)?)
    }

    /// Look up a trip by raw identifier.
    pub fn find_trip(&self, id: i64) -> Result<&Trip, DispatchError> {
        self.trips.require(TripId::new(id)?)
    }

    pub fn passenger(&self, id: PassengerId) -> Option<&Passenger> {
        self.passengers.get(id)
    }

    pub fn driver(&self, id: DriverId) -> Option<&Driver> {
        self.drivers.get(id)
    }

    /// Trips of a passenger, in the order they were added.
    pub fn passenger_trips(
        &self,
        id: i64,
    ) -> Result<impl Iterator<Item = &Trip> + '_, DispatchError> {
        Ok(self.find_passenger(id)?.resolve_trips(self))
    }

    /// Trips of a driver, in the order they were added.
    pub fn driver_trips(&self, id: i64) -> Result<impl Iterator<Item = &Trip> + '_, DispatchError> {
        Ok(self.find_driver(id)?.resolve_trips(self))
    }

    /// See [`Passenger::net_expenditures`].
    pub fn net_expenditures(&self, passenger_id: i64) -> Result<Option<f64>, DispatchError> {
        Ok(self.find_passenger(passenger_id)?.net_expenditures(self))
    }

    /// See [`Passenger::total_time_spent`].
    pub fn total_time_spent(&self, passenger_id: i64) -> Result<Option<i64>, DispatchError> {
        Ok(self.find_passenger(passenger_id)?.total_time_spent(self))
    }

    /// See [`Driver::average_rating`].
    pub fn driver_average_rating(&self, driver_id: i64) -> Result<Option<f64>, DispatchError> {
        Ok(self.find_driver(driver_id)?.average_rating(self))
    }

    /// See [`Driver::total_revenue`].
    pub fn driver_total_revenue(&self, driver_id: i64) -> Result<f64, DispatchError> {
        Ok(self.find_driver(driver_id)?.total_revenue(self))
    }

    /// Request a trip for a passenger, starting now.
    pub fn request_trip(&mut self, passenger_id: i64) -> Result<Trip, DispatchError> {
        self.request_trip_at(passenger_id, Utc::now())
    }

    /// Request a trip for a passenger, starting at `start_time`.
    ///
    /// Assigns the available driver who has waited longest (see
    /// [`select_driver`]), records the new trip on the dispatcher, the
    /// passenger and the driver, and marks the driver unavailable. On error
    /// nothing changes.
    pub fn request_trip_at(
        &mut self,
        passenger_id: i64,
        start_time: DateTime<Utc>,
    ) -> Result<Trip, DispatchError> {
        let passenger_id = PassengerId::new(passenger_id)?;
        let p_idx = self.passengers.require_position(passenger_id)?;

        let driver_id = select_driver(self.drivers.iter(), &*self)
            .map(Driver::id)
            .ok_or(DispatchError::NoAvailableDriver)?;
        let d_idx = self.drivers.require_position(driver_id)?;

        let trip_id = self.next_trip_id.ok_or(DispatchError::TripIdsExhausted)?;
        let trip = Trip::start(trip_id, passenger_id, driver_id, start_time);

        // The registry insert is the last fallible step, so it runs first.
        self.trips.insert(trip.clone())?;
        self.passengers.at_mut(p_idx).add_trip(trip_id);
        let driver = self.drivers.at_mut(d_idx);
        driver.add_trip(trip_id);
        driver.set_status(DriverStatus::Unavailable);
        self.next_trip_id = trip_id.next();

        info!(
            trip = %trip_id,
            passenger = %passenger_id,
            driver = %driver_id,
            "trip requested"
        );
        Ok(trip)
    }

    /// Settle an in-progress trip.
    ///
    /// If the driver has no other trip in progress they become available
    /// again. On error nothing changes.
    pub fn complete_trip(
        &mut self,
        trip_id: i64,
        end_time: DateTime<Utc>,
        cost: f64,
        rating: Option<Rating>,
    ) -> Result<Trip, DispatchError> {
        let trip_id = TripId::new(trip_id)?;
        let t_idx = self.trips.require_position(trip_id)?;
        let trip = &self.trips.as_slice()[t_idx];

        if !trip.is_in_progress() {
            return Err(DispatchError::TripAlreadyCompleted(trip_id));
        }
        trip.validate_completion(end_time, cost)?;

        let driver_id = trip.driver();
        let d_idx = self.drivers.require_position(driver_id)?;
        let frees_driver = !self.drivers.as_slice()[d_idx]
            .resolve_trips(&*self)
            .any(|t| t.id() != trip_id && t.is_in_progress());

        let trip = self.trips.at_mut(t_idx);
        trip.complete(end_time, cost, rating)?;
        let completed = trip.clone();

        if frees_driver {
            self.drivers.at_mut(d_idx).set_status(DriverStatus::Available);
        }

        info!(trip = %trip_id, driver = %driver_id, cost, "trip completed");
        Ok(completed)
    }

    /// Set a driver's status directly.
    ///
    /// A driver with a trip in progress cannot be made available.
    pub fn set_driver_status(
        &mut self,
        driver_id: i64,
        status: DriverStatus,
    ) -> Result<(), DispatchError> {
        let driver_id = DriverId::new(driver_id)?;
        let d_idx = self.drivers.require_position(driver_id)?;

        if status == DriverStatus::Available
            && let Some(trip) = self.drivers.as_slice()[d_idx].active_trip(&*self)
        {
            return Err(DispatchError::DriverOnTrip {
                driver: driver_id,
                trip: trip.id(),
            });
        }

        self.drivers.at_mut(d_idx).set_status(status);
        debug!(driver = %driver_id, %status, "driver status set");
        Ok(())
    }
}

/// Check that every trip id an entity already lists exists, belongs to it,
/// and appears once.
fn check_linked_trips(
    kind: &'static str,
    id: u32,
    linked: &[TripId],
    trips: &Registry<Trip>,
    owns: impl Fn(&Trip) -> bool,
) -> Result<(), DispatchError> {
    let mut seen = HashSet::new();
    for &trip in linked {
        if !seen.insert(trip) {
            return Err(DispatchError::DuplicateId {
                kind: TripId::KIND,
                id: trip.get(),
            });
        }
        if !trips.get(trip).is_some_and(|t| owns(t)) {
            return Err(DispatchError::MislinkedTrip { kind, id, trip });
        }
    }
    Ok(())
}

impl TripLookup for Dispatcher {
    fn trip(&self, id: TripId) -> Option<&Trip> {
        self.trips.get(id)
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
