//! Thread-safe dispatcher handle.
//!
//! `request_trip` reads driver availability and then flips it; two
//! unsynchronised callers could both pick the same driver. Every operation
//! here holds one lock for its whole duration.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::domain::{DriverStatus, Rating, Trip};

use super::{DispatchError, Dispatcher};

/// Cloneable handle to a dispatcher guarded by a single mutex.
#[derive(Debug, Clone, Default)]
pub struct SharedDispatcher {
    inner: Arc<Mutex<Dispatcher>>,
}

impl SharedDispatcher {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            inner: Arc::new(Mutex::new(dispatcher)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Dispatcher> {
        // Dispatcher operations validate before mutating, so state behind a
        // poisoned lock is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a read-only closure against a consistent view of the dispatcher.
    pub fn read<R>(&self, f: impl FnOnce(&Dispatcher) -> R) -> R {
        f(&self.lock())
    }

    /// See [`Dispatcher::request_trip`].
    pub fn request_trip(&self, passenger_id: i64) -> Result<Trip, DispatchError> {
        self.lock().request_trip(passenger_id)
    }

    /// See [`Dispatcher::request_trip_at`].
    pub fn request_trip_at(
        &self,
        passenger_id: i64,
        start_time: DateTime<Utc>,
    ) -> Result<Trip, DispatchError> {
        self.lock().request_trip_at(passenger_id, start_time)
    }

    /// See [`Dispatcher::complete_trip`].
    pub fn complete_trip(
        &self,
        trip_id: i64,
        end_time: DateTime<Utc>,
        cost: f64,
        rating: Option<Rating>,
    ) -> Result<Trip, DispatchError> {
        self.lock().complete_trip(trip_id, end_time, cost, rating)
    }

    /// See [`Dispatcher::set_driver_status`].
    pub fn set_driver_status(
        &self,
        driver_id: i64,
        status: DriverStatus,
    ) -> Result<(), DispatchError> {
        self.lock().set_driver_status(driver_id, status)
    }
}

impl From<Dispatcher> for SharedDispatcher {
    fn from(dispatcher: Dispatcher) -> Self {
        Self::new(dispatcher)
    }
}
