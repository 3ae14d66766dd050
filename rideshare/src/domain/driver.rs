//! Driver entity and availability status.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::{DomainError, DriverId, Trip, TripId, TripLookup, Vin};

/// Flat fee deducted from every settled trip before the driver's share.
pub const TRIP_FEE: f64 = 1.65;

/// Fraction of the post-fee cost paid to the driver.
pub const DRIVER_SHARE: f64 = 0.8;

/// Whether a driver can be assigned a new trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    #[default]
    Available,
    Unavailable,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Available => "AVAILABLE",
            DriverStatus::Unavailable => "UNAVAILABLE",
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverStatus {
    type Err = DomainError;

    /// Parses `AVAILABLE` / `UNAVAILABLE`, ignoring case and an optional
    /// leading colon (`:AVAILABLE`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix(':').unwrap_or(trimmed);
        if bare.eq_ignore_ascii_case("AVAILABLE") {
            Ok(DriverStatus::Available)
        } else if bare.eq_ignore_ascii_case("UNAVAILABLE") {
            Ok(DriverStatus::Unavailable)
        } else {
            Err(DomainError::InvalidStatus(s.to_string()))
        }
    }
}

/// A driver who can be assigned trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Driver {
    id: DriverId,
    name: String,
    vin: Vin,
    status: DriverStatus,
    trips: Vec<TripId>,
}

impl Driver {
    /// Create a driver with no trips.
    pub fn new(id: DriverId, name: impl Into<String>, vin: Vin, status: DriverStatus) -> Self {
        Self {
            id,
            name: name.into(),
            vin,
            status,
            trips: Vec::new(),
        }
    }

    pub fn id(&self) -> DriverId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vin(&self) -> Vin {
        self.vin
    }

    pub fn status(&self) -> DriverStatus {
        self.status
    }

    pub fn is_available(&self) -> bool {
        self.status == DriverStatus::Available
    }

    pub fn set_status(&mut self, status: DriverStatus) {
        self.status = status;
    }

    /// Trip identifiers in the order they were added.
    pub fn trips(&self) -> &[TripId] {
        &self.trips
    }

    /// Append a trip. Keeping `trip.driver()` consistent is the caller's job.
    pub fn add_trip(&mut self, trip: TripId) {
        self.trips.push(trip);
    }

    pub fn resolve_trips<'a, L>(&'a self, lookup: &'a L) -> impl Iterator<Item = &'a Trip> + 'a
    where
        L: TripLookup + ?Sized,
    {
        self.trips.iter().filter_map(move |id| lookup.trip(*id))
    }

    /// The trip with the latest start time.
    ///
    /// On equal start times the trip added later wins.
    pub fn most_recent_trip<'a, L>(&'a self, lookup: &'a L) -> Option<&'a Trip>
    where
        L: TripLookup + ?Sized,
    {
        // max_by_key keeps the last maximum, which is the later-added trip.
        self.resolve_trips(lookup).max_by_key(|t| t.start_time())
    }

    /// The first of this driver's trips that has not ended yet.
    ///
    /// Unlike [`Driver::most_recent_trip`] this sees a running trip however
    /// its start time compares with the rest of the history.
    pub fn active_trip<'a, L>(&'a self, lookup: &'a L) -> Option<&'a Trip>
    where
        L: TripLookup + ?Sized,
    {
        self.resolve_trips(lookup).find(|t| t.is_in_progress())
    }

    /// Mean rating over rated trips, or `None` if nothing has been rated.
    pub fn average_rating<L>(&self, lookup: &L) -> Option<f64>
    where
        L: TripLookup + ?Sized,
    {
        let (sum, count) = self
            .resolve_trips(lookup)
            .filter_map(Trip::rating)
            .fold((0u32, 0u32), |(sum, count), r| {
                (sum + u32::from(r.get()), count + 1)
            });
        (count > 0).then(|| f64::from(sum) / f64::from(count))
    }

    /// Driver earnings over settled trips.
    ///
    /// Each trip pays `(cost - TRIP_FEE) * DRIVER_SHARE`, never below zero.
    pub fn total_revenue<L>(&self, lookup: &L) -> f64
    where
        L: TripLookup + ?Sized,
    {
        self.resolve_trips(lookup)
            .filter_map(Trip::cost)
            .map(|cost| ((cost - TRIP_FEE) * DRIVER_SHARE).max(0.0))
            .fold(0.0, |total, share| total + share)
    }
}
