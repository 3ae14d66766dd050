//! Passenger entity.

use serde::Serialize;

use super::{PassengerId, Trip, TripId, TripLookup};

/// A person who takes trips.
///
/// Holds the identifiers of their trips in creation order; the trips
/// themselves live with whoever implements [`TripLookup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Passenger {
    id: PassengerId,
    name: String,
    phone_number: String,
    trips: Vec<TripId>,
}

impl Passenger {
    /// Create a passenger with no trips.
    pub fn new(id: PassengerId, name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone_number: phone_number.into(),
            trips: Vec::new(),
        }
    }

    pub fn id(&self) -> PassengerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Trip identifiers in the order they were added.
    pub fn trips(&self) -> &[TripId] {
        &self.trips
    }

    /// Append a trip. Keeping `trip.passenger()` consistent is the caller's job.
    pub fn add_trip(&mut self, trip: TripId) {
        self.trips.push(trip);
    }

    /// Resolve this passenger's trips. Identifiers the lookup cannot
    /// resolve are skipped.
    pub fn resolve_trips<'a, L>(&'a self, lookup: &'a L) -> impl Iterator<Item = &'a Trip> + 'a
    where
        L: TripLookup + ?Sized,
    {
        self.trips.iter().filter_map(move |id| lookup.trip(*id))
    }

    /// Total cost of all trips.
    ///
    /// Trips without a cost (in progress or unsettled) count as zero.
    /// Returns `None` when the passenger has no trips at all, which is
    /// distinct from `Some(0.0)` for a passenger whose trips were all free.
    pub fn net_expenditures<L>(&self, lookup: &L) -> Option<f64>
    where
        L: TripLookup + ?Sized,
    {
        if self.trips.is_empty() {
            return None;
        }
        Some(
            self.resolve_trips(lookup)
                .map(|t| t.cost().unwrap_or(0.0))
                .fold(0.0, |total, cost| total + cost),
        )
    }

    /// Total riding time in seconds.
    ///
    /// Trips without an end time count as zero. Returns `None` when the
    /// passenger has no trips.
    pub fn total_time_spent<L>(&self, lookup: &L) -> Option<i64>
    where
        L: TripLookup + ?Sized,
    {
        if self.trips.is_empty() {
            return None;
        }
        Some(
            self.resolve_trips(lookup)
                .filter_map(Trip::duration)
                .map(|d| d.num_seconds())
                .sum(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DriverId, Rating};
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::HashMap;

    fn pid(n: i64) -> PassengerId {
        PassengerId::new(n).unwrap()
    }

    fn tid(n: i64) -> TripId {
        TripId::new(n).unwrap()
    }

    fn did() -> DriverId {
        DriverId::new(1).unwrap()
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 10, 10, h, m, 0).unwrap()
    }

    fn merl() -> Passenger {
        Passenger::new(pid(9), "Merl Glover III", "1-602-620-2330 x3723")
    }

    /// A passenger with two completed five-minute trips at 32.5 each.
    fn with_two_trips() -> (Passenger, HashMap<TripId, Trip>) {
        let mut passenger = merl();
        let mut trips = HashMap::new();
        for n in [8, 9] {
            let trip = Trip::new(
                tid(n),
                passenger.id(),
                did(),
                at(10, 0),
                Some(at(10, 5)),
                Some(32.5),
                Some(Rating::new(5).unwrap()),
            )
            .unwrap();
            passenger.add_trip(trip.id());
            trips.insert(trip.id(), trip);
        }
        (passenger, trips)
    }

    fn add_in_progress(passenger: &mut Passenger, trips: &mut HashMap<TripId, Trip>) {
        let trip = Trip::start(tid(10), passenger.id(), did(), at(10, 0));
        passenger.add_trip(trip.id());
        trips.insert(trip.id(), trip);
    }

    #[test]
    fn new_passenger_has_no_trips() {
        let passenger = merl();
        assert_eq!(passenger.id().get(), 9);
        assert_eq!(passenger.name(), "Merl Glover III");
        assert_eq!(passenger.phone_number(), "1-602-620-2330 x3723");
        assert!(passenger.trips().is_empty());
    }

    #[test]
    fn trips_belong_to_passenger() {
        let (passenger, trips) = with_two_trips();
        assert_eq!(passenger.trips(), &[tid(8), tid(9)]);
        for trip in passenger.resolve_trips(&trips) {
            assert_eq!(trip.passenger(), passenger.id());
        }
    }

    #[test]
    fn net_expenditures_none_without_trips() {
        let trips: HashMap<TripId, Trip> = HashMap::new();
        assert_eq!(merl().net_expenditures(&trips), None);
    }

    #[test]
    fn net_expenditures_sums_costs() {
        let (passenger, trips) = with_two_trips();
        assert_eq!(passenger.net_expenditures(&trips), Some(65.0));
    }

    #[test]
    fn net_expenditures_ignores_in_progress_trip() {
        let (mut passenger, mut trips) = with_two_trips();
        add_in_progress(&mut passenger, &mut trips);
        assert_eq!(passenger.net_expenditures(&trips), Some(65.0));
    }

    #[test]
    fn net_expenditures_zero_when_all_unsettled() {
        let mut passenger = merl();
        let mut trips = HashMap::new();
        add_in_progress(&mut passenger, &mut trips);
        assert_eq!(passenger.net_expenditures(&trips), Some(0.0));
    }

    #[test]
    fn net_expenditures_of_unresolved_trips_is_positive_zero() {
        let mut passenger = merl();
        passenger.add_trip(tid(42));
        let trips: Vec<Trip> = Vec::new();
        let total = passenger.net_expenditures(&trips).unwrap();
        assert_eq!(total.to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn total_time_spent_none_without_trips() {
        let trips: Vec<Trip> = Vec::new();
        assert_eq!(merl().total_time_spent(&trips), None);
    }

    #[test]
    fn total_time_spent_sums_durations() {
        let (passenger, trips) = with_two_trips();
        assert_eq!(passenger.total_time_spent(&trips), Some(600));
    }

    #[test]
    fn total_time_spent_ignores_in_progress_trip() {
        let (mut passenger, mut trips) = with_two_trips();
        add_in_progress(&mut passenger, &mut trips);
        assert_eq!(passenger.total_time_spent(&trips), Some(600));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::DriverId;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    proptest! {
        /// With at least one trip, net expenditures is the sum of present costs
        #[test]
        fn net_expenditures_is_sum_of_present_costs(
            costs in prop::collection::vec(prop::option::of(0u32..10_000u32), 1..20)
        ) {
            let mut passenger = Passenger::new(PassengerId::new(1).unwrap(), "P", "555");
            let driver = DriverId::new(1).unwrap();
            let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
            let mut trips = Vec::new();

            for (i, cents) in costs.iter().enumerate() {
                let cost = cents.map(|c| c as f64 / 100.0);
                let id = TripId::new(i as i64 + 1).unwrap();
                let trip = Trip::new(id, passenger.id(), driver, start, None, cost, None).unwrap();
                passenger.add_trip(id);
                trips.push(trip);
            }

            let expected: f64 = costs.iter().flatten().map(|c| *c as f64 / 100.0).sum();
            let got = passenger.net_expenditures(&trips);
            prop_assert!(got.is_some());
            prop_assert!((got.unwrap_or_default() - expected).abs() < 1e-6);
        }
    }
}
