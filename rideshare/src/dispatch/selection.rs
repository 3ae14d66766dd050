//! Driver selection for new trip requests.
//!
//! Available drivers are ranked by how long they have been idle. A driver
//! who has never driven outranks everyone; otherwise the driver whose most
//! recent trip ended earliest goes first.

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::domain::{Driver, Trip, TripLookup};

/// How long a driver has been waiting, ordered so that smaller values are
/// served first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Idleness {
    /// No trip history at all.
    NeverDriven,
    /// Most recent trip ended at this time.
    IdleSince(DateTime<Utc>),
    /// Some trip has no end time yet.
    OnTrip,
}

impl Idleness {
    pub fn of<L>(driver: &Driver, trips: &L) -> Self
    where
        L: TripLookup + ?Sized,
    {
        if driver.active_trip(trips).is_some() {
            return Idleness::OnTrip;
        }
        match driver.most_recent_trip(trips).and_then(Trip::end_time) {
            None => Idleness::NeverDriven,
            Some(end) => Idleness::IdleSince(end),
        }
    }
}

/// Pick the available driver who has waited longest.
///
/// Exact ties go to the driver encountered first, so the result is
/// deterministic for a given driver order. Returns `None` if no driver is
/// available.
pub fn select_driver<'a, I, L>(drivers: I, trips: &L) -> Option<&'a Driver>
where
    I: IntoIterator<Item = &'a Driver>,
    L: TripLookup + ?Sized,
{
    let mut best: Option<(Idleness, &'a Driver)> = None;

    for driver in drivers.into_iter().filter(|d| d.is_available()) {
        let rank = Idleness::of(driver, trips);
        trace!(driver = %driver.id(), ?rank, "ranked candidate");

        // Strict comparison keeps the first of equally ranked drivers.
        let better = match &best {
            None => true,
            Some((best_rank, _)) => rank < *best_rank,
        };
        if better {
            best = Some((rank, driver));
        }
    }

    best.map(|(_, driver)| driver)
}
