//! Domain types for the ride-share dispatcher.
//!
//! Value types validate their invariants at construction time. Entities
//! refer to one another by identifier only; the dispatcher owns them all.

mod driver;
mod error;
mod ids;
mod passenger;
mod rating;
mod trip;
mod vin;

pub use driver::{DRIVER_SHARE, Driver, DriverStatus, TRIP_FEE};
pub use error::DomainError;
pub use ids::{DriverId, InvalidId, PassengerId, TripId};
pub use passenger::Passenger;
pub use rating::{InvalidRating, Rating};
pub use trip::{Trip, TripLookup};
pub use vin::{InvalidVin, VIN_LEN, Vin};
