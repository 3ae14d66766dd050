//! Tabular record loading.
//!
//! Rows are deserialised from CSV into loosely typed records, then
//! converted into validated entities with `TryFrom`. A row that is missing a
//! required field or carries an invalid value is rejected with the field
//! name; no partially built entity ever reaches the dispatcher.

mod convert;
mod error;
mod loader;
mod types;

pub use convert::parse_timestamp;
pub use error::{LoadError, RecordError};
pub use loader::{
    DRIVERS_FILE, PASSENGERS_FILE, TRIPS_FILE, load_directory, load_file, load_from_readers,
};
pub use types::{DriverRecord, PassengerRecord, TripRecord};
