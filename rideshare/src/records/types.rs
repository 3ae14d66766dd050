//! Raw CSV record types.
//!
//! Every column is optional at this layer so that a missing or empty value
//! is reported by name during conversion instead of as a generic CSV error.

use serde::Deserialize;

/// A row of `passengers.csv`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PassengerRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "phone_number")]
    pub phone_num: Option<String>,
}

/// A row of `drivers.csv`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DriverRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A row of `trips.csv`.
///
/// Timestamps stay as text here; see [`super::parse_timestamp`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TripRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub driver_id: Option<i64>,
    #[serde(default)]
    pub passenger_id: Option<i64>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub rating: Option<i64>,
}
