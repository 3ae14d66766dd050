//! Conversion from raw records to validated entities.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::domain::{
    DomainError, Driver, DriverId, DriverStatus, Passenger, PassengerId, Rating, Trip, TripId,
    Vin,
};

use super::error::RecordError;
use super::types::{DriverRecord, PassengerRecord, TripRecord};

/// Parse a record timestamp.
///
/// Accepts `2018-05-25 11:52:40 -0700`, RFC 3339, and offset-less
/// `2018-05-25 11:52:40` (taken as UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|t| t.and_utc())
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, RecordError> {
    value.ok_or(RecordError::MissingField(field))
}

fn invalid(field: &'static str) -> impl FnOnce(DomainError) -> RecordError {
    move |source| RecordError::InvalidField { field, source }
}

fn timestamp(value: String, field: &'static str) -> Result<DateTime<Utc>, RecordError> {
    parse_timestamp(&value).ok_or(RecordError::InvalidTimestamp { field, value })
}

impl TryFrom<PassengerRecord> for Passenger {
    type Error = RecordError;

    fn try_from(record: PassengerRecord) -> Result<Self, Self::Error> {
        let id = PassengerId::new(required(record.id, "id")?)
            .map_err(|e| invalid("id")(e.into()))?;
        let name = required(record.name, "name")?;
        let phone = required(record.phone_num, "phone_num")?;
        Ok(Passenger::new(id, name, phone))
    }
}

impl TryFrom<DriverRecord> for Driver {
    type Error = RecordError;

    fn try_from(record: DriverRecord) -> Result<Self, Self::Error> {
        let id =
            DriverId::new(required(record.id, "id")?).map_err(|e| invalid("id")(e.into()))?;
        let name = required(record.name, "name")?;
        let vin = Vin::parse(&required(record.vin, "vin")?)
            .map_err(|e| invalid("vin")(e.into()))?;
        // A driver without a status column is available.
        let status = match record.status {
            Some(s) => s.parse::<DriverStatus>().map_err(invalid("status"))?,
            None => DriverStatus::default(),
        };
        Ok(Driver::new(id, name, vin, status))
    }
}

impl TryFrom<TripRecord> for Trip {
    type Error = RecordError;

    fn try_from(record: TripRecord) -> Result<Self, Self::Error> {
        let id = TripId::new(required(record.id, "id")?).map_err(|e| invalid("id")(e.into()))?;
        let passenger = PassengerId::new(required(record.passenger_id, "passenger_id")?)
            .map_err(|e| invalid("passenger_id")(e.into()))?;
        let driver = DriverId::new(required(record.driver_id, "driver_id")?)
            .map_err(|e| invalid("driver_id")(e.into()))?;
        let start_time = timestamp(required(record.start_time, "start_time")?, "start_time")?;
        let end_time = record
            .end_time
            .map(|s| timestamp(s, "end_time"))
            .transpose()?;
        let rating = record
            .rating
            .map(|r| Rating::new(r).map_err(|e| invalid("rating")(e.into())))
            .transpose()?;

        Trip::new(
            id,
            passenger,
            driver,
            start_time,
            end_time,
            record.cost,
            rating,
        )
        .map_err(|e| match e {
            DomainError::EndBeforeStart { .. } => invalid("end_time")(e),
            DomainError::InvalidCost(_) => invalid("cost")(e),
            other => invalid("trip")(other),
        })
    }
}
