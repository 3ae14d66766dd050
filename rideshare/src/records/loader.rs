//! Load a dispatcher from a directory of CSV files.
//!
//! The directory must contain `passengers.csv`, `drivers.csv` and
//! `trips.csv`, each with a header row.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::dispatch::Dispatcher;
use crate::domain::{Driver, Passenger, Trip};

use super::error::{LoadError, RecordError};
use super::types::{DriverRecord, PassengerRecord, TripRecord};

pub const PASSENGERS_FILE: &str = "passengers.csv";
pub const DRIVERS_FILE: &str = "drivers.csv";
pub const TRIPS_FILE: &str = "trips.csv";

/// Read and validate every entity from the data directory, then wire them
/// into a dispatcher.
pub fn load_directory(dir: impl AsRef<Path>) -> Result<Dispatcher, LoadError> {
    let dir = dir.as_ref();
    info!(dir = %dir.display(), "loading ride-share data");

    let passengers = load_file::<PassengerRecord, Passenger>(&dir.join(PASSENGERS_FILE))?;
    let drivers = load_file::<DriverRecord, Driver>(&dir.join(DRIVERS_FILE))?;
    let trips = load_file::<TripRecord, Trip>(&dir.join(TRIPS_FILE))?;

    let dispatcher = Dispatcher::new(passengers, drivers, trips)?;
    info!(
        passengers = dispatcher.passengers().len(),
        drivers = dispatcher.drivers().len(),
        trips = dispatcher.trips().len(),
        "ride-share data loaded"
    );
    Ok(dispatcher)
}

/// Like [`load_directory`], but reading from in-memory sources.
///
/// Errors name the conventional file names.
pub fn load_from_readers<P: Read, D: Read, T: Read>(
    passengers: P,
    drivers: D,
    trips: T,
) -> Result<Dispatcher, LoadError> {
    let passengers =
        parse_entities::<_, PassengerRecord, Passenger>(passengers, Path::new(PASSENGERS_FILE))?;
    let drivers = parse_entities::<_, DriverRecord, Driver>(drivers, Path::new(DRIVERS_FILE))?;
    let trips = parse_entities::<_, TripRecord, Trip>(trips, Path::new(TRIPS_FILE))?;
    Ok(Dispatcher::new(passengers, drivers, trips)?)
}

/// Read one CSV file and convert every row into an entity.
pub fn load_file<R, E>(path: &Path) -> Result<Vec<E>, LoadError>
where
    R: DeserializeOwned,
    E: TryFrom<R, Error = RecordError>,
{
    let file = std::fs::File::open(path).map_err(|e| LoadError::Csv {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    let entities = parse_entities(file, path)?;
    debug!(path = %path.display(), count = entities.len(), "loaded records");
    Ok(entities)
}

fn parse_entities<S, R, E>(source: S, path: &Path) -> Result<Vec<E>, LoadError>
where
    S: Read,
    R: DeserializeOwned,
    E: TryFrom<R, Error = RecordError>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    reader
        .deserialize::<R>()
        .enumerate()
        .map(|(i, row)| {
            let record = row.map_err(|source| LoadError::Csv {
                path: PathBuf::from(path),
                source,
            })?;
            E::try_from(record).map_err(|source| LoadError::Record {
                path: PathBuf::from(path),
                record: i + 1,
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DispatchError;
    use crate::domain::DriverStatus;
    use std::fs;
    use tempfile::tempdir;

    const PASSENGERS: &str = "id,name,phone_num\n1,Passenger 1,555-0101\n2,Passenger 2,555-0102\n";
    const DRIVERS: &str = "id,name,vin,status\n\
        1,Driver 1,12345678901234567,UNAVAILABLE\n\
        2,Driver 2,WBWSS52P9NEYLVDE9,AVAILABLE\n";
    const TRIPS: &str = "id,driver_id,passenger_id,start_time,end_time,cost,rating\n\
        1,1,1,2018-05-25 11:52:40 -0700,2018-05-25 12:25:00 -0700,10.0,5\n\
        2,2,2,2018-07-23 04:39:00 -0700,,,\n";

    fn fixture_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data")
    }

    #[test]
    fn load_from_readers_builds_dispatcher() {
        let d = load_from_readers(PASSENGERS.as_bytes(), DRIVERS.as_bytes(), TRIPS.as_bytes())
            .unwrap();
        assert_eq!(d.passengers().len(), 2);
        assert_eq!(d.drivers().len(), 2);
        assert_eq!(d.trips().len(), 2);
        assert!(d.trips()[1].is_in_progress());
        // Driver 2 is listed available but is on trip 2.
        assert_eq!(d.find_driver(2).unwrap().status(), DriverStatus::Unavailable);
    }

    #[test]
    fn load_directory_reads_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(PASSENGERS_FILE), PASSENGERS).unwrap();
        fs::write(dir.path().join(DRIVERS_FILE), DRIVERS).unwrap();
        fs::write(dir.path().join(TRIPS_FILE), TRIPS).unwrap();

        let d = load_directory(dir.path()).unwrap();
        assert_eq!(d.find_passenger(1).unwrap().trips().len(), 1);
        assert_eq!(d.net_expenditures(1).unwrap(), Some(10.0));
    }

    #[test]
    fn missing_file_names_path() {
        let dir = tempdir().unwrap();
        let err = load_directory(dir.path()).unwrap_err();
        match err {
            LoadError::Csv { path, .. } => assert!(path.ends_with(PASSENGERS_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_value_is_csv_error() {
        let passengers = "id,name,phone_num\nabc,Passenger 1,555\n";
        let err = load_from_readers(passengers.as_bytes(), DRIVERS.as_bytes(), TRIPS.as_bytes())
            .unwrap_err();
        assert!(matches!(err, LoadError::Csv { .. }));
    }

    #[test]
    fn invalid_record_reports_row() {
        let drivers = "id,name,vin,status\n\
            1,Driver 1,12345678901234567,UNAVAILABLE\n\
            2,Driver 2,SHORT,AVAILABLE\n";
        let err = load_from_readers(PASSENGERS.as_bytes(), drivers.as_bytes(), TRIPS.as_bytes())
            .unwrap_err();
        match err {
            LoadError::Record {
                path,
                record,
                source,
            } => {
                assert_eq!(path, PathBuf::from(DRIVERS_FILE));
                assert_eq!(record, 2);
                assert!(matches!(source, RecordError::InvalidField { field: "vin", .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unresolved_reference_aborts_load() {
        let trips = "id,driver_id,passenger_id,start_time,end_time,cost,rating\n\
            1,1,9,2018-05-25 11:52:40 -0700,2018-05-25 12:25:00 -0700,10.0,5\n";
        let err = load_from_readers(PASSENGERS.as_bytes(), DRIVERS.as_bytes(), trips.as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Dispatch(DispatchError::UnresolvedReference { kind: "passenger", id: 9, .. })
        ));
    }

    #[test]
    fn fixture_directory_loads() {
        let d = load_directory(fixture_dir()).unwrap();

        assert_eq!(d.passengers().len(), 8);
        assert_eq!(d.passengers()[0].name(), "Passenger 1");
        assert_eq!(d.passengers()[7].name(), "Passenger 8");

        let drivers = d.drivers();
        assert_eq!(drivers.len(), 3);
        assert_eq!(drivers[0].name(), "Driver 1 (unavailable)");
        assert_eq!(drivers[0].status(), DriverStatus::Unavailable);
        assert_eq!(drivers[2].name(), "Driver 3 (no trips)");
        assert_eq!(drivers[2].status(), DriverStatus::Available);

        for trip in d.trips() {
            assert!(d.passenger(trip.passenger()).unwrap().trips().contains(&trip.id()));
            assert!(d.driver(trip.driver()).unwrap().trips().contains(&trip.id()));
        }
    }

    #[test]
    fn fixture_request_trip_picks_driver_without_trips() {
        let mut d = load_directory(fixture_dir()).unwrap();
        let trip = d.request_trip(1).unwrap();
        assert_eq!(trip.driver().get(), 3);
    }
}
