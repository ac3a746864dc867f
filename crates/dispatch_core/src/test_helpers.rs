//! Shared fixtures for tests: a small three-driver network with history.

use std::path::Path;

use crate::clock::DispatchClock;
use crate::dispatcher::TripDispatcher;
use crate::error::DispatchError;
use crate::records::{DriverRecord, PassengerRecord, TripRecord};

/// Fixed "now" used by fixture dispatchers: 2024-03-04T12:00:00Z, after every
/// historical trip in [sample_records].
pub const T0_MS: u64 = 1_709_553_600_000;

/// A valid 17-character VIN.
pub const TEST_VIN: &str = "1C9EVBRM0YBC564DZ";

/// Records for a small network:
///
/// - driver 1 (unavailable, one completed trip), driver 2 (available, one
///   completed trip), driver 3 (available, no trips)
/// - passengers 1 and 2
/// - completed trips 1 (driver 1) and 2 (driver 2)
pub fn sample_records() -> (Vec<DriverRecord>, Vec<PassengerRecord>, Vec<TripRecord>) {
    let drivers = vec![
        DriverRecord {
            id: 1,
            name: "Bernardo Prosacco".into(),
            vin: TEST_VIN.into(),
            status: "UNAVAILABLE".into(),
        },
        DriverRecord {
            id: 2,
            name: "Emory Rosenbaum".into(),
            vin: "WBWSS52P9NEYLVDE9".into(),
            status: "AVAILABLE".into(),
        },
        DriverRecord {
            id: 3,
            name: "Daryl Nitzsche".into(),
            vin: "SATIVWGTYAGIFP2S3".into(),
            status: "AVAILABLE".into(),
        },
    ];

    let passengers = vec![
        PassengerRecord {
            id: 1,
            name: "Nina Hintz Sr.".into(),
            phone: "560.815.3059".into(),
        },
        PassengerRecord {
            id: 2,
            name: "Jerome Botsford".into(),
            phone: "(545) 810-8193".into(),
        },
    ];

    let trips = vec![
        TripRecord {
            id: 1,
            driver_id: 1,
            passenger_id: 1,
            start_time: "2024-03-04T08:00:00+00:00".into(),
            end_time: Some("2024-03-04T08:30:00+00:00".into()),
            cost: Some(12.50),
            rating: Some(5),
        },
        TripRecord {
            id: 2,
            driver_id: 2,
            passenger_id: 2,
            start_time: "2024-03-04T08:30:00+00:00".into(),
            end_time: Some("2024-03-04T09:15:00+00:00".into()),
            cost: Some(23.45),
            rating: Some(4),
        },
    ];

    (drivers, passengers, trips)
}

/// Dispatcher over [sample_records] with a fixed clock at [T0_MS].
pub fn test_dispatcher() -> TripDispatcher {
    let (drivers, passengers, trips) = sample_records();
    TripDispatcher::from_records(&drivers, &passengers, &trips, DispatchClock::fixed(T0_MS))
        .expect("fixture records are valid")
}

/// Write [sample_records] as `drivers.csv`, `passengers.csv`, and `trips.csv`
/// under `dir`.
pub fn write_sample_csvs(dir: impl AsRef<Path>) -> Result<(), DispatchError> {
    let dir = dir.as_ref();
    let (drivers, passengers, trips) = sample_records();

    let mut writer = csv::Writer::from_path(dir.join("drivers.csv"))?;
    for record in &drivers {
        writer.serialize(record)?;
    }
    writer.flush()?;

    let mut writer = csv::Writer::from_path(dir.join("passengers.csv"))?;
    for record in &passengers {
        writer.serialize(record)?;
    }
    writer.flush()?;

    let mut writer = csv::Writer::from_path(dir.join("trips.csv"))?;
    for record in &trips {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
