//! Seeded synthetic fixture generation.
//!
//! Produces a loadable `drivers.csv` / `passengers.csv` / `trips.csv` triple
//! with realistic shapes: 17-character VINs, mixed driver availability, and a
//! mostly-completed trip history sorted by start time.

use std::error::Error;
use std::fs;
use std::path::Path;

use dispatch_core::clock::ONE_MIN_MS;
use dispatch_core::pricing::round2;
use dispatch_core::records::{format_timestamp_ms, DriverRecord, PassengerRecord, TripRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Midnight on the fixture day (2024-03-04T00:00:00Z).
const DAY_START_MS: u64 = 1_709_510_400_000;

const FIRST_NAMES: &[&str] = &[
    "Nina", "Jerome", "Ada", "Minnie", "Emory", "Daryl", "Jannie", "Mohammed", "Isom", "Antwan",
    "Bernardo", "Hyman",
];

const LAST_NAMES: &[&str] = &[
    "Hintz", "Botsford", "Farrell", "Dach", "Rosenbaum", "Nitzsche", "Lubowitz", "Barrows",
    "Gleason", "Prosacco", "Larkin", "Wolf",
];

const VIN_CHARS: &[u8] = b"ABCDEFGHJKLMNPRSTUVWXYZ0123456789";

fn full_name(rng: &mut StdRng) -> String {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    format!("{first} {last}")
}

fn vin(rng: &mut StdRng) -> String {
    (0..dispatch_core::ecs::VIN_LEN)
        .map(|_| VIN_CHARS[rng.gen_range(0..VIN_CHARS.len())] as char)
        .collect()
}

fn phone(rng: &mut StdRng) -> String {
    format!(
        "{:03}-{:03}-{:04}",
        rng.gen_range(200..999),
        rng.gen_range(100..999),
        rng.gen_range(0..10_000)
    )
}

pub fn generate(
    out: &Path,
    drivers: usize,
    passengers: usize,
    trips: usize,
    seed: u64,
) -> Result<(), Box<dyn Error>> {
    if drivers == 0 || passengers == 0 {
        return Err("need at least one driver and one passenger".into());
    }
    fs::create_dir_all(out)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let driver_records: Vec<DriverRecord> = (1..=drivers as u64)
        .map(|id| DriverRecord {
            id,
            name: full_name(&mut rng),
            vin: vin(&mut rng),
            status: if rng.gen_bool(0.75) {
                "AVAILABLE".into()
            } else {
                "UNAVAILABLE".into()
            },
        })
        .collect();

    let passenger_records: Vec<PassengerRecord> = (1..=passengers as u64)
        .map(|id| PassengerRecord {
            id,
            name: full_name(&mut rng),
            phone: phone(&mut rng),
        })
        .collect();

    let mut trip_records: Vec<TripRecord> = (0..trips)
        .map(|_| {
            let started_at = DAY_START_MS + rng.gen_range(0..18 * 60) * ONE_MIN_MS;
            let completed = rng.gen_bool(0.85);
            let (end_time, cost, rating) = if completed {
                let duration = rng.gen_range(5..=90) * ONE_MIN_MS;
                (
                    Some(format_timestamp_ms(started_at + duration)),
                    Some(round2(rng.gen_range(4.0..60.0))),
                    Some(rng.gen_range(1..=5)),
                )
            } else {
                (None, None, None)
            };
            TripRecord {
                id: 0, // assigned after sorting
                driver_id: rng.gen_range(1..=drivers as u64),
                passenger_id: rng.gen_range(1..=passengers as u64),
                start_time: format_timestamp_ms(started_at),
                end_time,
                cost,
                rating,
            }
        })
        .collect();

    trip_records.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    for (index, record) in trip_records.iter_mut().enumerate() {
        record.id = index as u64 + 1;
    }

    write_csv(&out.join("drivers.csv"), &driver_records)?;
    write_csv(&out.join("passengers.csv"), &passenger_records)?;
    write_csv(&out.join("trips.csv"), &trip_records)?;

    println!(
        "wrote {} drivers, {} passengers, {} trips to {}",
        driver_records.len(),
        passenger_records.len(),
        trip_records.len(),
        out.display()
    );
    Ok(())
}

fn write_csv<T: serde::Serialize>(path: &Path, records: &[T]) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
