//! Raw tabular records and the CSV readers that produce them.
//!
//! Records carry fields exactly as they appear on disk; the dispatcher turns
//! them into entities and wires cross-references by id.

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// One row of `drivers.csv`: `id,name,vin,status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverRecord {
    pub id: u64,
    pub name: String,
    pub vin: String,
    pub status: String,
}

/// One row of `passengers.csv`: `id,name,phone`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassengerRecord {
    pub id: u64,
    pub name: String,
    pub phone: String,
}

/// One row of `trips.csv`: `id,driver_id,passenger_id,start_time,end_time,cost,rating`.
///
/// `end_time`, `cost`, and `rating` are empty for in-progress trips. The
/// dispatcher rejects rows where only some of the three are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: u64,
    pub driver_id: u64,
    pub passenger_id: u64,
    pub start_time: String,
    pub end_time: Option<String>,
    pub cost: Option<f64>,
    pub rating: Option<u8>,
}

pub fn read_drivers(path: impl AsRef<Path>) -> Result<Vec<DriverRecord>, DispatchError> {
    read_records(path)
}

pub fn read_passengers(path: impl AsRef<Path>) -> Result<Vec<PassengerRecord>, DispatchError> {
    read_records(path)
}

pub fn read_trips(path: impl AsRef<Path>) -> Result<Vec<TripRecord>, DispatchError> {
    read_records(path)
}

fn read_records<T>(path: impl AsRef<Path>) -> Result<Vec<T>, DispatchError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// Parse an RFC 3339 timestamp into epoch milliseconds.
pub fn parse_timestamp_ms(value: &str) -> Result<u64, DispatchError> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .map_err(|err| DispatchError::Load(format!("bad timestamp {value:?}: {err}")))?;
    let ms = parsed.timestamp_millis();
    if ms < 0 {
        return Err(DispatchError::Load(format!(
            "timestamp {value:?} is before the unix epoch"
        )));
    }
    Ok(ms as u64)
}

/// Render epoch milliseconds as an RFC 3339 UTC timestamp.
pub fn format_timestamp_ms(ms: u64) -> String {
    match Utc.timestamp_millis_opt(ms as i64).single() {
        Some(ts) => ts.to_rfc3339(),
        None => format!("{ms}ms"),
    }
}
