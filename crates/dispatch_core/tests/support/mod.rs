#![allow(dead_code)]

use std::path::PathBuf;

use dispatch_core::clock::DispatchClock;
use dispatch_core::dispatcher::TripDispatcher;

/// Noon on the fixture day, after every historical trip in `tests/data`.
pub const NOON_MS: u64 = 1_709_553_600_000;

/// Directory holding the checked-in fixture CSVs.
pub fn fixture_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
}

/// Dispatcher over the checked-in fixtures with a fixed clock at [NOON_MS].
pub fn dispatcher_from_fixtures() -> TripDispatcher {
    TripDispatcher::from_data_dir(fixture_data_dir(), DispatchClock::fixed(NOON_MS))
        .expect("fixture data loads")
}
