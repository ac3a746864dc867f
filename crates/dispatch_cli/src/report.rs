//! Text and JSON reports over a loaded network.

use std::error::Error;
use std::path::Path;

use dispatch_core::clock::{DispatchClock, ONE_MIN_MS};
use dispatch_core::dispatcher::TripDispatcher;
use dispatch_core::metrics::{
    driver_average_hourly_revenue, driver_average_rating, driver_total_revenue,
    passenger_total_spent, passenger_total_time_ms, NetworkSummary,
};
use dispatch_core::records::format_timestamp_ms;

fn load(data_dir: &Path) -> Result<TripDispatcher, Box<dyn Error>> {
    Ok(TripDispatcher::from_data_dir(data_dir, DispatchClock::wall())?)
}

pub fn summary(data_dir: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let dispatcher = load(data_dir)?;
    let summary = NetworkSummary::compute(&dispatcher);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "drivers: {} ({} available)",
        summary.drivers, summary.available_drivers
    );
    println!("passengers: {}", summary.passengers);
    println!(
        "trips: {} ({} completed, {} in progress)",
        summary.trips, summary.completed_trips, summary.in_progress_trips
    );
    println!("total fares: {:.2}", summary.total_fares);
    println!("driver payouts: {:.2}", summary.driver_payouts);
    println!("platform take: {:.2}", summary.platform_take);
    println!("average rating: {:.2}", summary.average_rating);
    Ok(())
}

pub fn drivers(data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let dispatcher = load(data_dir)?;
    let world = dispatcher.world();

    println!(
        "{:>4}  {:<24} {:<12} {:>5} {:>7} {:>9} {:>9}",
        "id", "name", "status", "trips", "rating", "revenue", "per hour"
    );
    for &entity in dispatcher.drivers() {
        let Some(driver) = dispatcher.driver(entity) else {
            continue;
        };
        println!(
            "{:>4}  {:<24} {:<12} {:>5} {:>7.2} {:>9.2} {:>9.2}",
            driver.id,
            driver.name,
            driver.status.as_str(),
            driver.trips.len(),
            driver_average_rating(world, driver),
            driver_total_revenue(world, driver),
            driver_average_hourly_revenue(world, driver),
        );
    }
    Ok(())
}

pub fn passengers(data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let dispatcher = load(data_dir)?;
    let world = dispatcher.world();

    println!(
        "{:>4}  {:<24} {:>5} {:>9} {:>11}",
        "id", "name", "trips", "spent", "ride (min)"
    );
    for &entity in dispatcher.passengers() {
        let Some(passenger) = dispatcher.passenger(entity) else {
            continue;
        };
        println!(
            "{:>4}  {:<24} {:>5} {:>9.2} {:>11}",
            passenger.id,
            passenger.name,
            passenger.trips.len(),
            passenger_total_spent(world, passenger),
            passenger_total_time_ms(world, passenger) / ONE_MIN_MS,
        );
    }
    Ok(())
}

pub fn request(data_dir: &Path, passenger_id: u64, count: u32) -> Result<(), Box<dyn Error>> {
    let mut dispatcher = load(data_dir)?;

    for _ in 0..count {
        match dispatcher.request_trip(passenger_id)? {
            Some(trip_entity) => {
                let trip = dispatcher.trip(trip_entity).expect("created trip");
                let driver = dispatcher.driver(trip.driver).expect("assigned driver");
                println!(
                    "trip {} assigned to {} (driver {}), started {}",
                    trip.id,
                    driver.name,
                    driver.id,
                    format_timestamp_ms(trip.started_at)
                );
            }
            None => {
                println!("no drivers available");
                break;
            }
        }
    }
    Ok(())
}
