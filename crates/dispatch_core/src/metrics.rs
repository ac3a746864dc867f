//! Derived metrics: per-driver earnings, per-passenger spend, and a
//! network-wide summary.
//!
//! Functions take the dispatcher's [World] plus the entity's component so
//! they can chase trip references without owning anything.

use bevy_ecs::prelude::{Entity, World};

use crate::clock::ONE_HOUR_MS;
use crate::dispatcher::TripDispatcher;
use crate::ecs::{Driver, Passenger, Trip};
use crate::pricing::{driver_take, round2};

fn trips<'a>(world: &'a World, handles: &'a [Entity]) -> impl Iterator<Item = &'a Trip> {
    handles
        .iter()
        .filter_map(move |&entity| world.get::<Trip>(entity))
}

/// Mean rating over the driver's rated trips; `0.0` when nothing is rated yet
/// (never NaN).
pub fn driver_average_rating(world: &World, driver: &Driver) -> f64 {
    let (count, total) = trips(world, &driver.trips)
        .filter_map(|trip| trip.rating)
        .fold((0u32, 0u32), |(count, total), rating| {
            (count + 1, total + u32::from(rating))
        });
    if count == 0 {
        return 0.0;
    }
    f64::from(total) / f64::from(count)
}

/// Driver earnings across completed trips, after the platform's cut, rounded
/// to cents.
pub fn driver_total_revenue(world: &World, driver: &Driver) -> f64 {
    let total: f64 = trips(world, &driver.trips)
        .filter_map(|trip| trip.fare)
        .map(driver_take)
        .sum();
    round2(total)
}

/// Revenue per hour behind the wheel, rounded to cents. Returns `0.0` when
/// the driver has no completed trip time (the zero sentinel, rather than a
/// division error).
pub fn driver_average_hourly_revenue(world: &World, driver: &Driver) -> f64 {
    let total_ms: u64 = trips(world, &driver.trips)
        .filter_map(|trip| trip.duration_ms())
        .sum();
    if total_ms == 0 {
        return 0.0;
    }
    let hours = total_ms as f64 / ONE_HOUR_MS as f64;
    round2(driver_total_revenue(world, driver) / hours)
}

/// The driver of each of the passenger's trips, in trip order. A driver who
/// served the passenger twice appears twice.
pub fn passenger_drivers(world: &World, passenger: &Passenger) -> Vec<Entity> {
    trips(world, &passenger.trips)
        .map(|trip| trip.driver)
        .collect()
}

/// Total fares the passenger has paid. In-progress trips have no fare yet and
/// are skipped, not counted as zero.
pub fn passenger_total_spent(world: &World, passenger: &Passenger) -> f64 {
    trips(world, &passenger.trips)
        .filter_map(|trip| trip.fare)
        .sum()
}

/// Total time the passenger has spent riding, in milliseconds. In-progress
/// trips contribute nothing until they complete.
pub fn passenger_total_time_ms(world: &World, passenger: &Passenger) -> u64 {
    trips(world, &passenger.trips)
        .filter_map(|trip| trip.duration_ms())
        .sum()
}

/// Aggregates over the whole network, for reports and the CLI.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NetworkSummary {
    pub drivers: usize,
    pub available_drivers: usize,
    pub passengers: usize,
    pub trips: usize,
    pub completed_trips: usize,
    pub in_progress_trips: usize,
    /// Sum of fares across completed trips, rounded to cents.
    pub total_fares: f64,
    /// Driver earnings after the platform's cut, rounded to cents.
    pub driver_payouts: f64,
    /// What the platform kept, rounded to cents.
    pub platform_take: f64,
    /// Mean rating across all rated trips; `0.0` with none.
    pub average_rating: f64,
}

impl NetworkSummary {
    pub fn compute(dispatcher: &TripDispatcher) -> Self {
        let world = dispatcher.world();
        let available_drivers = dispatcher
            .drivers()
            .iter()
            .filter_map(|&entity| world.get::<Driver>(entity))
            .filter(|driver| driver.is_available())
            .count();

        let mut completed_trips = 0;
        let mut total_fares = 0.0;
        let mut payouts = 0.0;
        let mut rating_count = 0u32;
        let mut rating_total = 0u32;
        for trip in trips(world, dispatcher.trips()) {
            if let Some(fare) = trip.fare {
                completed_trips += 1;
                total_fares += fare;
                payouts += driver_take(fare);
            }
            if let Some(rating) = trip.rating {
                rating_count += 1;
                rating_total += u32::from(rating);
            }
        }

        Self {
            drivers: dispatcher.drivers().len(),
            available_drivers,
            passengers: dispatcher.passengers().len(),
            trips: dispatcher.trips().len(),
            completed_trips,
            in_progress_trips: dispatcher.trips().len() - completed_trips,
            total_fares: round2(total_fares),
            driver_payouts: round2(payouts),
            platform_take: round2(total_fares - payouts),
            average_rating: if rating_count == 0 {
                0.0
            } else {
                f64::from(rating_total) / f64::from(rating_count)
            },
        }
    }
}
