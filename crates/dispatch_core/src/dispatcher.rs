//! Trip dispatcher: owns the network graph and runs the trip-request workflow.
//!
//! The dispatcher is the sole owner of the [World] holding every driver,
//! passenger, and trip. Entities reference each other with non-owning
//! [Entity] handles; all linkage goes through `&mut self`, so no partially
//! linked trip is ever observable.

use std::collections::HashMap;
use std::path::Path;

use bevy_ecs::prelude::{Entity, World};

use crate::clock::DispatchClock;
use crate::ecs::{Driver, DriverStatus, Passenger, Trip};
use crate::error::{DispatchError, EntityKind};
use crate::matching::{DispatchPolicy, DriverCandidate, LeastRecentlyActive};
use crate::records::{
    parse_timestamp_ms, read_drivers, read_passengers, read_trips, DriverRecord, PassengerRecord,
    TripRecord,
};

pub struct TripDispatcher {
    world: World,
    drivers: Vec<Entity>,
    passengers: Vec<Entity>,
    trips: Vec<Entity>,
    drivers_by_id: HashMap<u64, Entity>,
    passengers_by_id: HashMap<u64, Entity>,
    next_trip_id: u64,
    policy: Box<dyn DispatchPolicy>,
}

impl std::fmt::Debug for TripDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripDispatcher")
            .field("drivers", &self.drivers)
            .field("passengers", &self.passengers)
            .field("trips", &self.trips)
            .field("drivers_by_id", &self.drivers_by_id)
            .field("passengers_by_id", &self.passengers_by_id)
            .field("next_trip_id", &self.next_trip_id)
            .finish_non_exhaustive()
    }
}

impl TripDispatcher {
    /// Build the network from raw records, wiring trips to their driver and
    /// passenger by id. Record order becomes roster order.
    pub fn from_records(
        driver_records: &[DriverRecord],
        passenger_records: &[PassengerRecord],
        trip_records: &[TripRecord],
        clock: DispatchClock,
    ) -> Result<Self, DispatchError> {
        let mut world = World::new();
        world.insert_resource(clock);

        let mut dispatcher = Self {
            world,
            drivers: Vec::with_capacity(driver_records.len()),
            passengers: Vec::with_capacity(passenger_records.len()),
            trips: Vec::with_capacity(trip_records.len()),
            drivers_by_id: HashMap::new(),
            passengers_by_id: HashMap::new(),
            next_trip_id: 1,
            policy: Box::new(LeastRecentlyActive),
        };

        for record in driver_records {
            let status = DriverStatus::parse(&record.status)?;
            let driver = Driver::new(record.id, record.name.clone(), record.vin.clone(), status)?;
            let entity = dispatcher.world.spawn(driver).id();
            if dispatcher.drivers_by_id.insert(record.id, entity).is_some() {
                return Err(DispatchError::Load(format!(
                    "duplicate driver id {}",
                    record.id
                )));
            }
            dispatcher.drivers.push(entity);
        }

        for record in passenger_records {
            let passenger =
                Passenger::new(record.id, record.name.clone(), record.phone.clone())?;
            let entity = dispatcher.world.spawn(passenger).id();
            if dispatcher
                .passengers_by_id
                .insert(record.id, entity)
                .is_some()
            {
                return Err(DispatchError::Load(format!(
                    "duplicate passenger id {}",
                    record.id
                )));
            }
            dispatcher.passengers.push(entity);
        }

        for record in trip_records {
            dispatcher.load_trip(record)?;
        }

        Ok(dispatcher)
    }

    /// Load `drivers.csv`, `passengers.csv`, and `trips.csv` from a directory.
    pub fn from_data_dir(
        dir: impl AsRef<Path>,
        clock: DispatchClock,
    ) -> Result<Self, DispatchError> {
        let dir = dir.as_ref();
        let drivers = read_drivers(dir.join("drivers.csv"))?;
        let passengers = read_passengers(dir.join("passengers.csv"))?;
        let trips = read_trips(dir.join("trips.csv"))?;
        Self::from_records(&drivers, &passengers, &trips, clock)
    }

    /// Replace the dispatch policy used by [TripDispatcher::request_trip].
    pub fn with_policy(mut self, policy: Box<dyn DispatchPolicy>) -> Self {
        self.policy = policy;
        self
    }

    fn load_trip(&mut self, record: &TripRecord) -> Result<(), DispatchError> {
        let driver_entity = self
            .drivers_by_id
            .get(&record.driver_id)
            .copied()
            .ok_or_else(|| {
                DispatchError::Load(format!(
                    "trip {} references unknown driver {}",
                    record.id, record.driver_id
                ))
            })?;
        let passenger_entity = self
            .passengers_by_id
            .get(&record.passenger_id)
            .copied()
            .ok_or_else(|| {
                DispatchError::Load(format!(
                    "trip {} references unknown passenger {}",
                    record.id, record.passenger_id
                ))
            })?;

        let started_at = parse_timestamp_ms(&record.start_time)?;
        let trip = match (&record.end_time, record.cost, record.rating) {
            (Some(end_time), Some(cost), Some(rating)) => Trip::completed(
                record.id,
                driver_entity,
                Some(passenger_entity),
                started_at,
                parse_timestamp_ms(end_time)?,
                cost,
                rating,
            )?,
            (None, None, None) => Trip::in_progress(
                record.id,
                driver_entity,
                Some(passenger_entity),
                started_at,
            ),
            _ => {
                return Err(DispatchError::Load(format!(
                    "trip {} has only some of end_time/cost/rating; \
                     a trip is either in progress or fully completed",
                    record.id
                )))
            }
        };

        let trip_entity = self.world.spawn(trip).id();
        if let Some(mut driver) = self.world.get_mut::<Driver>(driver_entity) {
            driver.add_trip(trip_entity);
        }
        if let Some(mut passenger) = self.world.get_mut::<Passenger>(passenger_entity) {
            passenger.add_trip(trip_entity);
        }
        self.trips.push(trip_entity);
        self.next_trip_id = self.next_trip_id.max(record.id + 1);
        Ok(())
    }

    /// Look up a driver by id. Zero ids are invalid arguments; a valid id with
    /// no match is a distinct [DispatchError::NotFound].
    pub fn find_driver(&self, id: u64) -> Result<Entity, DispatchError> {
        if id == 0 {
            return Err(DispatchError::InvalidArgument(
                "driver id must be positive".into(),
            ));
        }
        self.drivers_by_id
            .get(&id)
            .copied()
            .ok_or(DispatchError::NotFound(EntityKind::Driver, id))
    }

    /// Look up a passenger by id; same contract as [TripDispatcher::find_driver].
    pub fn find_passenger(&self, id: u64) -> Result<Entity, DispatchError> {
        if id == 0 {
            return Err(DispatchError::InvalidArgument(
                "passenger id must be positive".into(),
            ));
        }
        self.passengers_by_id
            .get(&id)
            .copied()
            .ok_or(DispatchError::NotFound(EntityKind::Passenger, id))
    }

    /// The available driver who has been idle the longest: no trip history
    /// first, then the earliest most-recent trip start, ties in roster order.
    /// `None` when nobody is available.
    pub fn find_least_recently_active_driver(&self) -> Option<Entity> {
        LeastRecentlyActive.select(&self.available_candidates())
    }

    /// Create a trip for the passenger using the configured dispatch policy.
    ///
    /// Returns `Ok(None)` when no driver is available; nothing is mutated in
    /// that case. On success the new in-progress trip is linked into the
    /// driver's, the passenger's, and the dispatcher's trip lists in one
    /// step, and the driver goes [DriverStatus::Unavailable].
    pub fn request_trip(&mut self, passenger_id: u64) -> Result<Option<Entity>, DispatchError> {
        let passenger_entity = self.find_passenger(passenger_id)?;

        let Some(driver_entity) = self.policy.select(&self.available_candidates()) else {
            return Ok(None);
        };

        let trip_id = self.next_trip_id;
        self.next_trip_id += 1;
        let started_at = self.now_ms();
        let trip = Trip::in_progress(trip_id, driver_entity, Some(passenger_entity), started_at);
        let trip_entity = self.world.spawn(trip).id();

        if let Some(mut driver) = self.world.get_mut::<Driver>(driver_entity) {
            driver.start_new_trip(trip_entity);
        }
        if let Some(mut passenger) = self.world.get_mut::<Passenger>(passenger_entity) {
            passenger.add_trip(trip_entity);
        }
        self.trips.push(trip_entity);

        Ok(Some(trip_entity))
    }

    fn available_candidates(&self) -> Vec<DriverCandidate> {
        self.drivers
            .iter()
            .filter_map(|&entity| {
                let driver = self.world.get::<Driver>(entity)?;
                if !driver.is_available() {
                    return None;
                }
                let last_started_at = driver
                    .trips
                    .iter()
                    .filter_map(|&trip| self.world.get::<Trip>(trip))
                    .map(|trip| trip.started_at)
                    .max();
                Some(DriverCandidate {
                    entity,
                    last_started_at,
                })
            })
            .collect()
    }

    pub fn drivers(&self) -> &[Entity] {
        &self.drivers
    }

    pub fn passengers(&self) -> &[Entity] {
        &self.passengers
    }

    /// All trips in load order; runtime trips are appended at the end.
    pub fn trips(&self) -> &[Entity] {
        &self.trips
    }

    pub fn driver(&self, entity: Entity) -> Option<&Driver> {
        self.world.get::<Driver>(entity)
    }

    pub fn passenger(&self, entity: Entity) -> Option<&Passenger> {
        self.world.get::<Passenger>(entity)
    }

    pub fn trip(&self, entity: Entity) -> Option<&Trip> {
        self.world.get::<Trip>(entity)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn now_ms(&self) -> u64 {
        self.world.resource::<DispatchClock>().now_ms()
    }

    /// Advance a fixed clock (no-op for wall clocks); used to separate trip
    /// start times deterministically.
    pub fn advance_clock_secs(&mut self, secs: u64) {
        self.world
            .resource_mut::<DispatchClock>()
            .advance_secs(secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_records, test_dispatcher, T0_MS};

    #[test]
    fn loads_rosters_in_record_order() {
        let dispatcher = test_dispatcher();
        let ids: Vec<u64> = dispatcher
            .drivers()
            .iter()
            .map(|&e| dispatcher.driver(e).expect("driver").id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let first = dispatcher
            .driver(dispatcher.drivers()[0])
            .expect("driver");
        assert_eq!(first.name, "Bernardo Prosacco");
        assert_eq!(first.status, DriverStatus::Unavailable);
    }

    #[test]
    fn wires_trips_into_both_sides() {
        let dispatcher = test_dispatcher();
        let trip_entity = dispatcher.trips()[0];
        let trip = dispatcher.trip(trip_entity).expect("trip");

        let driver = dispatcher.driver(trip.driver).expect("driver");
        assert!(driver.trips.contains(&trip_entity));

        let passenger_entity = trip.passenger.expect("passenger");
        let passenger = dispatcher.passenger(passenger_entity).expect("passenger");
        assert!(passenger.trips.contains(&trip_entity));
    }

    #[test]
    fn find_driver_rejects_zero_and_distinguishes_missing() {
        let dispatcher = test_dispatcher();
        assert!(matches!(
            dispatcher.find_driver(0),
            Err(DispatchError::InvalidArgument(_))
        ));
        assert!(matches!(
            dispatcher.find_driver(999),
            Err(DispatchError::NotFound(EntityKind::Driver, 999))
        ));
        let entity = dispatcher.find_driver(2).expect("driver");
        assert_eq!(dispatcher.driver(entity).expect("driver").id, 2);
    }

    #[test]
    fn find_passenger_has_the_same_contract() {
        let dispatcher = test_dispatcher();
        assert!(matches!(
            dispatcher.find_passenger(0),
            Err(DispatchError::InvalidArgument(_))
        ));
        assert!(matches!(
            dispatcher.find_passenger(999),
            Err(DispatchError::NotFound(EntityKind::Passenger, 999))
        ));
        assert!(dispatcher.find_passenger(1).is_ok());
    }

    #[test]
    fn trip_referencing_unknown_driver_fails_fast() {
        let (drivers, passengers, mut trips) = sample_records();
        trips[0].driver_id = 404;
        let err =
            TripDispatcher::from_records(&drivers, &passengers, &trips, DispatchClock::fixed(T0_MS));
        assert!(matches!(err, Err(DispatchError::Load(_))));
    }

    #[test]
    fn partially_completed_trip_row_fails_fast() {
        let (drivers, passengers, mut trips) = sample_records();
        trips[0].rating = None;
        let err =
            TripDispatcher::from_records(&drivers, &passengers, &trips, DispatchClock::fixed(T0_MS));
        assert!(matches!(err, Err(DispatchError::Load(_))));
    }

    #[test]
    fn duplicate_driver_id_fails_fast() {
        let (mut drivers, passengers, _) = sample_records();
        drivers[1].id = drivers[0].id;
        let err =
            TripDispatcher::from_records(&drivers, &passengers, &[], DispatchClock::fixed(T0_MS));
        assert!(matches!(err, Err(DispatchError::Load(_))));
    }

    #[test]
    fn requested_trip_is_linked_everywhere_and_driver_goes_unavailable() {
        let mut dispatcher = test_dispatcher();
        let before = dispatcher.trips().len();

        let trip_entity = dispatcher
            .request_trip(1)
            .expect("request")
            .expect("assignment");
        let trip = dispatcher.trip(trip_entity).expect("trip").clone();

        assert!(trip.completed_at.is_none());
        assert!(trip.fare.is_none());
        assert!(trip.rating.is_none());
        assert_eq!(trip.started_at, dispatcher.now_ms());

        let driver = dispatcher.driver(trip.driver).expect("driver");
        assert_eq!(driver.status, DriverStatus::Unavailable);
        assert!(driver.trips.contains(&trip_entity));

        let passenger = dispatcher
            .passenger(trip.passenger.expect("passenger"))
            .expect("passenger");
        assert!(passenger.trips.contains(&trip_entity));

        assert_eq!(dispatcher.trips().len(), before + 1);
        assert_eq!(dispatcher.trips().last(), Some(&trip_entity));
    }

    #[test]
    fn new_trip_ids_continue_past_loaded_ones() {
        let mut dispatcher = test_dispatcher();
        let max_loaded = dispatcher
            .trips()
            .iter()
            .map(|&e| dispatcher.trip(e).expect("trip").id)
            .max()
            .expect("loaded trips");
        let trip_entity = dispatcher
            .request_trip(1)
            .expect("request")
            .expect("assignment");
        assert_eq!(
            dispatcher.trip(trip_entity).expect("trip").id,
            max_loaded + 1
        );
    }

    #[test]
    fn request_trip_rejects_bad_passenger_ids() {
        let mut dispatcher = test_dispatcher();
        assert!(matches!(
            dispatcher.request_trip(0),
            Err(DispatchError::InvalidArgument(_))
        ));
        assert!(matches!(
            dispatcher.request_trip(300),
            Err(DispatchError::NotFound(EntityKind::Passenger, 300))
        ));
    }

    #[test]
    fn exhausting_drivers_returns_none_and_mutates_nothing() {
        let mut dispatcher = test_dispatcher();
        // 2 of the 3 fixture drivers start out available.
        assert!(dispatcher.request_trip(1).expect("request").is_some());
        assert!(dispatcher.request_trip(2).expect("request").is_some());

        let before = dispatcher.trips().len();
        assert!(dispatcher.request_trip(1).expect("request").is_none());
        assert_eq!(dispatcher.trips().len(), before);
    }

    #[test]
    fn least_recently_active_prefers_fresh_drivers_then_oldest_history() {
        let dispatcher = test_dispatcher();
        // Driver 3 has no trips; drivers 1 and 2 both have history.
        let picked = dispatcher
            .find_least_recently_active_driver()
            .expect("candidate");
        assert_eq!(dispatcher.driver(picked).expect("driver").id, 3);
    }

    #[test]
    fn successive_requests_rotate_through_the_fleet() {
        let mut dispatcher = test_dispatcher();
        let first = dispatcher
            .request_trip(1)
            .expect("request")
            .expect("assignment");
        dispatcher.advance_clock_secs(60);
        let second = dispatcher
            .request_trip(2)
            .expect("request")
            .expect("assignment");

        let first_driver = dispatcher.trip(first).expect("trip").driver;
        let second_driver = dispatcher.trip(second).expect("trip").driver;
        assert_ne!(first_driver, second_driver);
    }

    #[test]
    fn first_available_policy_ignores_history() {
        let (drivers, passengers, trips) = sample_records();
        let mut dispatcher = TripDispatcher::from_records(
            &drivers,
            &passengers,
            &trips,
            DispatchClock::fixed(T0_MS),
        )
        .expect("dispatcher")
        .with_policy(Box::new(crate::matching::FirstAvailable));

        let trip_entity = dispatcher
            .request_trip(1)
            .expect("request")
            .expect("assignment");
        let driver = dispatcher
            .driver(dispatcher.trip(trip_entity).expect("trip").driver)
            .expect("driver");
        // Roster order, not idleness: driver 2 is the first available.
        assert_eq!(driver.id, 2);
    }
}
