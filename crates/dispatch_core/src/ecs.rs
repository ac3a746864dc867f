use bevy_ecs::prelude::{Component, Entity};

use crate::error::DispatchError;

/// Vehicle identification numbers are always 17 characters.
pub const VIN_LEN: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatus {
    Available,
    Unavailable,
}

impl DriverStatus {
    pub fn parse(value: &str) -> Result<Self, DispatchError> {
        match value {
            "AVAILABLE" => Ok(DriverStatus::Available),
            "UNAVAILABLE" => Ok(DriverStatus::Unavailable),
            other => Err(DispatchError::Load(format!(
                "unknown driver status {other:?}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Available => "AVAILABLE",
            DriverStatus::Unavailable => "UNAVAILABLE",
        }
    }
}

/// A driver and the trips assigned to them, in assignment order.
///
/// The `trips` list holds non-owning [Entity] references into the dispatcher's
/// world; the dispatcher keeps the driver-side, passenger-side, and roster
/// links consistent.
#[derive(Debug, Clone, Component)]
pub struct Driver {
    pub id: u64,
    pub name: String,
    pub vehicle_id: String,
    pub status: DriverStatus,
    pub trips: Vec<Entity>,
}

impl Driver {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        vehicle_id: impl Into<String>,
        status: DriverStatus,
    ) -> Result<Self, DispatchError> {
        if id == 0 {
            return Err(DispatchError::InvalidArgument(
                "driver id must be positive".into(),
            ));
        }
        let vehicle_id = vehicle_id.into();
        if vehicle_id.chars().count() != VIN_LEN {
            return Err(DispatchError::InvalidArgument(format!(
                "vehicle id must be exactly {VIN_LEN} characters (got {:?})",
                vehicle_id
            )));
        }
        Ok(Self {
            id,
            name: name.into(),
            vehicle_id,
            status,
            trips: Vec::new(),
        })
    }

    /// Append a trip to this driver's history. Passenger-side and roster
    /// linkage is the dispatcher's responsibility.
    pub fn add_trip(&mut self, trip: Entity) {
        self.trips.push(trip);
    }

    /// Append a trip and take the driver off the market.
    pub fn start_new_trip(&mut self, trip: Entity) {
        self.add_trip(trip);
        self.status = DriverStatus::Unavailable;
    }

    pub fn is_available(&self) -> bool {
        self.status == DriverStatus::Available
    }
}

/// A passenger and the trips they have requested, in request order.
#[derive(Debug, Clone, Component)]
pub struct Passenger {
    pub id: u64,
    pub name: String,
    pub phone_number: String,
    pub trips: Vec<Entity>,
}

impl Passenger {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Result<Self, DispatchError> {
        if id == 0 {
            return Err(DispatchError::InvalidArgument(
                "passenger id must be positive".into(),
            ));
        }
        Ok(Self {
            id,
            name: name.into(),
            phone_number: phone_number.into(),
            trips: Vec::new(),
        })
    }

    pub fn add_trip(&mut self, trip: Entity) {
        self.trips.push(trip);
    }
}

/// One trip. In-progress trips have no completion time, fare, or rating;
/// completed trips have all three. Timestamps are epoch milliseconds.
///
/// `passenger` is `None` only for directly-constructed historical fixtures;
/// dispatcher-created trips always carry one.
#[derive(Debug, Clone, Component)]
pub struct Trip {
    pub id: u64,
    pub driver: Entity,
    pub passenger: Option<Entity>,
    pub started_at: u64,
    pub completed_at: Option<u64>,
    pub fare: Option<f64>,
    pub rating: Option<u8>,
}

impl Trip {
    pub fn in_progress(
        id: u64,
        driver: Entity,
        passenger: Option<Entity>,
        started_at: u64,
    ) -> Self {
        Self {
            id,
            driver,
            passenger,
            started_at,
            completed_at: None,
            fare: None,
            rating: None,
        }
    }

    pub fn completed(
        id: u64,
        driver: Entity,
        passenger: Option<Entity>,
        started_at: u64,
        completed_at: u64,
        fare: f64,
        rating: u8,
    ) -> Result<Self, DispatchError> {
        if completed_at < started_at {
            return Err(DispatchError::InvalidArgument(format!(
                "trip {id} ends before it starts ({completed_at} < {started_at})"
            )));
        }
        Ok(Self {
            id,
            driver,
            passenger,
            started_at,
            completed_at: Some(completed_at),
            fare: Some(fare),
            rating: Some(rating),
        })
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Trip duration in milliseconds; `None` while the trip is in progress.
    pub fn duration_ms(&self) -> Option<u64> {
        self.completed_at.map(|end| end - self.started_at)
    }
}
