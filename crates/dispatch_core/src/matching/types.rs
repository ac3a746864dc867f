use bevy_ecs::prelude::Entity;

/// One available driver offered to a dispatch policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverCandidate {
    pub entity: Entity,
    /// Start time of the driver's most recent trip (epoch ms); `None` for
    /// drivers with no trip history.
    pub last_started_at: Option<u64>,
}
