use bevy_ecs::prelude::Entity;

use super::types::DriverCandidate;

/// Trait for policies that pick which available driver serves the next trip.
pub trait DispatchPolicy: Send + Sync {
    /// Pick a driver from the candidates, or `None` when none qualifies.
    /// Candidates arrive in the dispatcher's roster order.
    fn select(&self, candidates: &[DriverCandidate]) -> Option<Entity>;
}
