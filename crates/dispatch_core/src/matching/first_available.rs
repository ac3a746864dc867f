use bevy_ecs::prelude::Entity;

use super::policy::DispatchPolicy;
use super::types::DriverCandidate;

/// Baseline policy: take the first available driver in roster order,
/// ignoring trip history. Useful as a comparison point and for deterministic
/// fixtures.
#[derive(Debug, Default)]
pub struct FirstAvailable;

impl DispatchPolicy for FirstAvailable {
    fn select(&self, candidates: &[DriverCandidate]) -> Option<Entity> {
        candidates.first().map(|candidate| candidate.entity)
    }
}
