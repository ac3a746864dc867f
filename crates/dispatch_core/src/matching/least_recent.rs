use bevy_ecs::prelude::Entity;

use super::policy::DispatchPolicy;
use super::types::DriverCandidate;

/// Least-recently-active dispatch: reward the driver who has waited longest.
///
/// Selection order:
///
/// 1. Drivers with no trip history come first (treated as infinitely idle)
/// 2. Among drivers with history, the one whose most recent trip has the
///    earliest start time wins
/// 3. Ties go to the earliest candidate in roster order
///
/// `Option<u64>` ordering gives (1) and (2) directly: `None` sorts before
/// every `Some`.
#[derive(Debug, Default)]
pub struct LeastRecentlyActive;

impl DispatchPolicy for LeastRecentlyActive {
    fn select(&self, candidates: &[DriverCandidate]) -> Option<Entity> {
        candidates
            .iter()
            .enumerate()
            .min_by_key(|(index, candidate)| (candidate.last_started_at, *index))
            .map(|(_, candidate)| candidate.entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(raw: u32, last_started_at: Option<u64>) -> DriverCandidate {
        DriverCandidate {
            entity: Entity::from_raw(raw),
            last_started_at,
        }
    }

    #[test]
    fn empty_candidate_list_selects_nobody() {
        assert_eq!(LeastRecentlyActive.select(&[]), None);
    }

    #[test]
    fn zero_trip_driver_beats_any_history() {
        let picked = LeastRecentlyActive.select(&[
            candidate(1, Some(5)),
            candidate(2, None),
            candidate(3, Some(1)),
        ]);
        assert_eq!(picked, Some(Entity::from_raw(2)));
    }

    #[test]
    fn oldest_most_recent_trip_wins() {
        let picked = LeastRecentlyActive.select(&[
            candidate(1, Some(300)),
            candidate(2, Some(100)),
            candidate(3, Some(200)),
        ]);
        assert_eq!(picked, Some(Entity::from_raw(2)));
    }

    #[test]
    fn ties_break_by_roster_order() {
        let picked = LeastRecentlyActive.select(&[
            candidate(9, Some(100)),
            candidate(4, Some(100)),
        ]);
        assert_eq!(picked, Some(Entity::from_raw(9)));

        let picked = LeastRecentlyActive.select(&[candidate(7, None), candidate(2, None)]);
        assert_eq!(picked, Some(Entity::from_raw(7)));
    }
}
