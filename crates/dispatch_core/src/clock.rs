use std::time::{SystemTime, UNIX_EPOCH};

use bevy_ecs::prelude::Resource;

pub const ONE_SEC_MS: u64 = 1_000;
pub const ONE_MIN_MS: u64 = 60 * ONE_SEC_MS;
pub const ONE_HOUR_MS: u64 = 60 * ONE_MIN_MS;

/// Time source for the dispatcher, in epoch milliseconds.
///
/// Defaults to the wall clock. Tests construct a [DispatchClock::fixed] clock
/// so that trip start times are deterministic and can be advanced explicitly.
#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct DispatchClock {
    fixed_now_ms: Option<u64>,
}

impl DispatchClock {
    pub fn wall() -> Self {
        Self { fixed_now_ms: None }
    }

    /// A clock pinned at `now_ms`; advances only via [DispatchClock::advance_secs].
    pub fn fixed(now_ms: u64) -> Self {
        Self {
            fixed_now_ms: Some(now_ms),
        }
    }

    /// Current time in epoch milliseconds. A wall clock before the unix epoch
    /// clamps to 0.
    pub fn now_ms(&self) -> u64 {
        match self.fixed_now_ms {
            Some(ms) => ms,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_millis() as u64),
        }
    }

    /// Move a fixed clock forward. No-op on a wall clock.
    pub fn advance_secs(&mut self, secs: u64) {
        if let Some(ms) = self.fixed_now_ms.as_mut() {
            *ms += secs * ONE_SEC_MS;
        }
    }
}
