//! This module contains all the constants used by the games.

use std::time::Duration;

/// The cadence the host is expected to drive continuous games at.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The length of one countdown unit.
pub const COUNTDOWN_UNIT: Duration = Duration::from_secs(1);

pub mod maze {
    /// The size of each cell, in pixels.
    pub const CELL_SIZE: u32 = 32;
    /// Distance covered by one accepted movement request, in pixels.
    pub const STEP_SIZE: f32 = 8.0;
    /// Full extents (diameters) used for the proximity tests.
    pub const ACTOR_SIZE: f32 = 20.0;
    pub const COLLECTIBLE_SIZE: f32 = 16.0;
    pub const OBSTACLE_SIZE: f32 = 24.0;
    pub const COLLECTIBLE_POINTS: u32 = 10;
    pub const LIVES: u8 = 3;
    /// Seconds after which the completion bonus is exhausted.
    pub const TIME_BUDGET_SECS: u32 = 120;
    /// Bonus points per second left in the budget.
    pub const BONUS_RATE: u32 = 10;
}

pub mod dots {
    use std::time::Duration;

    /// Pointer positions within this distance of a waypoint snap to it.
    pub const SNAP_RADIUS: f32 = 24.0;
    /// Delay between solving a puzzle and showing the next one.
    pub const ADVANCE_DELAY: Duration = Duration::from_millis(1500);
    pub const TIME_BUDGET_SECS: u32 = 180;
}

pub mod waste {
    use std::time::Duration;

    pub const TIME_BUDGET_SECS: u32 = 60;
    pub const PENALTY: u32 = 5;
    /// How long a sorted item stays on screen before the queue advances.
    pub const FEEDBACK_DELAY: Duration = Duration::from_millis(800);
    /// A session succeeds when accuracy is strictly above this ratio.
    pub const ACCURACY_THRESHOLD: f32 = 0.8;
    /// Items visible after the current one.
    pub const LOOKAHEAD: usize = 2;
}
