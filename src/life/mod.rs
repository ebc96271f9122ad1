//! Life tracking core.
//!
//! - [`grouper`]: coalesces bursts of taps into committed history events
//! - [`arc`] / [`color`]: life total → arc gauge angles and colour
//! - [`session`]: owns one grouper per seat for the active player mode
//! - [`history`]: merged and formatted history rows for the history view
//!
//! Everything here is pure and clock-agnostic: callers pass monotonic
//! milliseconds in, so the same code runs under Embassy and in host tests.

pub mod arc;
pub mod color;
pub mod grouper;
pub mod history;
pub mod session;


pub use arc::{ArcLayout, ArcSegment, DuelLayout};
pub use grouper::EventGrouper;
pub use session::GameSession;

/// Seat that produced a life change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerId {
    /// The only seat in one-player mode.
    Single,
    /// Left seat in two-player mode.
    One,
    /// Right seat in two-player mode.
    Two,
}

/// Both clocks a life change is stamped with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Moment {
    /// Monotonic milliseconds since boot.
    pub uptime_ms: u64,
    /// Seconds on the game clock (stopwatch), shown in the history view.
    pub game_secs: u32,
}

impl Moment {
    pub const fn new(uptime_ms: u64, game_secs: u32) -> Self {
        Self {
            uptime_ms,
            game_secs,
        }
    }

    /// A moment with the game clock still at zero.
    pub const fn at(uptime_ms: u64) -> Self {
        Self::new(uptime_ms, 0)
    }
}

/// One committed burst of life changes. Never mutated after commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LifeHistoryEvent {
    /// Signed sum of every delta in the burst.
    pub net_life_change: i32,
    /// Total right after the burst was applied.
    pub life_total: i32,
    pub player_id: PlayerId,
    /// Uptime (ms) of the last delta in the burst.
    pub timestamp: u64,
    /// Game clock seconds of the last delta in the burst.
    pub change_timestamp: u32,
}
