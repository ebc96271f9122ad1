//! Game stopwatch.
//!
//! Started and paused from the menu, reset together with or separately from
//! the life totals. Its seconds stamp every life change for the history view.

use heapless::String;

use crate::life::history::format_clock;
use crate::life::Moment;

/// Pausable stopwatch driven by monotonic milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameClock {
    running: bool,
    /// Time banked by earlier running stretches.
    accumulated_ms: u64,
    /// Uptime at which the current stretch started.
    resumed_at_ms: u64,
}

impl GameClock {
    pub const fn new() -> Self {
        Self {
            running: false,
            accumulated_ms: 0,
            resumed_at_ms: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self, now_ms: u64) {
        if !self.running {
            self.running = true;
            self.resumed_at_ms = now_ms;
        }
    }

    pub fn pause(&mut self, now_ms: u64) {
        if self.running {
            self.accumulated_ms = self.elapsed_ms(now_ms);
            self.running = false;
        }
    }

    /// Start if paused, pause if running.
    pub fn toggle(&mut self, now_ms: u64) {
        if self.running {
            self.pause(now_ms);
        } else {
            self.start(now_ms);
        }
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Clock: {} at {} s",
            if self.running { "running" } else { "paused" },
            self.elapsed_secs(now_ms)
        );
    }

    /// Stop and zero the clock.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        if self.running {
            self.accumulated_ms
                .saturating_add(now_ms.saturating_sub(self.resumed_at_ms))
        } else {
            self.accumulated_ms
        }
    }

    pub fn elapsed_secs(&self, now_ms: u64) -> u32 {
        u32::try_from(self.elapsed_ms(now_ms) / 1000).unwrap_or(u32::MAX)
    }

    /// Stamp for a life change happening at `now_ms`.
    pub fn moment(&self, now_ms: u64) -> Moment {
        Moment::new(now_ms, self.elapsed_secs(now_ms))
    }

    /// `MM:SS` label.
    pub fn format(&self, now_ms: u64) -> String<12> {
        format_clock(self.elapsed_secs(now_ms))
    }
}
