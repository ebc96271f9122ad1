//! Debounced commit state machine for one seat.
//!
//! Every tap updates the pending change immediately, but the authoritative
//! total and the history only move when a burst goes idle for longer than
//! the grouping window:
//!
//! ```text
//!            handle_change            handle_change (within window)
//!   IDLE ───────────────────► ACCUMULATING ◄──────┐
//!    ▲                              │  └───────────┘
//!    │   update: idle > window      │
//!    └──────────────────────────────┘  commit (net ≠ 0) or drop (net = 0)
//! ```
//!
//! Commits are emitted as return values rather than through a stored
//! callback; the caller forwards them to whatever needs to react.

use heapless::Vec;

use super::{LifeHistoryEvent, Moment, PlayerId};
use crate::config::{GROUPING_WINDOW_MS, HISTORY_CAPACITY};

/// Coalesces rapid life changes for one seat into history events.
#[derive(Clone, Debug)]
pub struct EventGrouper {
    grouping_window_ms: u64,
    active: bool,
    net_change: i32,
    player_id: PlayerId,
    life_total: i32,
    group_start_time: u64,
    last_event_time: u64,
    change_timestamp: u32,
    history: Vec<LifeHistoryEvent, HISTORY_CAPACITY>,
}

impl EventGrouper {
    /// Create a grouper with the default grouping window.
    pub fn new(player_id: PlayerId, initial_life: i32) -> Self {
        Self::with_window(player_id, initial_life, GROUPING_WINDOW_MS)
    }

    /// Create a grouper with an explicit grouping window (ms).
    pub fn with_window(player_id: PlayerId, initial_life: i32, grouping_window_ms: u64) -> Self {
        Self {
            grouping_window_ms,
            active: false,
            net_change: 0,
            player_id,
            life_total: initial_life,
            group_start_time: 0,
            last_event_time: 0,
            change_timestamp: 0,
            history: Vec::new(),
        }
    }

    /// Record one life change.
    ///
    /// Opens a group if none is active, otherwise extends it. A group that
    /// has already been idle past the window is closed first, so a late tap
    /// always starts a fresh burst even if no tick ran in between; the event
    /// that closing produced, if any, is returned.
    pub fn handle_change(&mut self, delta: i32, at: Moment) -> Option<LifeHistoryEvent> {
        let flushed = self.update(at.uptime_ms);

        if !self.active {
            self.active = true;
            self.group_start_time = at.uptime_ms;
        }
        self.net_change = self.net_change.saturating_add(delta);
        self.last_event_time = at.uptime_ms;
        self.change_timestamp = at.game_secs;

        flushed
    }

    /// Periodic tick. Commits the open group once it has been idle for
    /// longer than the grouping window.
    ///
    /// A burst that nets to zero is closed without a history entry.
    pub fn update(&mut self, now_ms: u64) -> Option<LifeHistoryEvent> {
        if !self.active || !self.window_expired(now_ms) {
            return None;
        }

        if self.net_change == 0 {
            self.active = false;
            #[cfg(feature = "defmt")]
            defmt::debug!("Grouper {}: burst netted to zero, dropped", self.player_id);
            return None;
        }

        Some(self.commit())
    }

    fn window_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_event_time) > self.grouping_window_ms
    }

    fn commit(&mut self) -> LifeHistoryEvent {
        let new_total = self.life_total.saturating_add(self.net_change);
        let event = LifeHistoryEvent {
            net_life_change: self.net_change,
            life_total: new_total,
            player_id: self.player_id,
            timestamp: self.last_event_time,
            change_timestamp: self.change_timestamp,
        };

        // The total stays authoritative even once the history is full;
        // recorded entries are never pruned to make room.
        if self.history.push(event).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Grouper {}: history full - event not recorded", self.player_id);
        }
        self.life_total = new_total;

        self.active = false;
        self.net_change = 0;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Grouper {}: committed {} -> {} (burst {}..{} ms)",
            self.player_id,
            event.net_life_change,
            event.life_total,
            self.group_start_time,
            self.last_event_time
        );

        event
    }

    /// Discard history and any open burst, and start over from `base_life`.
    pub fn reset_history(&mut self, base_life: i32) {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "Grouper {}: reset to {} (dropping {} events, pending {})",
            self.player_id,
            base_life,
            self.history.len(),
            self.net_change
        );
        self.history.clear();
        self.active = false;
        self.net_change = 0;
        self.group_start_time = 0;
        self.last_event_time = 0;
        self.change_timestamp = 0;
        self.life_total = base_life;
    }

    /// True while a burst is open and waiting for its window to expire.
    pub fn is_commit_pending(&self) -> bool {
        self.active
    }

    /// Running sum of the open burst (0 when idle).
    pub fn pending_change(&self) -> i32 {
        self.net_change
    }

    /// Last committed total.
    pub fn life_total(&self) -> i32 {
        self.life_total
    }

    /// Committed total plus the open burst, for live display.
    pub fn projected_total(&self) -> i32 {
        self.life_total.saturating_add(self.net_change)
    }

    /// Committed events, oldest first.
    pub fn history(&self) -> &[LifeHistoryEvent] {
        &self.history
    }

    /// True once the history has no room left. Later commits still move
    /// the total but are not recorded.
    pub fn history_full(&self) -> bool {
        self.history.is_full()
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn grouping_window_ms(&self) -> u64 {
        self.grouping_window_ms
    }

    /// Uptime at which the open burst started (0 when idle since reset).
    pub fn group_start_time(&self) -> u64 {
        self.group_start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(life: i32) -> EventGrouper {
        EventGrouper::with_window(PlayerId::Single, life, 1500)
    }

    #[test]
    fn new_grouper_is_idle() {
        let g = single(40);
        assert!(!g.is_commit_pending());
        assert_eq!(g.pending_change(), 0);
        assert_eq!(g.life_total(), 40);
        assert!(g.history().is_empty());
        assert_eq!(g.grouping_window_ms(), 1500);
    }

    #[test]
    fn change_opens_group_without_touching_total() {
        let mut g = single(40);
        assert_eq!(g.handle_change(3, Moment::at(100)), None);
        assert!(g.is_commit_pending());
        assert_eq!(g.pending_change(), 3);
        assert_eq!(g.projected_total(), 43);
        assert_eq!(g.life_total(), 40);
        assert_eq!(g.group_start_time(), 100);
        assert!(g.history().is_empty());
    }

    #[test]
    fn update_is_noop_when_idle() {
        let mut g = single(40);
        assert_eq!(g.update(10_000), None);
        assert_eq!(g.life_total(), 40);
        assert!(g.history().is_empty());
    }

    #[test]
    fn window_expiry_is_strictly_greater() {
        let mut g = single(40);
        g.handle_change(1, Moment::at(0));
        assert_eq!(g.update(1500), None);
        assert!(g.update(1501).is_some());
    }

    #[test]
    fn commit_snapshots_last_change() {
        let mut g = single(40);
        g.handle_change(2, Moment::new(1000, 12));
        g.handle_change(2, Moment::new(1400, 13));
        let evt = g.update(3000).expect("commit");
        assert_eq!(
            evt,
            LifeHistoryEvent {
                net_life_change: 4,
                life_total: 44,
                player_id: PlayerId::Single,
                timestamp: 1400,
                change_timestamp: 13,
            }
        );
        assert!(!g.is_commit_pending());
        assert_eq!(g.pending_change(), 0);
        assert_eq!(g.update(10_000), None);
    }

    #[test]
    fn net_zero_burst_leaves_no_trace() {
        let mut g = single(40);
        g.handle_change(1, Moment::at(0));
        g.handle_change(-1, Moment::at(100));
        assert!(g.is_commit_pending());
        assert_eq!(g.update(5000), None);
        assert!(!g.is_commit_pending());
        assert!(g.history().is_empty());
        assert_eq!(g.life_total(), 40);
    }

    #[test]
    fn zero_delta_alone_never_commits() {
        let mut g = single(40);
        g.handle_change(0, Moment::at(0));
        assert_eq!(g.update(2000), None);
        assert!(g.history().is_empty());
    }

    #[test]
    fn late_change_flushes_expired_group_first() {
        let mut g = single(40);
        g.handle_change(-3, Moment::at(0));
        let flushed = g.handle_change(-2, Moment::at(1600)).expect("eager commit");
        assert_eq!(flushed.net_life_change, -3);
        assert_eq!(flushed.life_total, 37);
        assert_eq!(g.pending_change(), -2);
        assert_eq!(g.group_start_time(), 1600);
    }

    #[test]
    fn reset_discards_open_burst() {
        let mut g = single(40);
        g.handle_change(5, Moment::new(0, 3));
        g.update(2000);
        g.handle_change(7, Moment::at(2100));
        g.reset_history(20);
        assert!(!g.is_commit_pending());
        assert_eq!(g.pending_change(), 0);
        assert_eq!(g.life_total(), 20);
        assert!(g.history().is_empty());
        assert_eq!(g.group_start_time(), 0);
        assert_eq!(g.update(10_000), None);
    }

    #[test]
    fn full_history_keeps_existing_entries() {
        let mut g = single(0);
        let mut t = 0;
        for _ in 0..HISTORY_CAPACITY {
            g.handle_change(1, Moment::at(t));
            t += 2000;
            g.update(t);
        }
        assert!(g.history_full());

        for _ in 0..2 {
            g.handle_change(1, Moment::at(t));
            t += 2000;
            let evt = g.update(t).expect("commit");
            assert_eq!(evt.life_total, g.life_total());
        }

        let history = g.history();
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history[0].life_total, 1);
        assert_eq!(history[HISTORY_CAPACITY - 1].life_total, HISTORY_CAPACITY as i32);
        assert_eq!(g.life_total(), (HISTORY_CAPACITY + 2) as i32);
    }

    #[test]
    fn extreme_deltas_saturate() {
        let mut g = single(i32::MAX - 1);
        g.handle_change(i32::MAX, Moment::at(0));
        g.handle_change(5, Moment::at(10));
        let evt = g.update(5000).expect("commit");
        assert_eq!(evt.life_total, i32::MAX);
    }
}
