//! The active game: one grouper per seat for the current player mode.
//!
//! Seats are fully independent. The session only routes changes to the
//! right seat, ticks every seat, and rebuilds them when the mode or the
//! start life changes.

use heapless::Vec;

use super::arc::{ArcLayout, ArcSegment, DuelLayout};
use super::grouper::EventGrouper;
use super::history::merge_by_timestamp;
use super::{LifeHistoryEvent, Moment, PlayerId};
use crate::config::{GROUPING_WINDOW_MS, MERGED_HISTORY_CAPACITY};
use crate::settings::{PlayerMode, Settings};

/// Seats present in a player mode, in display order.
pub fn seats_for(mode: PlayerMode) -> &'static [PlayerId] {
    match mode {
        PlayerMode::OnePlayer => &[PlayerId::Single],
        PlayerMode::TwoPlayer => &[PlayerId::One, PlayerId::Two],
    }
}

/// Owns the seats of the game currently on screen.
#[derive(Clone, Debug)]
pub struct GameSession {
    settings: Settings,
    grouping_window_ms: u64,
    seats: Vec<EventGrouper, 2>,
    arc_layout: ArcLayout,
    duel_layout: DuelLayout,
}

impl GameSession {
    pub fn new(settings: Settings) -> Self {
        Self::with_window(settings, GROUPING_WINDOW_MS)
    }

    pub fn with_window(settings: Settings, grouping_window_ms: u64) -> Self {
        let mut session = Self {
            settings: settings.validated(),
            grouping_window_ms,
            seats: Vec::new(),
            arc_layout: ArcLayout::default(),
            duel_layout: DuelLayout::default(),
        };
        session.build_seats();
        session
    }

    fn build_seats(&mut self) {
        self.seats.clear();
        for &player in seats_for(self.settings.player_mode) {
            let _ = self.seats.push(EventGrouper::with_window(
                player,
                self.settings.start_life,
                self.grouping_window_ms,
            ));
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> PlayerMode {
        self.settings.player_mode
    }

    /// Seats in display order.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.seats.iter().map(EventGrouper::player_id)
    }

    pub fn seat(&self, player: PlayerId) -> Option<&EventGrouper> {
        self.seats.iter().find(|s| s.player_id() == player)
    }

    fn seat_mut(&mut self, player: PlayerId) -> Option<&mut EventGrouper> {
        self.seats.iter_mut().find(|s| s.player_id() == player)
    }

    /// Route a life change to `player`'s seat.
    ///
    /// Changes for a seat that does not exist in the current mode are
    /// ignored. Returns an event if the seat had to flush an expired burst.
    pub fn handle_change(
        &mut self,
        player: PlayerId,
        delta: i32,
        at: Moment,
    ) -> Option<LifeHistoryEvent> {
        match self.seat_mut(player) {
            Some(seat) => seat.handle_change(delta, at),
            None => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Session: no seat {} in current mode, ignoring", player);
                None
            }
        }
    }

    /// Tick every seat; returns the events committed on this tick.
    pub fn update(&mut self, now_ms: u64) -> Vec<LifeHistoryEvent, 2> {
        let mut committed = Vec::new();
        for seat in self.seats.iter_mut() {
            if let Some(event) = seat.update(now_ms) {
                let _ = committed.push(event);
            }
        }
        committed
    }

    pub fn life_total(&self, player: PlayerId) -> Option<i32> {
        self.seat(player).map(EventGrouper::life_total)
    }

    /// Open burst for `player` (0 if idle or no such seat).
    pub fn pending_change(&self, player: PlayerId) -> i32 {
        self.seat(player).map_or(0, EventGrouper::pending_change)
    }

    pub fn is_commit_pending(&self) -> bool {
        self.seats.iter().any(EventGrouper::is_commit_pending)
    }

    pub fn history(&self, player: PlayerId) -> &[LifeHistoryEvent] {
        match self.seat(player) {
            Some(seat) => seat.history(),
            None => &[],
        }
    }

    /// True if any seat has stopped recording history.
    pub fn history_full(&self) -> bool {
        self.seats.iter().any(EventGrouper::history_full)
    }

    /// Every seat's history in one timeline, ordered by uptime.
    pub fn merged_history(&self) -> Vec<LifeHistoryEvent, MERGED_HISTORY_CAPACITY> {
        match self.seats.as_slice() {
            [only] => merge_by_timestamp(only.history(), &[]),
            [first, second] => merge_by_timestamp(first.history(), second.history()),
            _ => Vec::new(),
        }
    }

    /// Arc gauge for `player`'s committed total.
    pub fn arc_segment(&self, player: PlayerId) -> Option<ArcSegment> {
        let life = self.life_total(player)?;
        let max_life = self.settings.start_life;
        Some(match self.mode() {
            PlayerMode::OnePlayer => self.arc_layout.project(life, max_life),
            PlayerMode::TwoPlayer => self.duel_layout.project(player, life, max_life),
        })
    }

    /// Reset every seat to the start life and clear history.
    pub fn reset_life(&mut self) {
        let start_life = self.settings.start_life;
        for seat in self.seats.iter_mut() {
            seat.reset_history(start_life);
        }
    }

    /// Switch player mode. Always starts a fresh game.
    pub fn set_mode(&mut self, mode: PlayerMode) {
        self.settings.player_mode = mode;
        self.build_seats();
    }

    /// Adopt new settings. Always starts a fresh game.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings.validated();
        self.build_seats();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player() -> GameSession {
        GameSession::new(Settings::default().with_player_mode(PlayerMode::TwoPlayer))
    }

    #[test]
    fn one_player_has_single_seat() {
        let session = GameSession::new(Settings::default());
        let players: Vec<PlayerId, 2> = session.players().collect();
        assert_eq!(players.as_slice(), &[PlayerId::Single]);
        assert_eq!(session.life_total(PlayerId::Single), Some(40));
        assert_eq!(session.life_total(PlayerId::One), None);
    }

    #[test]
    fn two_player_has_two_seats() {
        let session = two_player();
        let players: Vec<PlayerId, 2> = session.players().collect();
        assert_eq!(players.as_slice(), &[PlayerId::One, PlayerId::Two]);
    }

    #[test]
    fn changes_for_missing_seat_are_ignored() {
        let mut session = GameSession::new(Settings::default());
        assert_eq!(session.handle_change(PlayerId::Two, 5, Moment::at(0)), None);
        assert!(!session.is_commit_pending());
        assert_eq!(session.pending_change(PlayerId::Two), 0);
        assert!(session.history(PlayerId::Two).is_empty());
    }

    #[test]
    fn update_reports_commits_from_each_seat() {
        let mut session = two_player();
        session.handle_change(PlayerId::One, -3, Moment::at(0));
        session.handle_change(PlayerId::Two, 2, Moment::at(500));
        assert!(session.update(1600).len() == 1);
        let second = session.update(2100);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].player_id, PlayerId::Two);
        assert_eq!(session.life_total(PlayerId::One), Some(37));
        assert_eq!(session.life_total(PlayerId::Two), Some(42));
    }

    #[test]
    fn merged_history_interleaves_seats() {
        let mut session = two_player();
        session.handle_change(PlayerId::Two, 1, Moment::at(0));
        session.update(2000);
        session.handle_change(PlayerId::One, -1, Moment::at(2500));
        session.update(5000);
        session.handle_change(PlayerId::Two, 4, Moment::at(5100));
        session.update(7000);
        let merged = session.merged_history();
        let order: Vec<PlayerId, 3> = merged.iter().map(|e| e.player_id).collect();
        assert_eq!(order.as_slice(), &[PlayerId::Two, PlayerId::One, PlayerId::Two]);
    }

    #[test]
    fn reset_life_restores_every_seat() {
        let mut session = two_player();
        session.handle_change(PlayerId::One, -10, Moment::at(0));
        session.handle_change(PlayerId::Two, -4, Moment::at(0));
        session.update(2000);
        session.handle_change(PlayerId::One, -1, Moment::at(2100));
        session.reset_life();
        assert_eq!(session.life_total(PlayerId::One), Some(40));
        assert_eq!(session.life_total(PlayerId::Two), Some(40));
        assert!(session.merged_history().is_empty());
        assert!(!session.is_commit_pending());
    }

    #[test]
    fn switching_mode_rebuilds_seats() {
        let mut session = GameSession::new(Settings::default());
        session.handle_change(PlayerId::Single, -5, Moment::at(0));
        session.set_mode(PlayerMode::TwoPlayer);
        assert_eq!(session.mode(), PlayerMode::TwoPlayer);
        assert_eq!(session.life_total(PlayerId::Single), None);
        assert_eq!(session.life_total(PlayerId::One), Some(40));
        assert!(!session.is_commit_pending());
    }

    #[test]
    fn new_start_life_applies_to_seats_and_arc() {
        let mut session = GameSession::new(Settings::default());
        session.apply_settings(Settings {
            start_life: 20,
            ..Settings::default()
        });
        assert_eq!(session.life_total(PlayerId::Single), Some(20));
        let full = session.arc_segment(PlayerId::Single).unwrap();
        assert_eq!(full.sweep(), 296);
    }

    #[test]
    fn arc_follows_mode() {
        let session = two_player();
        let seg = session.arc_segment(PlayerId::One).unwrap();
        assert_eq!(seg.sweep(), DuelLayout::default().half_span());
        assert_eq!(session.arc_segment(PlayerId::Single), None);
    }

    #[test]
    fn full_seat_is_reported_and_keeps_counting() {
        let mut session = GameSession::with_window(
            Settings::default().with_player_mode(PlayerMode::TwoPlayer),
            100,
        );
        let mut t = 0;
        for _ in 0..crate::config::HISTORY_CAPACITY + 1 {
            session.handle_change(PlayerId::One, -1, Moment::at(t));
            t += 200;
            session.update(t);
        }
        assert!(session.history_full());
        assert_eq!(session.history(PlayerId::One)[0].life_total, 39);
        assert_eq!(
            session.life_total(PlayerId::One),
            Some(40 - (crate::config::HISTORY_CAPACITY as i32 + 1))
        );

        session.reset_life();
        assert!(!session.history_full());
    }

    #[test]
    fn invalid_settings_are_sanitized() {
        let session = GameSession::new(Settings {
            start_life: -1,
            ..Settings::default()
        });
        assert_eq!(session.settings().start_life, 40);
        assert_eq!(session.life_total(PlayerId::Single), Some(40));
    }
}
