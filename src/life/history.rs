//! History view helpers: merging seats and formatting rows.

use core::fmt::Write;

use heapless::{String, Vec};

use super::{LifeHistoryEvent, PlayerId};
use crate::config::MERGED_HISTORY_CAPACITY;

/// Text of one history cell, e.g. `+3@02:15[43]`. Sized for two full
/// `i32` values around the longest `u32` clock.
pub type HistoryText = String<40>;

/// Merge two chronological histories into one, ordered by `timestamp`.
///
/// Stable: on equal timestamps events from `first` come before `second`.
pub fn merge_by_timestamp(
    first: &[LifeHistoryEvent],
    second: &[LifeHistoryEvent],
) -> Vec<LifeHistoryEvent, MERGED_HISTORY_CAPACITY> {
    let mut merged = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < first.len() || j < second.len() {
        let take_first = match (first.get(i), second.get(j)) {
            (Some(a), Some(b)) => a.timestamp <= b.timestamp,
            (Some(_), None) => true,
            _ => false,
        };
        let next = if take_first {
            i += 1;
            first[i - 1]
        } else {
            j += 1;
            second[j - 1]
        };
        if merged.push(next).is_err() {
            break;
        }
    }

    merged
}

/// Format a game-clock value as `MM:SS`.
pub fn format_clock(secs: u32) -> String<12> {
    let mut out = String::new();
    let _ = write!(out, "{:02}:{:02}", secs / 60, secs % 60);
    out
}

/// Format one event as `+N@MM:SS[T]` (losses and zero carry no plus sign).
pub fn format_event(event: &LifeHistoryEvent) -> HistoryText {
    let mut out = String::new();
    let clock = format_clock(event.change_timestamp);
    let sign = if event.net_life_change > 0 { "+" } else { "" };
    let _ = write!(
        out,
        "{}{}@{}[{}]",
        sign, event.net_life_change, clock, event.life_total
    );
    out
}

/// Pending-change label: `+N` for gains, `N` otherwise.
pub fn format_pending(pending: i32) -> String<12> {
    let mut out = String::new();
    if pending > 0 {
        let _ = write!(out, "+{}", pending);
    } else {
        let _ = write!(out, "{}", pending);
    }
    out
}

/// One row of the history table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRow {
    /// 0 for the single / left seat, 1 for the right seat.
    pub column: usize,
    pub text: HistoryText,
}

/// Table column for a seat.
pub fn column_for(player: PlayerId) -> usize {
    match player {
        PlayerId::Single | PlayerId::One => 0,
        PlayerId::Two => 1,
    }
}

impl From<&LifeHistoryEvent> for HistoryRow {
    fn from(event: &LifeHistoryEvent) -> Self {
        Self {
            column: column_for(event.player_id),
            text: format_event(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(player_id: PlayerId, timestamp: u64, change: i32, total: i32) -> LifeHistoryEvent {
        LifeHistoryEvent {
            net_life_change: change,
            life_total: total,
            player_id,
            timestamp,
            change_timestamp: (timestamp / 1000) as u32,
        }
    }

    #[test]
    fn merge_orders_by_timestamp() {
        let p1 = [
            event(PlayerId::One, 100, -1, 39),
            event(PlayerId::One, 5000, -2, 37),
        ];
        let p2 = [
            event(PlayerId::Two, 2000, 3, 43),
            event(PlayerId::Two, 9000, -5, 38),
        ];
        let merged = merge_by_timestamp(&p1, &p2);
        let stamps: Vec<u64, 4> = merged.iter().map(|e| e.timestamp).collect();
        assert_eq!(stamps.as_slice(), &[100, 2000, 5000, 9000]);
    }

    #[test]
    fn merge_is_stable_on_ties() {
        let p1 = [event(PlayerId::One, 700, 1, 41)];
        let p2 = [event(PlayerId::Two, 700, 2, 42)];
        let merged = merge_by_timestamp(&p1, &p2);
        assert_eq!(merged[0].player_id, PlayerId::One);
        assert_eq!(merged[1].player_id, PlayerId::Two);
    }

    #[test]
    fn merge_with_empty_side() {
        let p1 = [event(PlayerId::One, 1, 1, 41)];
        assert_eq!(merge_by_timestamp(&p1, &[]).len(), 1);
        assert_eq!(merge_by_timestamp(&[], &p1).len(), 1);
        assert!(merge_by_timestamp(&[], &[]).is_empty());
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0).as_str(), "00:00");
        assert_eq!(format_clock(75).as_str(), "01:15");
        assert_eq!(format_clock(6000).as_str(), "100:00");
    }

    #[test]
    fn event_format_signs() {
        let mut gain = event(PlayerId::Single, 0, 3, 43);
        gain.change_timestamp = 135;
        assert_eq!(format_event(&gain).as_str(), "+3@02:15[43]");

        let loss = event(PlayerId::Single, 61_000, -7, 33);
        assert_eq!(format_event(&loss).as_str(), "-7@01:01[33]");
    }

    #[test]
    fn extreme_values_fit() {
        let mut worst = event(PlayerId::Single, 0, i32::MIN, i32::MIN);
        worst.change_timestamp = u32::MAX;
        assert_eq!(format_clock(u32::MAX).as_str(), "71582788:15");
        assert_eq!(
            format_event(&worst).as_str(),
            "-2147483648@71582788:15[-2147483648]"
        );

        worst.net_life_change = i32::MAX;
        worst.life_total = i32::MAX;
        assert_eq!(
            format_event(&worst).as_str(),
            "+2147483647@71582788:15[2147483647]"
        );
    }

    #[test]
    fn pending_format() {
        assert_eq!(format_pending(5).as_str(), "+5");
        assert_eq!(format_pending(0).as_str(), "0");
        assert_eq!(format_pending(-4).as_str(), "-4");
    }

    #[test]
    fn rows_land_in_seat_columns() {
        let row = HistoryRow::from(&event(PlayerId::Two, 0, -1, 39));
        assert_eq!(row.column, 1);
        assert_eq!(HistoryRow::from(&event(PlayerId::One, 0, 1, 41)).column, 0);
        assert_eq!(HistoryRow::from(&event(PlayerId::Single, 0, 1, 41)).column, 0);
    }
}
