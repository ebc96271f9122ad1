//! Life total → arc gauge projection.
//!
//! Angles follow the display convention: 0° at 3 o'clock, increasing
//! clockwise, so 90° is the bottom and 270° the top of the round screen.
//! A segment is always drawn clockwise from `start_angle` to `end_angle`.
//!
//! One-player gauge:
//! ```text
//!            270°
//!        .---------.
//!      /      ^      \        span = 360° − gap, centred on 270°
//!     |   base_start  |       sweep grows clockwise from base_start
//!      \             /
//!        '-- gap --'
//!            90°
//! ```
//!
//! Two-player gauges split the circle at 90° / 270°: player one fills the
//! left half clockwise from the bottom seam, player two fills the right
//! half counter-clockwise from the bottom seam.

use core::f32::consts::PI;

use embedded_graphics::pixelcolor::Rgb565;

use super::color::{effective_max_life, life_color};
use super::PlayerId;
use crate::config::{ARC_GAP_DEGREES, ARC_GAP_PX, SCREEN_DIAMETER};

/// A renderable arc: angles in degrees plus the indicator colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArcSegment {
    pub start_angle: i32,
    pub end_angle: i32,
    pub color: Rgb565,
}

impl ArcSegment {
    /// Clockwise extent from start to end, in degrees.
    pub fn sweep(&self) -> i32 {
        if self.end_angle >= self.start_angle {
            self.end_angle - self.start_angle
        } else {
            self.end_angle + 360 - self.start_angle
        }
    }
}

/// Geometry of the single-player gauge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcLayout {
    /// Gauge diameter (px).
    pub diameter: u32,
    /// Length of circumference left blank at the bottom (px).
    pub gap_px: f32,
}

impl Default for ArcLayout {
    fn default() -> Self {
        Self {
            diameter: SCREEN_DIAMETER,
            gap_px: ARC_GAP_PX,
        }
    }
}

impl ArcLayout {
    /// Usable arc in degrees (full circle minus the pixel gap).
    ///
    /// `gap_px` must be shorter than the circumference.
    pub fn arc_span(&self) -> f32 {
        let circumference = PI * self.diameter as f32;
        let gap_deg = (self.gap_px / circumference) * 360.0;
        360.0 - gap_deg
    }

    /// Nominal start and (unwrapped) end angle of a full gauge.
    pub fn base_angles(&self) -> (i32, i32) {
        let half = self.arc_span() / 2.0;
        let start = (270.0 - half + 0.5) as i32;
        let end = (270.0 + half + 0.5) as i32;
        (start, end)
    }

    /// Project a life total onto the gauge.
    ///
    /// Totals above `max_life` draw the full span without wrapping the end
    /// angle (it may exceed 360°); renderers use that as the "above max" cue.
    pub fn project(&self, life_total: i32, max_life: i32) -> ArcSegment {
        let max_life = effective_max_life(max_life);
        let arc_life = life_total.max(0);
        let color = life_color(arc_life, max_life);
        let span = self.arc_span();
        let (base_start, base_end) = self.base_angles();

        let end_angle = if arc_life > max_life {
            base_start + span as i32
        } else if arc_life == max_life {
            base_end % 360
        } else if arc_life == 0 {
            base_start
        } else {
            let sweep = (span * (arc_life as f32 / max_life as f32) + 0.5) as i32;
            (base_start + sweep) % 360
        };

        ArcSegment {
            start_angle: base_start,
            end_angle,
            color,
        }
    }
}

/// Geometry of the two half-circle gauges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DuelLayout {
    /// Blank degrees at each seam (top and bottom), split evenly between halves.
    pub seam_gap_deg: u16,
}

impl Default for DuelLayout {
    fn default() -> Self {
        Self {
            seam_gap_deg: ARC_GAP_DEGREES,
        }
    }
}

impl DuelLayout {
    /// Degrees available to one seat.
    pub fn half_span(&self) -> i32 {
        180 - i32::from(self.seam_gap_deg.min(180))
    }

    /// Project one seat's life total onto its half of the screen.
    ///
    /// Each half has no room to overshoot into the other seat's side, so
    /// totals are clamped to `0..=max_life` for the sweep. The colour uses
    /// the same thresholds as the single-player gauge.
    pub fn project(&self, player: PlayerId, life_total: i32, max_life: i32) -> ArcSegment {
        let max_life = effective_max_life(max_life);
        let arc_life = life_total.clamp(0, max_life);
        let color = life_color(arc_life, max_life);
        let half_gap = i32::from(self.seam_gap_deg.min(180)) / 2;
        let sweep = (self.half_span() as f32 * (arc_life as f32 / max_life as f32) + 0.5) as i32;

        match player {
            PlayerId::Single | PlayerId::One => {
                let start_angle = 90 + half_gap;
                ArcSegment {
                    start_angle,
                    end_angle: start_angle + sweep,
                    color,
                }
            }
            PlayerId::Two => {
                let end_angle = 90 - half_gap;
                ArcSegment {
                    start_angle: (end_angle - sweep).rem_euclid(360),
                    end_angle,
                    color,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::color::{GREEN, RED};

    #[test]
    fn default_layout_angles() {
        let layout = ArcLayout::default();
        let span = layout.arc_span();
        assert!(span > 296.3 && span < 296.4);
        assert_eq!(layout.base_angles(), (122, 418));
    }

    #[test]
    fn zero_life_is_empty_arc_at_start() {
        let seg = ArcLayout::default().project(0, 40);
        assert_eq!(seg.start_angle, 122);
        assert_eq!(seg.end_angle, 122);
        assert_eq!(seg.sweep(), 0);
        assert_eq!(seg.color, RED);
    }

    #[test]
    fn negative_life_clamps_to_zero() {
        let layout = ArcLayout::default();
        assert_eq!(layout.project(-12, 40), layout.project(0, 40));
    }

    #[test]
    fn partial_life_sweeps_proportionally() {
        let layout = ArcLayout::default();
        assert_eq!(layout.project(20, 40).end_angle, 270);
        assert_eq!(layout.project(30, 40).end_angle, 344);
        // 259° sweep wraps past 360.
        let seg = layout.project(35, 40);
        assert_eq!(seg.end_angle, 21);
        assert_eq!(seg.sweep(), 259);
    }

    #[test]
    fn full_life_ends_at_wrapped_base_end() {
        let seg = ArcLayout::default().project(40, 40);
        assert_eq!(seg.start_angle, 122);
        assert_eq!(seg.end_angle, 58);
        assert_eq!(seg.sweep(), 296);
        assert_eq!(seg.color, GREEN);
    }

    #[test]
    fn overshoot_does_not_wrap() {
        let seg = ArcLayout::default().project(47, 40);
        assert_eq!(seg.end_angle, 418);
        assert_eq!(seg.sweep(), 296);
        assert_eq!(seg.color, GREEN);
    }

    #[test]
    fn sweep_is_monotonic_in_life() {
        let layout = ArcLayout::default();
        for max in [1, 7, 20, 40, 100] {
            let mut previous = 0;
            for life in 0..=max {
                let sweep = layout.project(life, max).sweep();
                assert!(sweep >= previous, "life {life} of {max}");
                previous = sweep;
            }
        }
    }

    #[test]
    fn invalid_max_life_falls_back() {
        let layout = ArcLayout::default();
        assert_eq!(layout.project(20, 0), layout.project(20, 40));
        assert_eq!(layout.project(20, -5), layout.project(20, 40));
    }

    #[test]
    fn duel_without_gap_matches_half_circles() {
        let layout = DuelLayout { seam_gap_deg: 0 };

        let p1_full = layout.project(PlayerId::One, 40, 40);
        assert_eq!((p1_full.start_angle, p1_full.end_angle), (90, 270));
        let p1_half = layout.project(PlayerId::One, 20, 40);
        assert_eq!(p1_half.end_angle, 180);

        let p2_full = layout.project(PlayerId::Two, 40, 40);
        assert_eq!((p2_full.start_angle, p2_full.end_angle), (270, 90));
        let p2_empty = layout.project(PlayerId::Two, 0, 40);
        assert_eq!((p2_empty.start_angle, p2_empty.end_angle), (90, 90));
        let p2_half = layout.project(PlayerId::Two, 20, 40);
        assert_eq!(p2_half.start_angle, 0);
        assert_eq!(p2_half.sweep(), 90);
    }

    #[test]
    fn duel_gap_is_left_at_both_seams() {
        let layout = DuelLayout { seam_gap_deg: 6 };
        assert_eq!(layout.half_span(), 174);

        let p1 = layout.project(PlayerId::One, 40, 40);
        assert_eq!((p1.start_angle, p1.end_angle), (93, 267));

        let p2 = layout.project(PlayerId::Two, 40, 40);
        assert_eq!((p2.start_angle, p2.end_angle), (273, 87));
        assert_eq!(p2.sweep(), 174);
    }

    #[test]
    fn duel_clamps_overshoot_and_colours_per_seat() {
        let layout = DuelLayout::default();
        let over = layout.project(PlayerId::One, 55, 40);
        assert_eq!(over, layout.project(PlayerId::One, 40, 40));

        let low = layout.project(PlayerId::Two, 5, 40);
        assert_eq!(low.color, RED);
        let other_max = layout.project(PlayerId::Two, 5, 6);
        assert_eq!(other_max.color, GREEN);
    }
}
