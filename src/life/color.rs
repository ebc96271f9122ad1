//! Gauge colours and the red → yellow → green life gradient.
//!
//! The display buffer is RGB565, so blending happens on 5/6-bit channels
//! widened to 8 bits by bit replication and truncated back afterwards:
//!
//! ```text
//! 5-bit → 8-bit: (c << 3) | (c >> 2)
//! 6-bit → 8-bit: (c << 2) | (c >> 4)
//! ```

use embedded_graphics::pixelcolor::{Rgb565, Rgb888, RgbColor};

use crate::config::DEFAULT_START_LIFE;

/// Full / healthy life.
pub const GREEN: Rgb565 = rgb565_from_hex(0x00E31F);
/// Mid-range life.
pub const YELLOW: Rgb565 = rgb565_from_hex(0xEBF700);
/// Low life.
pub const RED: Rgb565 = rgb565_from_hex(0xE80000);

/// Truncate a 24-bit `0xRRGGBB` colour to RGB565.
pub const fn rgb565_from_hex(hex: u32) -> Rgb565 {
    let r = ((hex >> 16) & 0xFF) as u8;
    let g = ((hex >> 8) & 0xFF) as u8;
    let b = (hex & 0xFF) as u8;
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

fn widen5(c: u8) -> u8 {
    (c << 3) | (c >> 2)
}

fn widen6(c: u8) -> u8 {
    (c << 2) | (c >> 4)
}

/// Expand to 24-bit with bit replication (pure white stays `0xFFFFFF`).
pub fn to_rgb888(color: Rgb565) -> Rgb888 {
    Rgb888::new(widen5(color.r()), widen6(color.g()), widen5(color.b()))
}

/// Linear blend from `from` (t = 0) to `to` (t = 255).
pub fn interpolate(from: Rgb565, to: Rgb565, t: u8) -> Rgb565 {
    let mix = |a: u8, b: u8| -> u8 {
        let (a, b, t) = (i32::from(a), i32::from(b), i32::from(t));
        (a + (b - a) * t / 255) as u8
    };
    let from = to_rgb888(from);
    let to = to_rgb888(to);
    let r = mix(from.r(), to.r());
    let g = mix(from.g(), to.g());
    let b = mix(from.b(), to.b());
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// `max_life <= 0` would divide by zero; fall back to the standard start.
pub fn effective_max_life(max_life: i32) -> i32 {
    if max_life <= 0 {
        DEFAULT_START_LIFE
    } else {
        max_life
    }
}

/// Life thresholds (inclusive lower bounds) for one `max_life`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    /// 0.25 × max: red → yellow blend starts here.
    pub red: i64,
    /// 0.55 × max: yellow → green blend starts here.
    pub yellow: i64,
    /// 0.875 × max: solid green from here up.
    pub green: i64,
}

impl Thresholds {
    pub fn for_max_life(max_life: i32) -> Self {
        let max = i64::from(effective_max_life(max_life));
        Self {
            red: max / 4,
            yellow: max * 11 / 20,
            green: max * 7 / 8,
        }
    }
}

fn blend_factor(life: i64, low: i64, high: i64) -> u8 {
    (((life - low) * 255) / (high - low)).clamp(0, 255) as u8
}

/// Gauge colour for a life total.
///
/// Negative totals are treated as zero. Each band only exists when its
/// upper threshold is strictly above the lower one, so the blend divisor
/// is never zero even for tiny `max_life` values.
pub fn life_color(life_total: i32, max_life: i32) -> Rgb565 {
    let life = i64::from(life_total.max(0));
    let th = Thresholds::for_max_life(max_life);

    if life >= th.green {
        GREEN
    } else if life >= th.yellow {
        interpolate(YELLOW, GREEN, blend_factor(life, th.yellow, th.green))
    } else if life >= th.red {
        interpolate(RED, YELLOW, blend_factor(life, th.red, th.yellow))
    } else {
        RED
    }
}

/// Colour of the pending-change label: green for gains (and zero), red for losses.
pub fn pending_change_color(pending: i32) -> Rgb565 {
    if pending >= 0 {
        GREEN
    } else {
        RED
    }
}
