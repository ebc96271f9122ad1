//! Application-wide constants and compile-time configuration.
//!
//! Timing parameters, display geometry, default game settings and
//! hardware assignments live here so they can be tuned in one place.

// Life grouping

/// Idle gap (ms) after which an open burst of life changes commits.
pub const GROUPING_WINDOW_MS: u64 = 1500;

/// Main loop tick (ms). Bounds commit latency together with the window.
pub const TICK_INTERVAL_MS: u64 = 10;

/// Committed events retained per seat (about 6 KB each). A full history
/// stops recording; entries are only cleared by a reset.
pub const HISTORY_CAPACITY: usize = 256;

/// Rows in a two-seat merged history view.
pub const MERGED_HISTORY_CAPACITY: usize = HISTORY_CAPACITY * 2;

// Default game settings (overridden by persisted values)

/// Starting life total and the arc's nominal maximum.
pub const DEFAULT_START_LIFE: i32 = 40;

/// Life change for a tap.
pub const DEFAULT_STEP_SMALL: i32 = 1;

/// Life change for a long press / swipe.
pub const DEFAULT_STEP_LARGE: i32 = 5;

/// Exclusive upper bound accepted for start life and step sizes.
pub const SETTING_VALUE_LIMIT: i32 = 10_000;

/// Settings editor increment for a long press (a short press moves by 1).
pub const SETTING_EDIT_COARSE_STEP: i32 = 10;

// Display geometry

/// Diameter of the round life gauge (px).
pub const SCREEN_DIAMETER: u32 = 360;

/// Blank stretch at the bottom of the single-player arc (px of circumference).
pub const ARC_GAP_PX: f32 = 200.0;

/// Gap left at each seam between the two half-circle arcs (degrees).
pub const ARC_GAP_DEGREES: u16 = 6;

// Buttons (nRF52840-DK defaults)
//
//   Button LEFT UP    → P0.11
//   Button LEFT DOWN  → P0.12
//   Button RIGHT UP   → P0.24
//   Button RIGHT DOWN → P0.25
//   Button MENU       → P0.03
//   I²C SDA           → P0.26
//   I²C SCL           → P0.27

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Hold duration (ms) that turns a press into a long press.
pub const LONG_PRESS_MS: u64 = 600;

// Settings storage

/// Flash page index where settings storage starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages reserved for settings storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 2;
