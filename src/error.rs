//! Error type for the lifepuck firmware.
//!
//! We avoid `alloc` - all error variants are fieldless.
//! Implements `defmt::Format` for efficient on-target logging.

use defmt::Format;

/// Hardware-facing failures. The game core itself never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Error {
    // Storage
    /// Flash read/write/erase failed.
    Storage,

    // UI / Display
    /// I²C transaction to the display failed.
    Display,
}
