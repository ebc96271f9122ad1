//! Host-testable core of the lifepuck life counter.
//!
//! Everything in this crate is pure logic with no HAL or executor
//! dependency, so it runs under `cargo test --lib` on the host and is
//! linked unchanged into the embedded binary.
//!
//! - [`life`]: burst grouping, history and the arc gauge projection
//! - [`settings`]: persisted settings over a small key-value contract
//! - [`clock`]: the game stopwatch
//! - [`input`]: gesture and button mapping
//! - [`menu`]: contextual menu and screen state
//! - [`app`]: the UI state machine driven by the firmware main loop
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! It declares the hardware modules (display, buttons, flash) itself.

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod clock;
pub mod config;
pub mod input;
pub mod life;
pub mod menu;
pub mod settings;

pub use app::App;
pub use clock::GameClock;
pub use life::{
    ArcLayout, ArcSegment, DuelLayout, EventGrouper, GameSession, LifeHistoryEvent, Moment,
    PlayerId,
};
pub use settings::{KeyValueStore, PlayerMode, SettingKey, Settings, SettingsCache};

// ═══════════════════════════════════════════════════════════════════════════
// Cross-module Tests
// ═══════════════════════════════════════════════════════════════════════════
