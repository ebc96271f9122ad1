//! User interface subsystem - OLED display + physical buttons.
//!
//! Button tasks push debounced presses into [`BUTTON_EVENTS`]; the main
//! task feeds them to [`lifepuck::App`] and redraws the SSD1306 when the
//! app asks for it.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C
//! - **Buttons**: 5 tactile switches with debouncing (two per seat + MENU)

pub mod buttons;
pub mod display;

use defmt::Format;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use lifepuck::input::{Button, PressKind};

/// Depth of the button event queue.
pub const BUTTON_QUEUE_DEPTH: usize = 8;

/// One debounced, classified button press.
#[derive(Clone, Copy, PartialEq, Eq, Format)]
pub struct ButtonEvent {
    pub button: Button,
    pub press: PressKind,
}

/// Presses from every button task, consumed by the main loop.
pub static BUTTON_EVENTS: Channel<CriticalSectionRawMutex, ButtonEvent, BUTTON_QUEUE_DEPTH> =
    Channel::new();
