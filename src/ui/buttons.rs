//! GPIO button input with async debouncing.
//!
//! Five physical buttons (active-low with internal pull-up):
//!   - LEFT UP / LEFT DOWN   - top / bottom half (1P) or left seat (2P)
//!   - RIGHT UP / RIGHT DOWN - top / bottom half (1P) or right seat (2P)
//!   - MENU                  - open the menu, select, close
//!
//! Each button is handled by an async task that waits for a GPIO edge,
//! debounces it, times the hold to tell short from long presses, and
//! sends a `ButtonEvent` to the UI channel.

use crate::ui::{ButtonEvent, BUTTON_EVENTS};
use defmt::debug;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_time::{with_timeout, Duration, Instant, Timer};
use lifepuck::config::{BUTTON_DEBOUNCE_MS, LONG_PRESS_MS};
use lifepuck::input::{classify_press, Button, PressKind};

/// Run a single button polling loop.
///
/// A long press is reported as soon as the hold reaches the threshold,
/// without waiting for release.
#[embassy_executor::task(pool_size = 5)]
pub async fn button_task(pin: AnyPin, button: Button) -> ! {
    let mut btn = Input::new(pin, Pull::Up);
    let tx = BUTTON_EVENTS.sender();

    loop {
        // Wait for falling edge (button press, active-low).
        btn.wait_for_falling_edge().await;
        let pressed_at = Instant::now();

        // Debounce: wait and re-check.
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        if btn.is_high() {
            continue;
        }

        let remaining = LONG_PRESS_MS.saturating_sub(pressed_at.elapsed().as_millis());
        let _ = with_timeout(Duration::from_millis(remaining), btn.wait_for_high()).await;
        let press = classify_press(pressed_at.elapsed().as_millis());

        debug!("Button: {} {}", button, press);
        tx.send(ButtonEvent { button, press }).await;

        // Wait for release to avoid repeat triggers.
        if press == PressKind::Long {
            btn.wait_for_high().await;
        }
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
    }
}
