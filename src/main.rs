//! lifepuck - handheld life counter for tabletop card games.
//!
//! Runs on an nRF52840 with five buttons and an SSD1306 OLED. Taps change
//! a player's life immediately on screen; the change is committed to the
//! history once the player stops tapping for the grouping window.
//!
//! ## Architecture
//!
//! ```text
//!  ┌────────────┐  ButtonEvent   ┌───────────────────────────┐
//!  │ button ×5  │ ─────────────► │ main task                 │
//!  │ (GPIOTE)   │   (channel)    │  App: session/clock/menu  │
//!  └────────────┘                │  Ticker every 10 ms       │──► SSD1306 (I²C)
//!                                │  settings ⇄ flash (NVMC)  │
//!                                └───────────────────────────┘
//! ```

#![no_std]
#![no_main]

mod error;
mod storage;
mod ui;

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::Pin;
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Duration, Instant, Ticker};
use lifepuck::config::TICK_INTERVAL_MS;
use lifepuck::input::Button;
use lifepuck::{App, Settings};
use {defmt_rtt as _, panic_probe as _};

use crate::storage::{AsyncFlash, SETTINGS_STORE};
use crate::ui::{display, BUTTON_EVENTS};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("lifepuck starting");

    // Settings
    let mut flash = AsyncFlash::new(Nvmc::new(p.NVMC));
    let settings = {
        let mut store = SETTINGS_STORE.lock().await;
        store.load_from_flash(&mut flash).await;
        Settings::load(store.cache())
    };
    info!("Settings: {}", settings);

    // Display
    let twim = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut oled = match display::init(twim) {
        Ok(oled) => Some(oled),
        Err(e) => {
            warn!("Display unavailable: {}", e);
            None
        }
    };

    // Buttons
    let buttons = [
        (p.P0_11.degrade(), Button::LeftUp),
        (p.P0_12.degrade(), Button::LeftDown),
        (p.P0_24.degrade(), Button::RightUp),
        (p.P0_25.degrade(), Button::RightDown),
        (p.P0_03.degrade(), Button::Menu),
    ];
    for (pin, button) in buttons {
        if spawner.spawn(ui::buttons::button_task(pin, button)).is_err() {
            warn!("Could not spawn task for {}", button);
        }
    }

    let mut app = App::new(settings);
    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let rx = BUTTON_EVENTS.receiver();

    loop {
        match select(rx.receive(), ticker.next()).await {
            Either::First(event) => {
                if let Some(committed) = app.on_press(event.button, event.press, now_ms()) {
                    info!("Committed: {}", committed);
                }
            }
            Either::Second(()) => {
                for committed in app.on_tick(now_ms()) {
                    info!("Committed: {}", committed);
                }
            }
        }

        if let Some(settings) = app.take_settings_to_persist() {
            let mut store = SETTINGS_STORE.lock().await;
            settings.save(store.cache_mut());
            if store.save_to_flash(&mut flash).await.is_err() {
                warn!("Settings not persisted; they will reset on power-up");
            }
        }

        if app.take_redraw() {
            if let Some(oled) = oled.as_mut() {
                if let Err(e) = display::draw(oled, &app, now_ms()) {
                    warn!("Display draw failed: {}", e);
                }
            }
        }
    }
}
