//! SSD1306 OLED display wrapper.
//!
//! The panel is monochrome, so the gauge colour is shown as stroke weight:
//! a red (critical) gauge is drawn bold.

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_5X8, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::{BinaryColor, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Text};
use heapless::{String, Vec};
use lifepuck::life::color::RED;
use lifepuck::life::history::{format_pending, HistoryRow};
use lifepuck::life::{ArcSegment, PlayerId};
use lifepuck::menu::{MenuItem, Screen, SettingField};
use lifepuck::settings::PlayerMode;
use lifepuck::App;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::error::Error;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Gauge circle: top-left corner and diameter (px).
const GAUGE_DIAMETER: u32 = 60;
const GAUGE_SINGLE: Point = Point::new(2, 2);
const GAUGE_DUEL: Point = Point::new(34, 2);

/// Menu / history rows visible below the title.
const MENU_ROWS: usize = 4;
const HISTORY_ROWS: usize = 5;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Result<Display<I2C>, Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().map_err(|_| Error::Display)?;
    display.clear_buffer();
    display.flush().map_err(|_| Error::Display)?;
    Ok(display)
}

fn text_style(font: &'static MonoFont<'static>) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(font)
        .text_color(BinaryColor::On)
        .build()
}

/// Render whatever screen the app is on.
pub fn draw<I2C>(display: &mut Display<I2C>, app: &App, now_ms: u64) -> Result<(), Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();

    match app.screen() {
        Screen::Counter => draw_counter(display, app, now_ms),
        Screen::Menu => draw_menu(display, app),
        Screen::History => draw_history(display, app),
        Screen::Settings => draw_settings(display, app),
    }

    display.flush().map_err(|_| Error::Display)
}

fn stroke_width(color: Rgb565) -> u32 {
    if color == RED {
        3
    } else {
        1
    }
}

fn draw_gauge<D>(target: &mut D, top_left: Point, segment: &ArcSegment)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let arc = Arc::new(
        top_left,
        GAUGE_DIAMETER,
        Angle::from_degrees(segment.start_angle as f32),
        Angle::from_degrees(segment.sweep() as f32),
    );
    let _ = arc
        .into_styled(PrimitiveStyle::with_stroke(
            BinaryColor::On,
            stroke_width(segment.color),
        ))
        .draw(target);
}

fn number(value: i32) -> String<12> {
    let mut out = String::new();
    let _ = write!(out, "{}", value);
    out
}

fn draw_counter<D>(target: &mut D, app: &App, now_ms: u64)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let session = app.session();
    let clock = app.clock().format(now_ms);
    let big = text_style(&FONT_10X20);
    let small = text_style(&FONT_6X10);

    match session.mode() {
        PlayerMode::OnePlayer => {
            if let Some(segment) = session.arc_segment(PlayerId::Single) {
                draw_gauge(target, GAUGE_SINGLE, &segment);
            }
            let total = number(session.life_total(PlayerId::Single).unwrap_or_default());
            let _ = Text::with_alignment(&total, Point::new(32, 38), big, Alignment::Center)
                .draw(target);

            let pending = session.pending_change(PlayerId::Single);
            if session.is_commit_pending() {
                let _ = Text::new(&format_pending(pending), Point::new(72, 28), big).draw(target);
            }
            let _ = Text::new(&clock, Point::new(72, 56), small).draw(target);
        }
        PlayerMode::TwoPlayer => {
            for player in [PlayerId::One, PlayerId::Two] {
                if let Some(segment) = session.arc_segment(player) {
                    draw_gauge(target, GAUGE_DUEL, &segment);
                }
            }

            let (left, right) = (Point::new(0, 28), Point::new(127, 28));
            let p1 = number(session.life_total(PlayerId::One).unwrap_or_default());
            let p2 = number(session.life_total(PlayerId::Two).unwrap_or_default());
            let _ = Text::with_alignment(&p1, left, big, Alignment::Left).draw(target);
            let _ = Text::with_alignment(&p2, right, big, Alignment::Right).draw(target);

            for (player, x, align) in [
                (PlayerId::One, 0, Alignment::Left),
                (PlayerId::Two, 127, Alignment::Right),
            ] {
                let pending = session.pending_change(player);
                if pending != 0 {
                    let label = format_pending(pending);
                    let _ = Text::with_alignment(&label, Point::new(x, 46), small, align)
                        .draw(target);
                }
            }

            let _ = Text::with_alignment(&clock, Point::new(64, 36), small, Alignment::Center)
                .draw(target);
        }
    }
}

fn draw_menu<D>(target: &mut D, app: &App)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = text_style(&FONT_6X10);
    let _ = Text::new("Menu", Point::new(0, 10), style).draw(target);

    let mode = app.session().mode();
    let selected = app.menu().selected_index();
    let first = selected.saturating_sub(MENU_ROWS - 1);

    for (row, item) in MenuItem::ALL.iter().enumerate().skip(first).take(MENU_ROWS) {
        let marker = if row == selected { ">" } else { " " };
        let mut line: String<24> = String::new();
        let _ = line.push_str(marker);
        let _ = line.push_str(" ");
        let _ = line.push_str(item.label(mode));
        let y = 24 + ((row - first) as i32 * 10);
        let _ = Text::new(line.as_str(), Point::new(0, y), style).draw(target);
    }
}

fn draw_history<D>(target: &mut D, app: &App)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let title = text_style(&FONT_6X10);
    let rows_style = text_style(&FONT_5X8);
    let _ = Text::new("History", Point::new(0, 10), title).draw(target);
    if app.session().history_full() {
        let _ = Text::with_alignment("FULL", Point::new(127, 10), title, Alignment::Right)
            .draw(target);
    }

    let rows: Vec<HistoryRow, HISTORY_ROWS> = app.history_rows();
    if rows.is_empty() {
        let _ = Text::new("No changes yet", Point::new(0, 30), title).draw(target);
        return;
    }

    for (i, row) in rows.iter().enumerate() {
        let x = row.column as i32 * 64;
        let y = 22 + (i as i32 * 9);
        let _ = Text::new(row.text.as_str(), Point::new(x, y), rows_style).draw(target);
    }
}

fn draw_settings<D>(target: &mut D, app: &App)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = text_style(&FONT_6X10);
    let hint = text_style(&FONT_5X8);
    let _ = Text::new("Settings", Point::new(0, 10), style).draw(target);

    let editor = app.editor();
    for (row, field) in SettingField::ALL.iter().enumerate() {
        let marker = if *field == editor.field() { ">" } else { " " };
        let mut line: String<24> = String::new();
        let _ = write!(line, "{} {}", marker, field.label());
        let y = 24 + (row as i32 * 10);
        let _ = Text::new(line.as_str(), Point::new(0, y), style).draw(target);
        let value = number(editor.value(*field));
        let _ = Text::with_alignment(&value, Point::new(127, y), style, Alignment::Right)
            .draw(target);
    }

    let _ = Text::new("Menu: next  hold: cancel", Point::new(0, 62), hint).draw(target);
}
