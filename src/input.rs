//! Gesture → game action mapping.
//!
//! The recognizer (touch layer or physical buttons) produces a [`Gesture`];
//! [`action_for`] turns it into what the game should do given the current
//! player mode and step settings.
//!
//! | Mode | Gesture            | Action              |
//! |------|--------------------|---------------------|
//! | 1P   | tap top / bottom   | ± small step        |
//! | 1P   | long press top/bot | ± large step        |
//! | 1P   | swipe down         | open menu           |
//! | 2P   | tap quadrant       | ± small step, seat by side |
//! | 2P   | swipe quadrant     | ± large step, seat by side |
//! | 2P   | long press         | open menu           |

use crate::config::LONG_PRESS_MS;
use crate::life::PlayerId;
use crate::settings::{PlayerMode, Settings};

/// Recognized user gestures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    // One-player
    TapTop,
    TapBottom,
    LongPressTop,
    LongPressBottom,
    SwipeDown,

    // Two-player
    TapTopLeft,
    TapBottomLeft,
    TapTopRight,
    TapBottomRight,
    SwipeUpLeft,
    SwipeDownLeft,
    SwipeUpRight,
    SwipeDownRight,
    LongPressMenu,
}

/// What a gesture asks the game to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    Change { player: PlayerId, delta: i32 },
    OpenMenu,
}

fn change(player: PlayerId, delta: i32) -> Option<Action> {
    Some(Action::Change { player, delta })
}

/// Map a gesture to an action. Gestures that belong to the other mode are
/// ignored.
pub fn action_for(mode: PlayerMode, gesture: Gesture, settings: &Settings) -> Option<Action> {
    let small = settings.step_small;
    let large = settings.step_large;

    match (mode, gesture) {
        (PlayerMode::OnePlayer, Gesture::TapTop) => change(PlayerId::Single, small),
        (PlayerMode::OnePlayer, Gesture::TapBottom) => change(PlayerId::Single, -small),
        (PlayerMode::OnePlayer, Gesture::LongPressTop) => change(PlayerId::Single, large),
        (PlayerMode::OnePlayer, Gesture::LongPressBottom) => change(PlayerId::Single, -large),
        (PlayerMode::OnePlayer, Gesture::SwipeDown) => Some(Action::OpenMenu),

        (PlayerMode::TwoPlayer, Gesture::TapTopLeft) => change(PlayerId::One, small),
        (PlayerMode::TwoPlayer, Gesture::TapBottomLeft) => change(PlayerId::One, -small),
        (PlayerMode::TwoPlayer, Gesture::SwipeUpLeft) => change(PlayerId::One, large),
        (PlayerMode::TwoPlayer, Gesture::SwipeDownLeft) => change(PlayerId::One, -large),
        (PlayerMode::TwoPlayer, Gesture::TapTopRight) => change(PlayerId::Two, small),
        (PlayerMode::TwoPlayer, Gesture::TapBottomRight) => change(PlayerId::Two, -small),
        (PlayerMode::TwoPlayer, Gesture::SwipeUpRight) => change(PlayerId::Two, large),
        (PlayerMode::TwoPlayer, Gesture::SwipeDownRight) => change(PlayerId::Two, -large),
        (PlayerMode::TwoPlayer, Gesture::LongPressMenu) => Some(Action::OpenMenu),

        _ => None,
    }
}

/// Physical buttons on the embedded build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
    Menu,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressKind {
    Short,
    Long,
}

/// Classify a press by how long the button was held.
pub fn classify_press(held_ms: u64) -> PressKind {
    if held_ms >= LONG_PRESS_MS {
        PressKind::Long
    } else {
        PressKind::Short
    }
}

/// Translate a button press into the gesture it stands in for.
///
/// In one-player mode both up buttons act as the top half of the screen and
/// both down buttons as the bottom half. In two-player mode each side of
/// buttons belongs to one seat and a long press stands in for a swipe.
pub fn gesture_for_press(mode: PlayerMode, button: Button, press: PressKind) -> Gesture {
    use Button::*;
    use PressKind::*;

    match mode {
        PlayerMode::OnePlayer => match (button, press) {
            (LeftUp | RightUp, Short) => Gesture::TapTop,
            (LeftUp | RightUp, Long) => Gesture::LongPressTop,
            (LeftDown | RightDown, Short) => Gesture::TapBottom,
            (LeftDown | RightDown, Long) => Gesture::LongPressBottom,
            (Menu, _) => Gesture::SwipeDown,
        },
        PlayerMode::TwoPlayer => match (button, press) {
            (LeftUp, Short) => Gesture::TapTopLeft,
            (LeftUp, Long) => Gesture::SwipeUpLeft,
            (LeftDown, Short) => Gesture::TapBottomLeft,
            (LeftDown, Long) => Gesture::SwipeDownLeft,
            (RightUp, Short) => Gesture::TapTopRight,
            (RightUp, Long) => Gesture::SwipeUpRight,
            (RightDown, Short) => Gesture::TapBottomRight,
            (RightDown, Long) => Gesture::SwipeDownRight,
            (Menu, _) => Gesture::LongPressMenu,
        },
    }
}
