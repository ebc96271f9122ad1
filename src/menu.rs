//! Contextual menu and screen state.
//!
//! The menu is a flat list navigated with a saturating cursor. The
//! controller in [`crate::app`] decides what each item does.
//!
//! The settings screen edits a draft copy of [`Settings`] one field at a
//! time; nothing is applied until the last field is confirmed.

use crate::config::{SETTING_EDIT_COARSE_STEP, SETTING_VALUE_LIMIT};
use crate::input::{Button, PressKind};
use crate::settings::{PlayerMode, Settings};

/// Screens (views) the UI can be in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Life totals and arc gauge.
    #[default]
    Counter,
    /// Contextual menu.
    Menu,
    /// Committed history table.
    History,
    /// Start life and step editor.
    Settings,
}

/// Contextual menu entries, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuItem {
    ResetLife,
    TogglePlayers,
    History,
    ToggleClock,
    ResetClock,
    Settings,
    Back,
}

impl MenuItem {
    pub const ALL: [MenuItem; 7] = [
        MenuItem::ResetLife,
        MenuItem::TogglePlayers,
        MenuItem::History,
        MenuItem::ToggleClock,
        MenuItem::ResetClock,
        MenuItem::Settings,
        MenuItem::Back,
    ];

    /// Label shown for this item. The player toggle names the mode it
    /// switches to.
    pub fn label(self, mode: PlayerMode) -> &'static str {
        match self {
            MenuItem::ResetLife => "Reset life",
            MenuItem::TogglePlayers => match mode {
                PlayerMode::OnePlayer => "2 players",
                PlayerMode::TwoPlayer => "1 player",
            },
            MenuItem::History => "History",
            MenuItem::ToggleClock => "Start/stop clock",
            MenuItem::ResetClock => "Reset clock",
            MenuItem::Settings => "Settings",
            MenuItem::Back => "Back",
        }
    }
}

/// Move selection cursor one item up.
pub fn select_prev(selected: usize) -> usize {
    selected.saturating_sub(1)
}

/// Move selection cursor one item down if another item exists.
pub fn select_next(selected: usize, item_count: usize) -> usize {
    if selected + 1 < item_count {
        selected + 1
    } else {
        selected
    }
}

/// Navigation intent of a button press while a list screen is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuNav {
    Prev,
    Next,
    Select,
    Close,
}

impl MenuNav {
    pub fn from_button(button: Button, press: PressKind) -> Self {
        match (button, press) {
            (Button::LeftUp | Button::RightUp, _) => MenuNav::Prev,
            (Button::LeftDown | Button::RightDown, _) => MenuNav::Next,
            (Button::Menu, PressKind::Short) => MenuNav::Select,
            (Button::Menu, PressKind::Long) => MenuNav::Close,
        }
    }
}

/// Cursor over [`MenuItem::ALL`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Menu {
    selected: usize,
}

impl Menu {
    pub const fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn items(&self) -> &'static [MenuItem] {
        &MenuItem::ALL
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected.min(MenuItem::ALL.len() - 1)]
    }

    pub fn select_prev(&mut self) {
        self.selected = select_prev(self.selected);
    }

    pub fn select_next(&mut self) {
        self.selected = select_next(self.selected, MenuItem::ALL.len());
    }

    /// Put the cursor back on the first item.
    pub fn rewind(&mut self) {
        self.selected = 0;
    }
}

/// Editable fields on the settings screen, in edit order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingField {
    StartLife,
    StepSmall,
    StepLarge,
}

impl SettingField {
    pub const ALL: [SettingField; 3] = [
        SettingField::StartLife,
        SettingField::StepSmall,
        SettingField::StepLarge,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingField::StartLife => "Start life",
            SettingField::StepSmall => "Small step",
            SettingField::StepLarge => "Large step",
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            SettingField::StartLife => Some(SettingField::StepSmall),
            SettingField::StepSmall => Some(SettingField::StepLarge),
            SettingField::StepLarge => None,
        }
    }
}

/// Intent of a button press on the settings screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditNav {
    /// Add this amount to the current field.
    Adjust(i32),
    /// Confirm the current field.
    Next,
    Cancel,
}

impl EditNav {
    pub fn from_button(button: Button, press: PressKind) -> Self {
        let step = match press {
            PressKind::Short => 1,
            PressKind::Long => SETTING_EDIT_COARSE_STEP,
        };
        match (button, press) {
            (Button::LeftUp | Button::RightUp, _) => EditNav::Adjust(step),
            (Button::LeftDown | Button::RightDown, _) => EditNav::Adjust(-step),
            (Button::Menu, PressKind::Short) => EditNav::Next,
            (Button::Menu, PressKind::Long) => EditNav::Cancel,
        }
    }
}

/// Draft settings plus the field under the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettingsEditor {
    field: SettingField,
    draft: Settings,
}

impl SettingsEditor {
    pub fn new(current: Settings) -> Self {
        Self {
            field: SettingField::StartLife,
            draft: current.validated(),
        }
    }

    pub fn field(&self) -> SettingField {
        self.field
    }

    pub fn draft(&self) -> Settings {
        self.draft
    }

    pub fn value(&self, field: SettingField) -> i32 {
        match field {
            SettingField::StartLife => self.draft.start_life,
            SettingField::StepSmall => self.draft.step_small,
            SettingField::StepLarge => self.draft.step_large,
        }
    }

    /// Move the current field by `delta`, held inside `1..SETTING_VALUE_LIMIT`.
    pub fn adjust(&mut self, delta: i32) {
        let value = self
            .value(self.field)
            .saturating_add(delta)
            .clamp(1, SETTING_VALUE_LIMIT - 1);
        match self.field {
            SettingField::StartLife => self.draft.start_life = value,
            SettingField::StepSmall => self.draft.step_small = value,
            SettingField::StepLarge => self.draft.step_large = value,
        }
    }

    /// Confirm the current field. Returns true once the last field is done.
    pub fn advance(&mut self) -> bool {
        match self.field.next() {
            Some(next) => {
                self.field = next;
                false
            }
            None => true,
        }
    }
}

impl Default for SettingsEditor {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_prev_saturates_at_zero() {
        assert_eq!(select_prev(0), 0);
        assert_eq!(select_prev(3), 2);
    }

    #[test]
    fn select_next_stops_at_last_item() {
        assert_eq!(select_next(0, 3), 1);
        assert_eq!(select_next(2, 3), 2);
        assert_eq!(select_next(0, 0), 0);
    }

    #[test]
    fn menu_cursor_walks_items() {
        let mut menu = Menu::new();
        assert_eq!(menu.selected(), MenuItem::ResetLife);
        menu.select_prev();
        assert_eq!(menu.selected(), MenuItem::ResetLife);

        for _ in 0..10 {
            menu.select_next();
        }
        assert_eq!(menu.selected(), MenuItem::Back);
        assert_eq!(menu.selected_index(), MenuItem::ALL.len() - 1);

        menu.rewind();
        assert_eq!(menu.selected_index(), 0);
    }

    #[test]
    fn toggle_label_names_target_mode() {
        assert_eq!(MenuItem::TogglePlayers.label(PlayerMode::OnePlayer), "2 players");
        assert_eq!(MenuItem::TogglePlayers.label(PlayerMode::TwoPlayer), "1 player");
        assert_eq!(MenuItem::Back.label(PlayerMode::TwoPlayer), "Back");
    }

    #[test]
    fn buttons_navigate() {
        assert_eq!(MenuNav::from_button(Button::RightUp, PressKind::Long), MenuNav::Prev);
        assert_eq!(MenuNav::from_button(Button::LeftDown, PressKind::Short), MenuNav::Next);
        assert_eq!(MenuNav::from_button(Button::Menu, PressKind::Short), MenuNav::Select);
        assert_eq!(MenuNav::from_button(Button::Menu, PressKind::Long), MenuNav::Close);
    }

    #[test]
    fn edit_buttons_step_fine_and_coarse() {
        assert_eq!(EditNav::from_button(Button::LeftUp, PressKind::Short), EditNav::Adjust(1));
        assert_eq!(
            EditNav::from_button(Button::RightDown, PressKind::Long),
            EditNav::Adjust(-SETTING_EDIT_COARSE_STEP)
        );
        assert_eq!(EditNav::from_button(Button::Menu, PressKind::Short), EditNav::Next);
        assert_eq!(EditNav::from_button(Button::Menu, PressKind::Long), EditNav::Cancel);
    }

    #[test]
    fn editor_clamps_to_accepted_range() {
        let mut editor = SettingsEditor::new(Settings::default());
        editor.adjust(-1000);
        assert_eq!(editor.value(SettingField::StartLife), 1);
        editor.adjust(i32::MAX);
        assert_eq!(editor.value(SettingField::StartLife), SETTING_VALUE_LIMIT - 1);
        assert_eq!(editor.draft().validated(), editor.draft());
    }

    #[test]
    fn editor_walks_fields_then_finishes() {
        let mut editor = SettingsEditor::new(Settings::default());
        assert_eq!(editor.field(), SettingField::StartLife);
        assert!(!editor.advance());
        editor.adjust(2);
        assert_eq!(editor.field(), SettingField::StepSmall);
        assert!(!editor.advance());
        editor.adjust(-1);
        assert!(editor.advance());
        assert_eq!(editor.field(), SettingField::StepLarge);

        let draft = editor.draft();
        assert_eq!((draft.start_life, draft.step_small, draft.step_large), (40, 3, 4));
    }
}
