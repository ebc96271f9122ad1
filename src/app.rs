//! UI state machine shared by the firmware and host tests.
//!
//! The embedded main loop feeds debounced button presses and periodic ticks
//! into [`App`]; the app updates the game and tells the loop when to redraw
//! and when settings need writing back to flash.

use heapless::Vec;

use crate::clock::GameClock;
use crate::input::{action_for, gesture_for_press, Action, Button, PressKind};
use crate::life::history::HistoryRow;
use crate::life::{GameSession, LifeHistoryEvent};
use crate::menu::{
    select_next, select_prev, EditNav, Menu, MenuItem, MenuNav, Screen, SettingsEditor,
};
use crate::settings::Settings;

pub struct App {
    session: GameSession,
    clock: GameClock,
    menu: Menu,
    editor: SettingsEditor,
    screen: Screen,
    /// First history row on screen (0 = newest).
    history_top: usize,
    /// Clock seconds at the last redraw.
    shown_secs: u32,
    redraw: bool,
    persist: Option<Settings>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            session: GameSession::new(settings),
            clock: GameClock::new(),
            menu: Menu::new(),
            editor: SettingsEditor::default(),
            screen: Screen::Counter,
            history_top: 0,
            shown_secs: 0,
            redraw: true,
            persist: None,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Draft shown on the settings screen.
    pub fn editor(&self) -> &SettingsEditor {
        &self.editor
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn history_top(&self) -> usize {
        self.history_top
    }

    /// Handle one debounced button press.
    ///
    /// A tap that lands after the previous burst's window closes that burst
    /// before the next tick does; its event is returned here.
    pub fn on_press(
        &mut self,
        button: Button,
        press: PressKind,
        now_ms: u64,
    ) -> Option<LifeHistoryEvent> {
        let mut committed = None;
        match self.screen {
            Screen::Counter => committed = self.on_counter_press(button, press, now_ms),
            Screen::Menu => match MenuNav::from_button(button, press) {
                MenuNav::Prev => self.menu.select_prev(),
                MenuNav::Next => self.menu.select_next(),
                MenuNav::Select => self.activate(self.menu.selected(), now_ms),
                MenuNav::Close => self.screen = Screen::Counter,
            },
            Screen::History => match MenuNav::from_button(button, press) {
                MenuNav::Prev => self.history_top = select_prev(self.history_top),
                MenuNav::Next => {
                    let rows = self.session.merged_history().len();
                    self.history_top = select_next(self.history_top, rows);
                }
                MenuNav::Select | MenuNav::Close => self.screen = Screen::Menu,
            },
            Screen::Settings => match EditNav::from_button(button, press) {
                EditNav::Adjust(delta) => self.editor.adjust(delta),
                EditNav::Next => {
                    if self.editor.advance() {
                        self.save_settings();
                    }
                }
                EditNav::Cancel => self.screen = Screen::Menu,
            },
        }
        self.redraw = true;
        committed
    }

    fn on_counter_press(
        &mut self,
        button: Button,
        press: PressKind,
        now_ms: u64,
    ) -> Option<LifeHistoryEvent> {
        let mode = self.session.mode();
        let gesture = gesture_for_press(mode, button, press);

        match action_for(mode, gesture, self.session.settings()) {
            Some(Action::Change { player, delta }) => {
                let at = self.clock.moment(now_ms);
                self.session.handle_change(player, delta, at)
            }
            Some(Action::OpenMenu) => {
                self.menu.rewind();
                self.screen = Screen::Menu;
                None
            }
            None => None,
        }
    }

    fn activate(&mut self, item: MenuItem, now_ms: u64) {
        #[cfg(feature = "defmt")]
        defmt::info!("Menu: {}", item);

        self.screen = Screen::Counter;
        match item {
            MenuItem::ResetLife => self.session.reset_life(),
            MenuItem::TogglePlayers => {
                let mode = self.session.mode().toggled();
                self.session.set_mode(mode);
                self.persist = Some(*self.session.settings());
            }
            MenuItem::History => {
                self.history_top = 0;
                self.screen = Screen::History;
            }
            MenuItem::ToggleClock => self.clock.toggle(now_ms),
            MenuItem::ResetClock => self.clock.reset(),
            MenuItem::Settings => {
                self.editor = SettingsEditor::new(*self.session.settings());
                self.screen = Screen::Settings;
            }
            MenuItem::Back => {}
        }
    }

    /// Apply the edited draft. A changed draft starts a fresh game and is
    /// queued for flash; an unchanged one leaves the game alone.
    fn save_settings(&mut self) {
        self.screen = Screen::Counter;
        let draft = self.editor.draft();
        if draft == *self.session.settings() {
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::info!("Settings edited: {}", draft);
        self.session.apply_settings(draft);
        self.persist = Some(*self.session.settings());
    }

    /// Periodic tick: commits expired bursts and notices clock changes.
    pub fn on_tick(&mut self, now_ms: u64) -> Vec<LifeHistoryEvent, 2> {
        let committed = self.session.update(now_ms);
        let secs = self.clock.elapsed_secs(now_ms);
        if !committed.is_empty() || secs != self.shown_secs {
            self.shown_secs = secs;
            self.redraw = true;
        }
        committed
    }

    /// True once after anything visible changed.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.redraw)
    }

    /// Settings changed since the last call, if any.
    pub fn take_settings_to_persist(&mut self) -> Option<Settings> {
        self.persist.take()
    }

    /// Up to `N` history rows, newest first, starting at the scroll offset.
    pub fn history_rows<const N: usize>(&self) -> Vec<HistoryRow, N> {
        self.session
            .merged_history()
            .iter()
            .rev()
            .skip(self.history_top)
            .take(N)
            .map(HistoryRow::from)
            .collect()
    }
}
