//! Persisted game settings.
//!
//! Settings travel through a small integer key-value contract
//! ([`KeyValueStore`]) so the core never depends on how they are stored.
//! On the device the store is a flash-backed cache; in tests it is a plain
//! [`SettingsCache`].

use crate::config::{
    DEFAULT_START_LIFE, DEFAULT_STEP_LARGE, DEFAULT_STEP_SMALL, SETTING_VALUE_LIMIT,
};

/// One or two seats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerMode {
    #[default]
    OnePlayer,
    TwoPlayer,
}

impl PlayerMode {
    /// Decode the persisted value: `2` is two-player, anything else one-player.
    pub fn from_stored(value: i32) -> Self {
        if value == 2 {
            PlayerMode::TwoPlayer
        } else {
            PlayerMode::OnePlayer
        }
    }

    pub fn stored_value(self) -> i32 {
        match self {
            PlayerMode::OnePlayer => 1,
            PlayerMode::TwoPlayer => 2,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PlayerMode::OnePlayer => PlayerMode::TwoPlayer,
            PlayerMode::TwoPlayer => PlayerMode::OnePlayer,
        }
    }

    pub fn seat_count(self) -> usize {
        match self {
            PlayerMode::OnePlayer => 1,
            PlayerMode::TwoPlayer => 2,
        }
    }
}

/// Keys of the persisted settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingKey {
    StartLife,
    StepSmall,
    StepLarge,
    PlayerMode,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::StartLife,
        SettingKey::StepSmall,
        SettingKey::StepLarge,
        SettingKey::PlayerMode,
    ];

    /// Human-readable key name.
    pub fn name(self) -> &'static str {
        match self {
            SettingKey::StartLife => "life_max",
            SettingKey::StepSmall => "step_small",
            SettingKey::StepLarge => "step_large",
            SettingKey::PlayerMode => "player_mode",
        }
    }

    /// Stable one-byte id used as the flash map key. Never reuse an id.
    pub fn id(self) -> u8 {
        match self {
            SettingKey::StartLife => 0x01,
            SettingKey::StepSmall => 0x02,
            SettingKey::StepLarge => 0x03,
            SettingKey::PlayerMode => 0x04,
        }
    }

    fn index(self) -> usize {
        match self {
            SettingKey::StartLife => 0,
            SettingKey::StepSmall => 1,
            SettingKey::StepLarge => 2,
            SettingKey::PlayerMode => 3,
        }
    }
}

/// Integer key-value store (`getInt(key, default)` / `putInt(key, value)`).
pub trait KeyValueStore {
    /// Stored value, or `default` if the key was never written.
    fn get_int(&self, key: SettingKey, default: i32) -> i32;

    fn put_int(&mut self, key: SettingKey, value: i32);
}

/// In-memory copy of every setting with a dirty flag.
///
/// The device keeps one of these in RAM and syncs it with flash.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsCache {
    values: [Option<i32>; 4],
    dirty: bool,
}

impl SettingsCache {
    pub const fn new() -> Self {
        Self {
            values: [None; 4],
            dirty: false,
        }
    }

    /// Raw stored value, if any.
    pub fn raw(&self, key: SettingKey) -> Option<i32> {
        self.values[key.index()]
    }

    /// Load a value read from backing storage without marking it dirty.
    pub fn load_raw(&mut self, key: SettingKey, value: Option<i32>) {
        self.values[key.index()] = value;
    }

    /// True if the cache holds writes not yet persisted.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl KeyValueStore for SettingsCache {
    fn get_int(&self, key: SettingKey, default: i32) -> i32 {
        self.raw(key).unwrap_or(default)
    }

    fn put_int(&mut self, key: SettingKey, value: i32) {
        if self.values[key.index()] != Some(value) {
            self.values[key.index()] = Some(value);
            self.dirty = true;
        }
    }
}

/// User-configurable game settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Starting life, also the arc gauge's nominal maximum.
    pub start_life: i32,
    /// Tap step.
    pub step_small: i32,
    /// Long-press / swipe step.
    pub step_large: i32,
    pub player_mode: PlayerMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_life: DEFAULT_START_LIFE,
            step_small: DEFAULT_STEP_SMALL,
            step_large: DEFAULT_STEP_LARGE,
            player_mode: PlayerMode::OnePlayer,
        }
    }
}

/// Accept `1..SETTING_VALUE_LIMIT`, otherwise fall back.
#[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
fn sanitize(key: SettingKey, value: i32, fallback: i32) -> i32 {
    if (1..SETTING_VALUE_LIMIT).contains(&value) {
        value
    } else {
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "Settings: {} = {} out of range, using {}",
            key.name(),
            value,
            fallback
        );
        fallback
    }
}

impl Settings {
    /// Read all settings, replacing out-of-range values with defaults.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let defaults = Settings::default();
        Settings {
            start_life: store.get_int(SettingKey::StartLife, defaults.start_life),
            step_small: store.get_int(SettingKey::StepSmall, defaults.step_small),
            step_large: store.get_int(SettingKey::StepLarge, defaults.step_large),
            player_mode: PlayerMode::from_stored(store.get_int(
                SettingKey::PlayerMode,
                defaults.player_mode.stored_value(),
            )),
        }
        .validated()
    }

    /// Write all settings.
    pub fn save(&self, store: &mut impl KeyValueStore) {
        store.put_int(SettingKey::StartLife, self.start_life);
        store.put_int(SettingKey::StepSmall, self.step_small);
        store.put_int(SettingKey::StepLarge, self.step_large);
        store.put_int(SettingKey::PlayerMode, self.player_mode.stored_value());
    }

    /// Copy with every numeric field inside its accepted range.
    pub fn validated(self) -> Self {
        Settings {
            start_life: sanitize(SettingKey::StartLife, self.start_life, DEFAULT_START_LIFE),
            step_small: sanitize(SettingKey::StepSmall, self.step_small, DEFAULT_STEP_SMALL),
            step_large: sanitize(SettingKey::StepLarge, self.step_large, DEFAULT_STEP_LARGE),
            player_mode: self.player_mode,
        }
    }

    pub fn with_player_mode(self, player_mode: PlayerMode) -> Self {
        Settings {
            player_mode,
            ..self
        }
    }

    pub fn toggle_player_mode(&mut self) {
        self.player_mode = self.player_mode.toggled();
    }
}
