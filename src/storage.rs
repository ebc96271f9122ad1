//! Persistent storage for game settings.
//!
//! Uses the nRF52840's internal flash via `sequential-storage` crate.
//! Each setting is its own map item keyed by [`SettingKey::id`], holding
//! an `i32`. The RAM side is a [`SettingsCache`] with a dirty flag, so
//! unchanged settings never touch flash.

use core::ops::Range;

use defmt::{debug, error, info, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_storage::nor_flash::{ErrorType, NorFlash, ReadNorFlash};
use embedded_storage_async::nor_flash as async_flash;
use lifepuck::config::{STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use lifepuck::settings::{SettingKey, SettingsCache};
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};

use crate::error::Error;

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Scratch buffer for one map item (key byte + i32 + item header).
const ITEM_BUFFER_SIZE: usize = 32;

fn flash_range() -> Range<u32> {
    STORAGE_START..STORAGE_END
}

/// Presents a blocking NOR flash (the nRF NVMC) through the async traits
/// `sequential-storage` expects. Every call completes immediately.
pub struct AsyncFlash<F> {
    inner: F,
}

impl<F> AsyncFlash<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: ErrorType> ErrorType for AsyncFlash<F> {
    type Error = F::Error;
}

impl<F: ReadNorFlash> async_flash::ReadNorFlash for AsyncFlash<F> {
    const READ_SIZE: usize = F::READ_SIZE;

    async fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        self.inner.read(offset, bytes)
    }

    fn capacity(&self) -> usize {
        self.inner.capacity()
    }
}

impl<F: NorFlash> async_flash::NorFlash for AsyncFlash<F> {
    const WRITE_SIZE: usize = F::WRITE_SIZE;
    const ERASE_SIZE: usize = F::ERASE_SIZE;

    async fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        self.inner.erase(from, to)
    }

    async fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        self.inner.write(offset, bytes)
    }
}

/// Settings cache synced with flash.
pub struct SettingsStore {
    cache: SettingsCache,
}

impl SettingsStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            cache: SettingsCache::new(),
        }
    }

    pub fn cache(&self) -> &SettingsCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut SettingsCache {
        &mut self.cache
    }

    /// Load every setting from flash. Unreadable keys are left unset, so
    /// callers fall back to defaults for them.
    pub async fn load_from_flash(&mut self, flash: &mut impl async_flash::NorFlash) {
        let mut loaded = 0;
        for key in SettingKey::ALL {
            match Self::fetch(flash, key).await {
                Ok(value) => {
                    if value.is_some() {
                        loaded += 1;
                    }
                    self.cache.load_raw(key, value);
                }
                Err(_) => {
                    warn!("Settings: could not read {}, using default", key.name());
                    self.cache.load_raw(key, None);
                }
            }
        }
        self.cache.mark_clean();
        info!("Loaded {} settings from flash", loaded);
    }

    async fn fetch<S: async_flash::NorFlash>(
        flash: &mut S,
        key: SettingKey,
    ) -> Result<Option<i32>, Error> {
        let mut buf = [0u8; ITEM_BUFFER_SIZE];
        let value = fetch_item::<u8, i32, _>(
            flash,
            flash_range(),
            &mut NoCache::new(),
            &mut buf,
            &key.id(),
        )
        .await
        .map_err(|e| {
            error!("Flash read error: {:?}", defmt::Debug2Format(&e));
            Error::Storage
        })?;
        Ok(value)
    }

    /// Persist every setting to flash if anything changed.
    pub async fn save_to_flash(
        &mut self,
        flash: &mut impl async_flash::NorFlash,
    ) -> Result<(), Error> {
        if !self.cache.is_dirty() {
            debug!("SettingsStore: no changes to save");
            return Ok(());
        }

        let mut buf = [0u8; ITEM_BUFFER_SIZE];
        for key in SettingKey::ALL {
            if let Some(value) = self.cache.raw(key) {
                store_item::<u8, i32, _>(
                    flash,
                    flash_range(),
                    &mut NoCache::new(),
                    &mut buf,
                    &key.id(),
                    &value,
                )
                .await
                .map_err(|e| {
                    error!("Flash write error: {:?}", defmt::Debug2Format(&e));
                    Error::Storage
                })?;
            }
        }

        self.cache.mark_clean();
        info!("Saved settings to flash");
        Ok(())
    }
}

/// Global settings store (protected by mutex for async access).
pub static SETTINGS_STORE: Mutex<CriticalSectionRawMutex, SettingsStore> =
    Mutex::new(SettingsStore::new());
