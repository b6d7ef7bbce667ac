//! Persistent settings store on NOR flash.
//!
//! A `sequential-storage` key/value map holds one byte per setting slot,
//! keyed by [`SettingKey`]. The engine queues changed bytes on a channel;
//! the storage task owns the flash and performs the writes. Loads clamp
//! out-of-range bytes, so a corrupted store always self-heals.

use core::ops::Range;

use embedded_storage_async::nor_flash::NorFlash as AsyncNorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item, SerializationError, Value};
use sequential_storage::Error as SSError;

use crate::channel::FLASH_CHANNEL;
use crate::config::StorageConfig;
use crate::settings::{SettingKey, SETTING_COUNT};

/// Marker key proving the store has been initialized.
const STORAGE_CONFIG_KEY: u32 = 0xFE;

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashOperationMessage {
    /// A setting byte changed.
    SettingChange { key: SettingKey, value: u8 },
    /// Wipe the store.
    #[allow(dead_code)]
    Reset,
}

/// One stored item. The first serialized byte tags the variant so a fetch
/// can tell a settings byte from the init marker.
#[derive(Clone, Copy, Debug)]
enum StorageData {
    StorageConfig { enable: bool },
    Setting(u8),
}

const TAG_STORAGE_CONFIG: u8 = 0;
const TAG_SETTING: u8 = 1;

impl<'a> Value<'a> for StorageData {
    fn serialize_into(&self, buffer: &mut [u8]) -> Result<usize, SerializationError> {
        if buffer.len() < 2 {
            return Err(SerializationError::BufferTooSmall);
        }
        match self {
            StorageData::StorageConfig { enable } => {
                buffer[0] = TAG_STORAGE_CONFIG;
                buffer[1] = *enable as u8;
            }
            StorageData::Setting(value) => {
                buffer[0] = TAG_SETTING;
                buffer[1] = *value;
            }
        }
        Ok(2)
    }

    fn deserialize_from(buffer: &'a [u8]) -> Result<Self, SerializationError> {
        if buffer.len() < 2 {
            return Err(SerializationError::InvalidFormat);
        }
        match buffer[0] {
            TAG_STORAGE_CONFIG => Ok(StorageData::StorageConfig { enable: buffer[1] != 0 }),
            TAG_SETTING => Ok(StorageData::Setting(buffer[1])),
            _ => Err(SerializationError::InvalidFormat),
        }
    }
}

pub struct Storage<F: AsyncNorFlash> {
    flash: F,
    storage_range: Range<u32>,
}

impl<F: AsyncNorFlash> Storage<F> {
    /// Binds the store to its flash region and initializes it on first
    /// boot (or after corruption wiped the init marker).
    pub async fn new(flash: F, config: StorageConfig) -> Self {
        assert!(config.num_sectors >= 2, "settings store needs at least 2 sectors");

        let storage_range = if config.start_addr == 0 {
            (flash.capacity() - config.num_sectors as usize * F::ERASE_SIZE) as u32..flash.capacity() as u32
        } else {
            assert!(
                config.start_addr % F::ERASE_SIZE == 0,
                "settings store start address must be sector-aligned"
            );
            config.start_addr as u32..(config.start_addr + config.num_sectors as usize * F::ERASE_SIZE) as u32
        };

        let mut storage = Self { flash, storage_range };
        if !storage.check_enable().await {
            if let Err(e) = storage.initialize().await {
                print_storage_error::<F>(e);
            }
        }
        storage
    }

    async fn check_enable(&mut self) -> bool {
        let mut buf = [0u8; 32];
        matches!(
            fetch_item::<u32, StorageData, _>(
                &mut self.flash,
                self.storage_range.clone(),
                &mut NoCache::new(),
                &mut buf,
                &STORAGE_CONFIG_KEY,
            )
            .await,
            Ok(Some(StorageData::StorageConfig { enable: true }))
        )
    }

    async fn initialize(&mut self) -> Result<(), SSError<F::Error>> {
        let mut buf = [0u8; 32];
        sequential_storage::erase_all(&mut self.flash, self.storage_range.clone()).await?;
        for slot in 0..SETTING_COUNT as u32 {
            store_item::<u32, StorageData, _>(
                &mut self.flash,
                self.storage_range.clone(),
                &mut NoCache::new(),
                &mut buf,
                &slot,
                &StorageData::Setting(0),
            )
            .await?;
        }
        store_item::<u32, StorageData, _>(
            &mut self.flash,
            self.storage_range.clone(),
            &mut NoCache::new(),
            &mut buf,
            &STORAGE_CONFIG_KEY,
            &StorageData::StorageConfig { enable: true },
        )
        .await?;
        info!("settings store initialized");
        Ok(())
    }

    /// Reads all setting bytes. Missing or unreadable slots come back 0,
    /// the default for every setting.
    pub async fn read_settings(&mut self) -> [u8; SETTING_COUNT] {
        let mut bytes = [0u8; SETTING_COUNT];
        let mut buf = [0u8; 32];
        for (slot, byte) in bytes.iter_mut().enumerate() {
            match fetch_item::<u32, StorageData, _>(
                &mut self.flash,
                self.storage_range.clone(),
                &mut NoCache::new(),
                &mut buf,
                &(slot as u32),
            )
            .await
            {
                Ok(Some(StorageData::Setting(value))) => *byte = value,
                Ok(_) => {}
                Err(e) => print_storage_error::<F>(e),
            }
        }
        bytes
    }

    /// Reads one slot; used by the host-link and trackpad for their bytes.
    pub async fn read_setting(&mut self, key: SettingKey) -> u8 {
        let mut buf = [0u8; 32];
        match fetch_item::<u32, StorageData, _>(
            &mut self.flash,
            self.storage_range.clone(),
            &mut NoCache::new(),
            &mut buf,
            &(key as u32),
        )
        .await
        {
            Ok(Some(StorageData::Setting(value))) => value,
            _ => 0,
        }
    }

    /// The storage task: applies queued writes forever.
    pub async fn run(&mut self) {
        let mut buf = [0u8; 32];
        loop {
            let message = FLASH_CHANNEL.receive().await;
            if let Err(e) = match message {
                FlashOperationMessage::SettingChange { key, value } => {
                    debug!("persisting setting {:?} = {}", key, value);
                    store_item::<u32, StorageData, _>(
                        &mut self.flash,
                        self.storage_range.clone(),
                        &mut NoCache::new(),
                        &mut buf,
                        &(key as u32),
                        &StorageData::Setting(value),
                    )
                    .await
                }
                FlashOperationMessage::Reset => {
                    sequential_storage::erase_all(&mut self.flash, self.storage_range.clone()).await
                }
            } {
                print_storage_error::<F>(e);
            }
        }
    }
}

fn print_storage_error<F: AsyncNorFlash>(e: SSError<F::Error>) {
    match e {
        SSError::Storage { value: _ } => error!("storage: flash error"),
        SSError::FullStorage => error!("storage: full"),
        SSError::Corrupted {} => error!("storage: corrupted"),
        SSError::BufferTooBig => error!("storage: buffer too big"),
        SSError::BufferTooSmall(_) => error!("storage: buffer too small"),
        SSError::SerializationError(_) => error!("storage: bad item"),
        _ => error!("storage: unknown error"),
    }
}
