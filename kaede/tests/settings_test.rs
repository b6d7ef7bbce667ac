mod common;

use common::MemFlash;
use embassy_futures::block_on;
use embassy_futures::select::select;
use embassy_futures::yield_now;
use kaede::channel::FLASH_CHANNEL;
use kaede::config::StorageConfig;
use kaede::settings::{KanaScheme, SettingKey, Settings};
use kaede::storage::Storage;

/// Cycling the kana scheme N times must persist `(initial + N) mod COUNT`
/// and survive a reload from the store.
///
/// Single test function: the flash channel is a process-wide queue.
#[test]
fn settings_cycle_persists_and_reloads() {
    block_on(async {
        let mut storage = Storage::new(MemFlash::new(), StorageConfig::default()).await;

        // Fresh store: everything decodes to defaults.
        let settings = Settings::from_bytes(&storage.read_settings().await);
        assert_eq!(settings, Settings::default());

        let cycles = 8usize; // wraps past the 6 schemes
        {
            let storage_task = storage.run();
            let driver = async {
                let mut settings = Settings::default();
                for _ in 0..cycles {
                    settings.cycle_kana();
                    // Let the storage task drain the queue between writes.
                    while !FLASH_CHANNEL.is_empty() {
                        yield_now().await;
                    }
                }
                // The last receive may still be mid-write; let it finish.
                for _ in 0..64 {
                    yield_now().await;
                }
                settings
            };
            let (_, settings) = match select(storage_task, driver).await {
                embassy_futures::select::Either::First(_) => unreachable!("storage task never returns"),
                embassy_futures::select::Either::Second(s) => ((), s),
            };
            assert_eq!(settings.kana as u8, (cycles % KanaScheme::COUNT as usize) as u8);
        }

        // Reload from flash: the persisted byte reproduces the scheme.
        let bytes = storage.read_settings().await;
        assert_eq!(bytes[SettingKey::KanaScheme as usize], (cycles % KanaScheme::COUNT as usize) as u8);
        let reloaded = Settings::from_bytes(&bytes);
        assert_eq!(reloaded.kana, KanaScheme::from_byte((cycles % KanaScheme::COUNT as usize) as u8));

        // A corrupted byte self-heals to the default at decode time.
        let mut corrupt = bytes;
        corrupt[SettingKey::KanaScheme as usize] = 0xC8;
        assert_eq!(Settings::from_bytes(&corrupt).kana, KanaScheme::Romaji);
    });
}
