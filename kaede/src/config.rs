//! Compile-time configuration passed in by the board crate.

/// Configuration for the flash region backing the settings store.
#[derive(Clone, Copy, Debug)]
pub struct StorageConfig {
    /// Start address inside the flash. 0 means "the last `num_sectors`
    /// sectors of the chip".
    pub start_addr: usize,
    /// Number of erase sectors reserved for settings. Must be at least 2 so
    /// sequential-storage can garbage-collect.
    pub num_sectors: u8,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            start_addr: 0,
            num_sectors: 2,
        }
    }
}
