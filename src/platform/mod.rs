//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks
//! - Storage (LocalStorage on web, a data directory on native)
//! - Logger setup

pub mod storage;
pub mod time;

pub use storage::{MemoryStorage, Storage, StorageError};
pub use time::Ticker;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

/// Install the platform logger. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialised");
    }
}

/// Install the platform logger. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    if env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
        .is_err()
    {
        log::debug!("Logger already initialised");
    }
}
