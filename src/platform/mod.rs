//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (frame timestamps to elapsed seconds)
//! - Storage (LocalStorage on web, a JSON file natively)

pub mod clock;
pub mod storage;

pub use clock::FrameClock;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError, default_storage};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
