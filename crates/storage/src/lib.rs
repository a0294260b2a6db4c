#![forbid(unsafe_code)]

pub mod preferences;
pub mod repository;
pub mod result_log;
pub mod sqlite;

pub use preferences::SoundPreference;
pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError, keys};
pub use result_log::ResultLog;
