//! Infrastructure layer - external adapters (storage, filesystem, OS).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod config;
pub mod downloads;
pub mod link_opener;
pub mod local_storage;
pub mod prompt;

pub use config::{ensure_config_exists, load_config, render_config};
pub use downloads::save_download;
pub use link_opener::{LinkOpener, SystemOpener};
pub use local_storage::{KeyValueStore, LocalStorage};
#[cfg(test)]
pub use local_storage::MemoryStorage;
pub use prompt::{AssumeYes, Confirm, StdinPrompt};
