//! Business services: the sync reconciler and persisted settings.

pub mod settings;
pub mod sync;

pub use settings::SettingsStore;
pub use sync::SyncService;
