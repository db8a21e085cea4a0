//! Core domain types for PastePad: clipboard entry models, the sync policy
//! model, runtime settings, process configuration, and the unified error type.

pub mod config;
pub mod error;
pub mod models;
pub mod settings;

pub use config::ServerConfig;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use settings::{AppSettings, AuthSettings, UploadSettings};
