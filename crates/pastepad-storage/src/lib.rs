//! Upload directory provider.
//!
//! The [`UploadStore`] trait is the filesystem seam the rest of the system
//! talks to: directory listing, existence/metadata checks, text reads,
//! collision-resolved saves, deletes, and quarantine moves. The only backend
//! is [`LocalUploadStore`]; the trait keeps the reconciler and the HTTP
//! handlers decoupled from concrete paths.

mod local;
mod traits;

pub use local::LocalUploadStore;
pub use traits::{FileStat, StorageError, StorageResult, UploadStore, QUARANTINE_DIR};
