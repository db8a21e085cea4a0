pub mod entry;
pub mod sync;

pub use entry::{ClipboardEntry, EntryType, NewEntry};
pub use sync::{DbMissingFilePolicy, FileMissingDbPolicy, SyncPolicy, SyncReport};
