//! SQLite persistence for PastePad.
//!
//! All operations are single statements; there are no multi-row transactions
//! anywhere in the core (see the concurrency notes in DESIGN.md).

mod entry_repository;

pub use entry_repository::EntryRepository;
