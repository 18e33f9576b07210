//! Learning content: the bank abstraction and its sources.
//!
//! - **Bank**: read-only lookup by theme and level (`ContentBank`)
//! - **Loader**: JSON files from a content directory
//! - **Seed**: built-in starter content used when nothing is configured

pub mod bank;
pub mod loader;
pub mod seed;

pub use bank::{ContentBank, MemoryBank};
pub use loader::{ContentLoadError, load_bank_from_dir, load_bank_from_file};
pub use seed::starter_bank;
