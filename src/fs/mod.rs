//! Mounted archive file systems.

mod instance;
mod store;

pub use instance::ArchiveFileSystem;
pub use store::{ArchiveStore, STORE_TYPE};

/// Name of the one file attribute view every file system supports.
pub const BASIC_ATTRIBUTE_VIEW: &str = "basic";
