//! Path model for archives.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ FsPath (adapter)                                     │
//! │   ├── ArchivePath  "/dir/file"  (identity, value)    │
//! │   └── Arc<ArchiveFileSystem>    (owning mount)       │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! [`ArchivePath`] is the pure string algebra (normalization, parent,
//! segment count). [`FsPath`] binds it to a mounted file system.

mod adapter;
mod identity;
#[cfg(feature = "matcher")]
mod matcher;

pub use adapter::FsPath;
pub use identity::{ArchivePath, SEPARATOR, SEPARATOR_STR};
#[cfg(feature = "matcher")]
pub use matcher::PathMatcher;
