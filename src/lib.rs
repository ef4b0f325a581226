//! # archive-fs
//!
//! Mount in-memory archives as hierarchical file systems.
//!
//! An archive is a flat store of byte entries addressed by `/`-separated
//! paths. This crate puts a file system face on it, so code written against
//! paths and file systems can enumerate, address and delete archive entries:
//!
//! - **Paths**: [`ArchivePath`] is the canonical, always-absolute location;
//!   [`FsPath`] binds it to a mounted file system
//! - **File systems**: [`ArchiveFileSystem`] is one open-or-closed mount
//! - **Registry**: [`MountRegistry`] maps archive identifiers to mounts and
//!   allows at most one open mount per identifier
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use archive_fs::{Archive, MemoryArchive, MountEnv, MountRegistry, Url};
//!
//! let archive = Arc::new(MemoryArchive::new("site.jar"));
//! archive.add("/index.html", "<h1>hello</h1>");
//!
//! let registry = MountRegistry::new();
//! let env = MountEnv::new().with_archive(archive.clone());
//! let fs = registry.new_file_system(&Url::parse("archive://site.jar").unwrap(), &env)?;
//!
//! let page = fs.get_path(&["index.html"])?;
//! assert_eq!(page.to_string(), "/index.html");
//! assert_eq!(page.name_count(), 1);
//!
//! registry.delete(&page)?;
//! assert!(!archive.contains("/index.html"));
//!
//! fs.close();
//! # Ok::<(), archive_fs::FsError>(())
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Registry configuration (scheme, file name policy, archive factory)
//! - [`archive`]: The archive collaborator trait and an in-memory archive
//! - [`path`]: Archive paths, bound paths and path matchers
//! - [`mod@fs`]: Mounted file systems and their file store
//! - [`registry`]: The mount registry and entry operations
//! - [`error`]: Error type

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod error;
pub mod fs;
pub mod path;
pub mod registry;

// =============================================================================
// Prelude - import commonly used items with a single `use`
// =============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use archive_fs::prelude::*;
/// ```
pub mod prelude {
    // Archives
    pub use crate::{Archive, MemoryArchive};

    // Paths
    pub use crate::{ArchivePath, FsPath};

    // File systems and registry
    pub use crate::{ArchiveFileSystem, MountEnv, MountRegistry};

    // Errors
    pub use crate::{FsError, FsResult};
}

// =============================================================================
// Core Types
// =============================================================================

pub use archive::{memory_archive_factory, Archive, ArchiveFactory, MemoryArchive};
pub use config::{Config, ConfigBuilder, FileNamePolicy, DEFAULT_SCHEME};
pub use error::{ErrorKind, FsError, FsResult};
pub use fs::{ArchiveFileSystem, ArchiveStore, BASIC_ATTRIBUTE_VIEW};
#[cfg(feature = "matcher")]
pub use path::PathMatcher;
pub use path::{ArchivePath, FsPath, SEPARATOR, SEPARATOR_STR};
pub use registry::{EnvValue, MountEnv, MountRegistry, ENV_KEY_ARCHIVE};

// =============================================================================
// Re-exports
// =============================================================================

/// URL type used for `scheme://identifier/path` mount addresses.
pub use url::Url;
