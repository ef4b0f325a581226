//! Configuration for a mount registry.
//!
//! Every [`MountRegistry`] owns its configuration; there is no global state.
//! Use [`ConfigBuilder`] to customize the URI scheme, file name policy or the
//! archive factory, then call [`ConfigBuilder::build`].

use std::fmt;
use std::sync::Arc;

use crate::archive::{memory_archive_factory, Archive, ArchiveFactory};
use crate::registry::MountRegistry;

/// Default URI scheme for mount requests.
pub const DEFAULT_SCHEME: &str = "archive";

/// How [`FsPath::file_name`](crate::FsPath::file_name) answers for non-root paths.
///
/// Archive paths are always absolute, so neither choice yields a relative path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileNamePolicy {
    /// The file name is the full path itself (`/dir/file` → `/dir/file`).
    #[default]
    FullPath,
    /// The file name is the last segment, rooted (`/dir/file` → `/file`).
    LastSegment,
}

/// Runtime configuration for a registry.
#[derive(Clone)]
pub struct Config {
    /// URI scheme accepted by [`MountRegistry::new_file_system`].
    pub scheme: String,
    /// File name semantics for paths created by this registry's file systems.
    pub file_name_policy: FileNamePolicy,
    /// Creates the archive when a mount request supplies none.
    pub archive_factory: ArchiveFactory,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            file_name_policy: FileNamePolicy::default(),
            archive_factory: memory_archive_factory(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("scheme", &self.scheme)
            .field("file_name_policy", &self.file_name_policy)
            .field("archive_factory", &"<fn>")
            .finish()
    }
}

/// Configuration builder for fluent API.
#[derive(Default)]
pub struct ConfigBuilder {
    scheme: Option<String>,
    file_name_policy: Option<FileNamePolicy>,
    archive_factory: Option<ArchiveFactory>,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the URI scheme.
    ///
    /// Default: `"archive"`
    ///
    /// # Example
    ///
    /// ```
    /// use archive_fs::ConfigBuilder;
    ///
    /// let registry = ConfigBuilder::new().scheme("shrinkwrap").build();
    /// assert_eq!(registry.scheme(), "shrinkwrap");
    /// ```
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Set the file name policy.
    ///
    /// Default: [`FileNamePolicy::FullPath`]
    pub fn file_name_policy(mut self, policy: FileNamePolicy) -> Self {
        self.file_name_policy = Some(policy);
        self
    }

    /// Set the factory used to create archives for mounts that supply none.
    ///
    /// Default: an empty [`MemoryArchive`](crate::MemoryArchive) named after the identifier.
    pub fn archive_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&str) -> Arc<dyn Archive> + Send + Sync + 'static,
    {
        self.archive_factory = Some(Arc::new(factory));
        self
    }

    /// Build the configuration without creating a registry.
    pub fn config(self) -> Config {
        let defaults = Config::default();
        Config {
            scheme: self.scheme.unwrap_or(defaults.scheme),
            file_name_policy: self.file_name_policy.unwrap_or(defaults.file_name_policy),
            archive_factory: self.archive_factory.unwrap_or(defaults.archive_factory),
        }
    }

    /// Build a new, empty registry with this configuration.
    pub fn build(self) -> MountRegistry {
        MountRegistry::with_config(self.config())
    }
}
