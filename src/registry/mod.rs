//! Mount registry: archive identifier → file system.
//!
//! ```text
//! per identifier:
//!
//!   absent ──mount──► open ──close──► closed ──mount──► open (replaced) ──► …
//!                      │
//!                      └──mount──► AlreadyExists
//! ```
//!
//! One mutex guards the whole map. `mount`, `lookup` and path resolution all
//! take it, so a lookup racing a mount sees either the state before or after
//! it, never a half-built instance. The lock is never held while calling into
//! an archive.

mod env;
mod ops;

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use percent_encoding::percent_decode_str;
use rustc_hash::FxHashMap;
use url::Url;

use crate::archive::Archive;
use crate::config::Config;
use crate::error::{FsError, FsResult};
use crate::fs::ArchiveFileSystem;
use crate::path::{ArchivePath, FsPath};

pub use env::{EnvValue, MountEnv, ENV_KEY_ARCHIVE};

/// State shared by every handle to one registry.
pub(crate) struct RegistryShared {
    config: Config,
    mounted: Mutex<FxHashMap<String, Arc<ArchiveFileSystem>>>,
}

/// Creates, looks up and retires archive file systems.
///
/// At most one *open* file system exists per identifier. Closed ones stay in
/// the registry until a new mount for the same identifier replaces them.
///
/// Cloning is cheap and yields a handle to the same registry.
///
/// # Example
///
/// ```
/// use archive_fs::{FsError, MountRegistry};
///
/// let registry = MountRegistry::new();
/// let fs = registry.mount("app.jar", None).unwrap();
/// assert!(matches!(registry.mount("app.jar", None), Err(FsError::AlreadyExists(_))));
///
/// fs.close();
/// let again = registry.mount("app.jar", None).unwrap();
/// assert!(again.is_open());
/// ```
#[derive(Clone)]
pub struct MountRegistry {
    shared: Arc<RegistryShared>,
}

impl MountRegistry {
    /// Create an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty registry with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            shared: Arc::new(RegistryShared {
                config,
                mounted: Mutex::new(FxHashMap::default()),
            }),
        }
    }

    pub(crate) fn from_shared(shared: Arc<RegistryShared>) -> Self {
        Self { shared }
    }

    /// URI scheme handled by this registry.
    pub fn scheme(&self) -> &str {
        &self.shared.config.scheme
    }

    /// This registry's configuration.
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    // =========================================================================
    // Mount
    // =========================================================================

    /// Mount an archive under `id`.
    ///
    /// If `archive` is `None`, an empty one is created with the configured
    /// factory. A supplied archive must have the identifier `id`.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidArgument`] if the archive's identifier differs from `id`
    /// - [`FsError::AlreadyExists`] if an open file system is mounted under `id`
    pub fn mount(
        &self,
        id: &str,
        archive: Option<Arc<dyn Archive>>,
    ) -> FsResult<Arc<ArchiveFileSystem>> {
        let archive = match archive {
            Some(archive) => {
                if archive.id() != id {
                    return Err(FsError::invalid(format!(
                        "archive {archive} does not have an identifier matching {id}"
                    )));
                }
                tracing::trace!("Found archive supplied for mount: {}", archive);
                archive
            }
            None => {
                let archive = (self.shared.config.archive_factory)(id);
                tracing::trace!("Created new archive {} for mount {}", archive, id);
                archive
            }
        };

        let (fs, replaced) = {
            let mut mounted = self.shared.mounted.lock();
            let replaced = match mounted.get(id) {
                Some(existing) if existing.is_open() => {
                    return Err(FsError::AlreadyExists(id.to_string()));
                }
                Some(_) => true,
                None => false,
            };
            let fs = Arc::new(ArchiveFileSystem::new(
                id,
                archive,
                self.shared.config.file_name_policy,
                Arc::downgrade(&self.shared),
            ));
            mounted.insert(id.to_string(), Arc::clone(&fs));
            (fs, replaced)
        };

        if replaced {
            tracing::debug!("Replaced closed file system for {}", id);
        }
        tracing::debug!("Created new file system: {}", fs);
        Ok(fs)
    }

    /// Mount from a `scheme://identifier` URI.
    ///
    /// The identifier is the URI host. An archive may be supplied in `env`
    /// under [`ENV_KEY_ARCHIVE`].
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidArgument`] for a foreign scheme, a missing host,
    ///   a non-archive value under [`ENV_KEY_ARCHIVE`], or a mismatched archive
    /// - [`FsError::AlreadyExists`] as for [`mount`](Self::mount)
    pub fn new_file_system(&self, uri: &Url, env: &MountEnv) -> FsResult<Arc<ArchiveFileSystem>> {
        if !uri.scheme().eq_ignore_ascii_case(self.scheme()) {
            return Err(FsError::invalid(format!(
                "{uri} does not use the {} scheme",
                self.scheme()
            )));
        }
        let id = host(uri).ok_or_else(|| FsError::invalid(format!("{uri} has no archive identifier")))?;
        let archive = env.archive()?;
        self.mount(id, archive)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Get the file system registered under `id`.
    ///
    /// A closed file system is returned as-is; check
    /// [`is_open`](ArchiveFileSystem::is_open) if liveness matters.
    pub fn lookup(&self, id: &str) -> FsResult<Arc<ArchiveFileSystem>> {
        self.shared
            .mounted
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| FsError::FileSystemNotFound(id.to_string()))
    }

    /// Get the file system addressed by a URI host; see [`lookup`](Self::lookup).
    pub fn file_system(&self, uri: &Url) -> FsResult<Arc<ArchiveFileSystem>> {
        let id = host(uri).ok_or_else(|| FsError::FileSystemNotFound(uri.to_string()))?;
        self.lookup(id)
    }

    /// Resolve a path inside the open file system mounted under `id`.
    ///
    /// Stricter than [`lookup`](Self::lookup): a closed file system counts as
    /// not found.
    pub fn resolve_path(&self, id: &str, path: &str) -> FsResult<FsPath> {
        let fs = self.lookup(id)?;
        if !fs.is_open() {
            return Err(FsError::FileSystemNotFound(format!("{id} (closed)")));
        }
        Ok(FsPath::new(ArchivePath::new(path), fs))
    }

    /// Resolve `scheme://identifier/path`; see [`resolve_path`](Self::resolve_path).
    ///
    /// The URI path is percent-decoded, so `a%20b` locates the entry `a b`.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidArgument`] if the decoded path is not valid UTF-8
    /// - [`FsError::FileSystemNotFound`] as for [`resolve_path`](Self::resolve_path)
    pub fn path(&self, uri: &Url) -> FsResult<FsPath> {
        let id = host(uri).ok_or_else(|| FsError::FileSystemNotFound(uri.to_string()))?;
        let path = percent_decode_str(uri.path())
            .decode_utf8()
            .map_err(|e| FsError::invalid(format!("{uri} has a malformed path: {e}")))?;
        self.resolve_path(id, &path)
    }

    /// Number of registered file systems, open or closed.
    pub fn len(&self) -> usize {
        self.shared.mounted.lock().len()
    }

    /// Check if nothing was ever mounted.
    pub fn is_empty(&self) -> bool {
        self.shared.mounted.lock().is_empty()
    }
}

fn host(uri: &Url) -> Option<&str> {
    uri.host_str().filter(|host| !host.is_empty())
}

impl Default for MountRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for MountRegistry {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Eq for MountRegistry {}

impl fmt::Debug for MountRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountRegistry")
            .field("scheme", &self.scheme())
            .field("mounted", &self.len())
            .finish()
    }
}
