//! Entry operations that cross into the archive.

use std::sync::Arc;

use super::MountRegistry;
use crate::error::{FsError, FsResult};
use crate::fs::{ArchiveFileSystem, ArchiveStore};
use crate::path::FsPath;

impl MountRegistry {
    /// Delete the entry at `path` from its archive.
    ///
    /// No emptiness check is made: whatever the archive does for the path
    /// (including removing a whole subtree) is what happens.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidArgument`] if `path` belongs to another registry
    /// - [`FsError::Closed`] if its file system is closed
    /// - [`FsError::NoSuchEntry`] if the archive has no such entry
    pub fn delete(&self, path: &FsPath) -> FsResult<()> {
        let fs = self.owned_file_system(path)?;
        fs.ensure_open()?;

        let archive = fs.archive();
        let path_string = path.as_str();
        // TODO: fail with a "directory not empty" error once Archive can list children
        if !archive.contains(path_string) || !archive.delete(path_string) {
            return Err(FsError::NoSuchEntry {
                path: path_string.to_string(),
                archive: archive.to_string(),
            });
        }
        tracing::trace!("Deleted {} from {}", path, archive);
        Ok(())
    }

    /// The file store holding `path`.
    pub fn file_store(&self, path: &FsPath) -> FsResult<ArchiveStore> {
        let fs = self.owned_file_system(path)?;
        fs.ensure_open()?;
        Ok(ArchiveStore::new(Arc::clone(fs.archive())))
    }

    /// Check if two paths locate the same entry on the same file system.
    pub fn is_same_file(&self, path: &FsPath, other: &FsPath) -> FsResult<bool> {
        self.owned_file_system(path)?.ensure_open()?;
        self.owned_file_system(other)?;
        Ok(path == other)
    }

    /// Always fails: directories are implicit in archive paths.
    pub fn create_directory(&self, _dir: &FsPath) -> FsResult<()> {
        Err(FsError::unsupported("create directory"))
    }

    /// Always fails: copying entries is not supported.
    pub fn copy(&self, _source: &FsPath, _target: &FsPath) -> FsResult<()> {
        Err(FsError::unsupported("copy"))
    }

    /// Always fails: moving entries is not supported.
    pub fn move_entry(&self, _source: &FsPath, _target: &FsPath) -> FsResult<()> {
        Err(FsError::unsupported("move"))
    }

    /// Always fails: archives have no writable file attributes.
    pub fn set_attribute(
        &self,
        _path: &FsPath,
        _attribute: &str,
        _value: serde_json::Value,
    ) -> FsResult<()> {
        Err(FsError::unsupported("set attribute"))
    }

    fn owned_file_system<'a>(&self, path: &'a FsPath) -> FsResult<&'a Arc<ArchiveFileSystem>> {
        let fs = path.file_system();
        if !fs.is_provided_by(&self.shared) {
            return Err(FsError::invalid(format!(
                "{path} is not associated with a file system of this registry"
            )));
        }
        Ok(fs)
    }
}
