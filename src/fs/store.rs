//! File store backed by a mounted archive.

use std::fmt;
use std::sync::Arc;

use super::BASIC_ATTRIBUTE_VIEW;
use crate::archive::Archive;

/// Store type reported by every [`ArchiveStore`].
pub const STORE_TYPE: &str = "archive";

/// The single file store of an [`ArchiveFileSystem`](super::ArchiveFileSystem).
#[derive(Clone)]
pub struct ArchiveStore {
    archive: Arc<dyn Archive>,
}

impl ArchiveStore {
    pub(crate) fn new(archive: Arc<dyn Archive>) -> Self {
        Self { archive }
    }

    /// Store name: the archive identifier.
    pub fn name(&self) -> &str {
        self.archive.id()
    }

    /// Store type, always [`STORE_TYPE`].
    pub fn store_type(&self) -> &'static str {
        STORE_TYPE
    }

    /// Archives are writable.
    pub fn is_read_only(&self) -> bool {
        false
    }

    /// Only the `"basic"` attribute view is supported.
    pub fn supports_file_attribute_view(&self, name: &str) -> bool {
        name == BASIC_ATTRIBUTE_VIEW
    }

    /// The backing archive.
    pub fn archive(&self) -> &Arc<dyn Archive> {
        &self.archive
    }
}

impl fmt::Debug for ArchiveStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveStore")
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemoryArchive;

    #[test]
    fn test_store_reflects_archive() {
        let store = ArchiveStore::new(Arc::new(MemoryArchive::new("test.jar")));
        assert_eq!(store.name(), "test.jar");
        assert_eq!(store.store_type(), "archive");
        assert!(!store.is_read_only());
        assert!(store.supports_file_attribute_view("basic"));
        assert!(!store.supports_file_attribute_view("posix"));
    }
}
