//! Archive collaborator trait and an in-memory implementation.
//!
//! The file system layer only needs a narrow view of an archive: its
//! identifier, whether an entry exists, and removal. Byte content I/O stays
//! with the archive itself.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::path::ArchivePath;

// =============================================================================
// Archive Trait
// =============================================================================

/// Backing named-entry store that a file system is mounted over.
///
/// Paths passed to these methods are archive path strings; implementations
/// should normalize them with [`ArchivePath::new`] so that `"a"` and `"/a"`
/// name the same entry.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: one archive is shared by its file
/// system and by every path created from it, possibly across threads.
pub trait Archive: Send + Sync + fmt::Debug + fmt::Display {
    /// Identifier of the archive; doubles as its mount identifier.
    fn id(&self) -> &str;

    /// Check if an entry exists at `path`.
    fn contains(&self, path: &str) -> bool;

    /// Remove the entry at `path`.
    ///
    /// Returns `true` if an entry was removed.
    fn delete(&self, path: &str) -> bool;
}

/// Factory used to create an empty archive for a mount identifier.
pub type ArchiveFactory = Arc<dyn Fn(&str) -> Arc<dyn Archive> + Send + Sync>;

/// Default [`ArchiveFactory`]: a fresh [`MemoryArchive`].
pub fn memory_archive_factory() -> ArchiveFactory {
    Arc::new(|id: &str| Arc::new(MemoryArchive::new(id)) as Arc<dyn Archive>)
}

// =============================================================================
// MemoryArchive
// =============================================================================

/// A simple map-based archive.
///
/// # Example
///
/// ```
/// use archive_fs::{Archive, MemoryArchive};
///
/// let archive = MemoryArchive::new("site.jar");
/// archive.add("/index.html", "<h1>hi</h1>");
/// assert!(archive.contains("index.html"));
/// ```
#[derive(Default)]
pub struct MemoryArchive {
    id: String,
    entries: RwLock<FxHashMap<ArchivePath, Vec<u8>>>,
}

impl MemoryArchive {
    /// Create a new empty archive.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// Add an entry with string content, replacing any previous content.
    pub fn add(&self, path: &str, content: impl AsRef<str>) {
        self.add_bytes(path, content.as_ref().as_bytes().to_vec());
    }

    /// Add an entry with binary content, replacing any previous content.
    pub fn add_bytes(&self, path: &str, content: impl Into<Vec<u8>>) {
        self.entries
            .write()
            .insert(ArchivePath::new(path), content.into());
    }

    /// Get a copy of an entry's content.
    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.entries.read().get(&ArchivePath::new(path)).cloned()
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// All entry paths, sorted.
    pub fn paths(&self) -> Vec<ArchivePath> {
        let mut paths: Vec<_> = self.entries.read().keys().cloned().collect();
        paths.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        paths
    }
}

impl Archive for MemoryArchive {
    fn id(&self) -> &str {
        &self.id
    }

    fn contains(&self, path: &str) -> bool {
        self.entries.read().contains_key(&ArchivePath::new(path))
    }

    fn delete(&self, path: &str) -> bool {
        self.entries.write().remove(&ArchivePath::new(path)).is_some()
    }
}

impl fmt::Debug for MemoryArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryArchive")
            .field("id", &self.id)
            .field("entries", &self.len())
            .finish()
    }
}

impl fmt::Display for MemoryArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} entries", self.id, self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_contains_normalize_paths() {
        let archive = MemoryArchive::new("test.jar");
        archive.add("fileToDelete", "Hello");
        assert!(archive.contains("fileToDelete"));
        assert!(archive.contains("/fileToDelete"));
        assert!(archive.contains("/fileToDelete/"));
        assert_eq!(archive.get("/fileToDelete").unwrap(), b"Hello");
    }

    #[test]
    fn test_delete() {
        let archive = MemoryArchive::new("test.jar");
        archive.add_bytes("/a/b", vec![1, 2, 3]);
        assert!(archive.delete("a/b"));
        assert!(!archive.contains("/a/b"));
        assert!(!archive.delete("a/b"));
        assert!(archive.is_empty());
    }

    #[test]
    fn test_paths_sorted() {
        let archive = MemoryArchive::new("test.jar");
        archive.add("/b", "");
        archive.add("/a/c", "");
        archive.add("a", "");
        let paths: Vec<_> = archive.paths().into_iter().map(ArchivePath::into_string).collect();
        assert_eq!(paths, vec!["/a", "/a/c", "/b"]);
    }

    #[test]
    fn test_factory_uses_identifier() {
        let archive = memory_archive_factory()("fresh.jar");
        assert_eq!(archive.id(), "fresh.jar");
        assert!(!archive.contains("/"));
        assert_eq!(archive.to_string(), "fresh.jar: 0 entries");
    }
}
