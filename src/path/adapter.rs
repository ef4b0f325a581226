//! Hierarchical path bound to a mounted archive.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::identity::ArchivePath;
use crate::config::FileNamePolicy;
use crate::fs::ArchiveFileSystem;

/// A path inside a mounted archive.
///
/// Wraps an [`ArchivePath`] together with the [`ArchiveFileSystem`] it was
/// created from. Paths are plain values: two paths for the same location on
/// the same file system are equal even if created separately, and a path
/// stays valid after its file system is closed (operations that touch the
/// archive will fail instead).
///
/// Archives have no relative paths, symbolic links or `.`/`..` segments, so
/// this type only offers the operations that make sense there.
#[derive(Clone)]
pub struct FsPath {
    delegate: ArchivePath,
    file_system: Arc<ArchiveFileSystem>,
}

impl FsPath {
    pub(crate) fn new(delegate: ArchivePath, file_system: Arc<ArchiveFileSystem>) -> Self {
        Self {
            delegate,
            file_system,
        }
    }

    /// The owning file system.
    #[inline]
    pub fn file_system(&self) -> &Arc<ArchiveFileSystem> {
        &self.file_system
    }

    /// Always `true`: every archive path is absolute.
    #[inline]
    pub fn is_absolute(&self) -> bool {
        true
    }

    /// The root path of the owning file system.
    pub fn root(&self) -> FsPath {
        self.with_delegate(ArchivePath::root())
    }

    /// The file name of this path, or `None` for the root.
    ///
    /// Depends on the registry's [`FileNamePolicy`]: by default the file name
    /// is the full path itself; with [`FileNamePolicy::LastSegment`] it is the
    /// final segment as a rooted path.
    pub fn file_name(&self) -> Option<FsPath> {
        let last = self.delegate.last_segment()?;
        match self.file_system.file_name_policy() {
            FileNamePolicy::FullPath => Some(self.clone()),
            FileNamePolicy::LastSegment => Some(self.with_delegate(ArchivePath::new(last))),
        }
    }

    /// The parent path, or `None` for the root.
    pub fn parent(&self) -> Option<FsPath> {
        self.delegate
            .parent()
            .map(|parent| self.with_delegate(parent))
    }

    /// Number of name segments; the root has 0.
    #[inline]
    pub fn name_count(&self) -> usize {
        self.delegate.segment_count()
    }

    /// The underlying archive path.
    #[inline]
    pub fn archive_path(&self) -> &ArchivePath {
        &self.delegate
    }

    /// The canonical string form (same as `to_string()`).
    #[inline]
    pub fn as_str(&self) -> &str {
        self.delegate.as_str()
    }

    fn with_delegate(&self, delegate: ArchivePath) -> FsPath {
        FsPath::new(delegate, Arc::clone(&self.file_system))
    }
}

impl PartialEq for FsPath {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.file_system, &other.file_system) && self.delegate == other.delegate
    }
}

impl Eq for FsPath {}

impl Hash for FsPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.file_system).hash(state);
        self.delegate.hash(state);
    }
}

impl fmt::Display for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.delegate, f)
    }
}

impl fmt::Debug for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsPath")
            .field("path", &self.delegate.as_str())
            .field("file_system", &self.file_system.id())
            .finish()
    }
}
