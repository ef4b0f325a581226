//! One mounted archive.

use std::convert::Infallible;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use rustc_hash::FxHashSet;

use super::store::ArchiveStore;
use super::BASIC_ATTRIBUTE_VIEW;
use crate::archive::Archive;
use crate::config::FileNamePolicy;
use crate::error::{FsError, FsResult};
use crate::path::{ArchivePath, FsPath, SEPARATOR_STR};
use crate::registry::{MountRegistry, RegistryShared};

/// File system view of a mounted [`Archive`].
///
/// Created by [`MountRegistry::mount`] and always handled through an `Arc`.
/// The instance starts open; [`close`](Self::close) flips it to closed
/// exactly once. After that every accessor fails with [`FsError::Closed`].
///
/// The open flag is atomic and not guarded by the registry lock, so any
/// thread may close an instance at any time.
pub struct ArchiveFileSystem {
    id: String,
    archive: Arc<dyn Archive>,
    open: AtomicBool,
    file_name_policy: FileNamePolicy,
    provider: Weak<RegistryShared>,
}

impl ArchiveFileSystem {
    pub(crate) fn new(
        id: &str,
        archive: Arc<dyn Archive>,
        file_name_policy: FileNamePolicy,
        provider: Weak<RegistryShared>,
    ) -> Self {
        Self {
            id: id.to_string(),
            archive,
            open: AtomicBool::new(true),
            file_name_policy,
            provider,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Mount identifier (the archive identifier).
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The registry that created this file system, if it is still alive.
    pub fn provider(&self) -> Option<MountRegistry> {
        self.provider.upgrade().map(MountRegistry::from_shared)
    }

    /// Close this file system. Closing twice is a no-op.
    ///
    /// Paths created earlier stay valid as values.
    pub fn close(&self) {
        if self
            .open
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            tracing::debug!("Closed file system: {}", self);
        }
    }

    /// Check if this file system is open.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Archives are writable.
    pub fn is_read_only(&self) -> bool {
        false
    }

    /// Path separator (`/`).
    pub fn separator(&self) -> &'static str {
        SEPARATOR_STR
    }

    // =========================================================================
    // Accessors (fail once closed)
    // =========================================================================

    /// The root directories: exactly one, the root path.
    pub fn root_directories(self: &Arc<Self>) -> FsResult<Vec<FsPath>> {
        self.ensure_open()?;
        Ok(vec![FsPath::new(ArchivePath::root(), Arc::clone(self))])
    }

    /// The file stores: exactly one, backed by the archive.
    pub fn file_stores(&self) -> FsResult<Vec<ArchiveStore>> {
        self.ensure_open()?;
        Ok(vec![ArchiveStore::new(Arc::clone(&self.archive))])
    }

    /// Names of supported file attribute views: only `"basic"`.
    pub fn supported_file_attribute_views(&self) -> FsResult<FxHashSet<&'static str>> {
        self.ensure_open()?;
        Ok(FxHashSet::from_iter([BASIC_ATTRIBUTE_VIEW]))
    }

    /// Build a path from one or more components.
    ///
    /// The first component is required; an empty slice is an
    /// [`FsError::InvalidArgument`]. An empty string is valid and names the
    /// root.
    ///
    /// # Example
    ///
    /// ```
    /// use archive_fs::MountRegistry;
    ///
    /// let fs = MountRegistry::new().mount("test.jar", None).unwrap();
    /// let path = fs.get_path(&["toplevel/parent", "child"]).unwrap();
    /// assert_eq!(path.to_string(), "/toplevel/parent/child");
    /// ```
    pub fn get_path<S: AsRef<str>>(self: &Arc<Self>, components: &[S]) -> FsResult<FsPath> {
        self.ensure_open()?;
        let (first, more) = components.split_first().ok_or_else(|| {
            FsError::invalid("at least one path component must be specified")
        })?;
        let path = ArchivePath::from_components(first.as_ref(), more);
        Ok(FsPath::new(path, Arc::clone(self)))
    }

    /// Compile a `glob:` or `regex:` path matcher.
    #[cfg(feature = "matcher")]
    pub fn path_matcher(&self, syntax_and_pattern: &str) -> FsResult<crate::path::PathMatcher> {
        self.ensure_open()?;
        crate::path::PathMatcher::new(syntax_and_pattern)
    }

    /// Always fails: archives have no notion of file ownership.
    pub fn user_principal_lookup_service(&self) -> FsResult<Infallible> {
        Err(FsError::unsupported("user principal lookup (archives have no file ownership)"))
    }

    /// Always fails: archives have no change notification.
    pub fn new_watch_service(&self) -> FsResult<Infallible> {
        Err(FsError::unsupported("watch service"))
    }

    // =========================================================================
    // Archive Access
    // =========================================================================

    /// The backing archive.
    pub fn archive(&self) -> &Arc<dyn Archive> {
        &self.archive
    }

    pub(crate) fn file_name_policy(&self) -> FileNamePolicy {
        self.file_name_policy
    }

    pub(crate) fn ensure_open(&self) -> FsResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(FsError::Closed(self.id.clone()))
        }
    }

    pub(crate) fn is_provided_by(&self, shared: &Arc<RegistryShared>) -> bool {
        std::ptr::eq(self.provider.as_ptr(), Arc::as_ptr(shared))
    }
}

impl fmt::Display for ArchiveFileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArchiveFileSystem with mounted archive: {}", self.archive)
    }
}

impl fmt::Debug for ArchiveFileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveFileSystem")
            .field("id", &self.id)
            .field("open", &self.is_open())
            .field("archive", &self.archive)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemoryArchive;
    use crate::error::ErrorKind;

    fn mount(registry: &MountRegistry) -> Arc<ArchiveFileSystem> {
        let archive: Arc<dyn Archive> = Arc::new(MemoryArchive::new("test.jar"));
        registry.mount("test.jar", Some(archive)).unwrap()
    }

    #[test]
    fn test_root_directories() {
        let fs = mount(&MountRegistry::new());
        let roots = fs.root_directories().unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].to_string(), "/");
        assert_eq!(roots, fs.root_directories().unwrap());
    }

    #[test]
    fn test_separator() {
        let fs = mount(&MountRegistry::new());
        assert_eq!(fs.separator(), "/");
    }

    #[test]
    fn test_provider() {
        let registry = MountRegistry::new();
        let fs = mount(&registry);
        assert_eq!(fs.provider(), Some(registry.clone()));

        drop(registry);
        assert!(fs.provider().is_none());
    }

    #[test]
    fn test_is_read_only() {
        assert!(!mount(&MountRegistry::new()).is_read_only());
    }

    #[test]
    fn test_is_open_after_close() {
        let fs = mount(&MountRegistry::new());
        assert!(fs.is_open());
        fs.close();
        assert!(!fs.is_open());
        fs.close();
        assert!(!fs.is_open());
    }

    #[test]
    fn test_file_stores() {
        let fs = mount(&MountRegistry::new());
        let stores = fs.file_stores().unwrap();
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].name(), "test.jar");
    }

    #[test]
    fn test_supported_file_attribute_views() {
        let fs = mount(&MountRegistry::new());
        let views = fs.supported_file_attribute_views().unwrap();
        assert_eq!(views.len(), 1);
        assert!(views.contains("basic"));
    }

    #[test]
    fn test_get_path() {
        let fs = mount(&MountRegistry::new());
        assert_eq!(fs.get_path(&["/"]).unwrap().to_string(), "/");
        assert_eq!(fs.get_path(&[""]).unwrap().to_string(), "/");
        assert_eq!(
            fs.get_path(&["toplevel", "parent", "child"]).unwrap().to_string(),
            "/toplevel/parent/child"
        );
        assert_eq!(
            fs.get_path(&["toplevel/parent", "child"]).unwrap().to_string(),
            "/toplevel/parent/child"
        );
        let owned = vec![String::from("a"), String::from("b")];
        assert_eq!(fs.get_path(&owned).unwrap().to_string(), "/a/b");
    }

    #[test]
    fn test_get_path_without_components() {
        let fs = mount(&MountRegistry::new());
        let err = fs.get_path::<&str>(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_unsupported_services() {
        let fs = mount(&MountRegistry::new());
        assert!(matches!(
            fs.user_principal_lookup_service(),
            Err(FsError::Unsupported(_))
        ));
        assert!(matches!(fs.new_watch_service(), Err(FsError::Unsupported(_))));
    }

    #[test]
    fn test_closed_guard() {
        let fs = mount(&MountRegistry::new());
        fs.close();
        let closed = |err: FsError| err == FsError::Closed("test.jar".into());
        assert!(closed(fs.root_directories().unwrap_err()));
        assert!(closed(fs.file_stores().unwrap_err()));
        assert!(closed(fs.supported_file_attribute_views().unwrap_err()));
        assert!(closed(fs.get_path(&["a"]).unwrap_err()));
        #[cfg(feature = "matcher")]
        assert!(closed(fs.path_matcher("glob:/*").unwrap_err()));
    }

    #[cfg(feature = "matcher")]
    #[test]
    fn test_path_matcher() {
        let fs = mount(&MountRegistry::new());
        let matcher = fs.path_matcher("glob:/dir/*.txt").unwrap();
        assert!(matcher.matches(&fs.get_path(&["dir", "a.txt"]).unwrap()));
        assert!(!matcher.matches(&fs.get_path(&["dir/sub/a.txt"]).unwrap()));
    }

    #[test]
    fn test_display() {
        let fs = mount(&MountRegistry::new());
        assert_eq!(
            fs.to_string(),
            "ArchiveFileSystem with mounted archive: test.jar: 0 entries"
        );
    }
}
