//! Error type shared by every file system operation.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type FsResult<T> = Result<T, FsError>;

/// Error type for archive file system failures.
///
/// Every variant carries enough detail (identifier, path or operation name)
/// for the caller to act on. Nothing in this crate retries; errors always
/// propagate straight to the immediate caller.
///
/// # Example
///
/// ```
/// use archive_fs::{ErrorKind, FsError, MountRegistry};
///
/// let registry = MountRegistry::new();
/// let _fs = registry.mount("app.jar", None)?;
///
/// match registry.mount("app.jar", None) {
///     Err(FsError::AlreadyExists(id)) => assert_eq!(id, "app.jar"),
///     other => panic!("expected AlreadyExists, got {other:?}"),
/// }
///
/// let err = registry.lookup("missing.jar").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.to_string(), "file system not found: missing.jar");
/// # Ok::<(), FsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    /// Malformed or contradictory caller input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An open file system is already mounted under this identifier.
    #[error("file system for {0} already exists")]
    AlreadyExists(String),

    /// No (open) file system is registered for this identifier.
    #[error("file system not found: {0}")]
    FileSystemNotFound(String),

    /// The archive has no entry at the given path.
    #[error("{path} does not exist in {archive}")]
    NoSuchEntry {
        /// Canonical path that was requested.
        path: String,
        /// Display form of the archive that was searched.
        archive: String,
    },

    /// The file system was closed.
    #[error("file system {0} is closed")]
    Closed(String),

    /// The operation has no meaning for archives.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

/// Coarse classification of an [`FsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`FsError::InvalidArgument`].
    InvalidArgument,
    /// See [`FsError::AlreadyExists`].
    AlreadyExists,
    /// See [`FsError::FileSystemNotFound`] and [`FsError::NoSuchEntry`].
    NotFound,
    /// See [`FsError::Closed`].
    Closed,
    /// See [`FsError::Unsupported`].
    Unsupported,
}

impl FsError {
    /// Create an invalid argument error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an unsupported operation error.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported(operation.into())
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::FileSystemNotFound(_) | Self::NoSuchEntry { .. } => ErrorKind::NotFound,
            Self::Closed(_) => ErrorKind::Closed,
            Self::Unsupported(_) => ErrorKind::Unsupported,
        }
    }

    /// Check if this is a not-found condition (missing mount or missing entry).
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
