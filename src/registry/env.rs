//! Environment passed along with a mount request.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::archive::Archive;
use crate::error::{FsError, FsResult};

/// Environment key under which a pre-existing archive is supplied.
pub const ENV_KEY_ARCHIVE: &str = "archive";

/// A value in a [`MountEnv`].
#[derive(Clone)]
pub enum EnvValue {
    /// An archive instance.
    Archive(Arc<dyn Archive>),
    /// Any other (plain data) value.
    Json(serde_json::Value),
}

impl fmt::Debug for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Archive(archive) => f.debug_tuple("Archive").field(&archive.id()).finish(),
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
        }
    }
}

impl From<serde_json::Value> for EnvValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<Arc<dyn Archive>> for EnvValue {
    fn from(archive: Arc<dyn Archive>) -> Self {
        Self::Archive(archive)
    }
}

/// Key/value environment for [`MountRegistry::new_file_system`](super::MountRegistry::new_file_system).
///
/// Only [`ENV_KEY_ARCHIVE`] is interpreted; other keys are carried along
/// untouched.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use archive_fs::{MemoryArchive, MountEnv};
///
/// let env = MountEnv::new().with_archive(Arc::new(MemoryArchive::new("test.jar")));
/// assert!(env.get("archive").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MountEnv {
    entries: FxHashMap<String, EnvValue>,
}

impl MountEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply an archive under [`ENV_KEY_ARCHIVE`].
    pub fn with_archive(mut self, archive: Arc<dyn Archive>) -> Self {
        self.insert(ENV_KEY_ARCHIVE, EnvValue::Archive(archive));
        self
    }

    /// Insert a value under `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<EnvValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get the value under `key`.
    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.entries.get(key)
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The archive supplied under [`ENV_KEY_ARCHIVE`], if any.
    ///
    /// A non-archive value under that key is an [`FsError::InvalidArgument`].
    pub(crate) fn archive(&self) -> FsResult<Option<Arc<dyn Archive>>> {
        match self.entries.get(ENV_KEY_ARCHIVE) {
            None => Ok(None),
            Some(EnvValue::Archive(archive)) => Ok(Some(Arc::clone(archive))),
            Some(EnvValue::Json(value)) => Err(FsError::invalid(format!(
                "unexpected argument passed into environment under key {ENV_KEY_ARCHIVE}: {value}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::archive::MemoryArchive;

    #[test]
    fn test_archive_absent() {
        let env = MountEnv::new();
        assert!(env.is_empty());
        assert!(env.archive().unwrap().is_none());
    }

    #[test]
    fn test_archive_present() {
        let env = MountEnv::new().with_archive(Arc::new(MemoryArchive::new("test.jar")));
        assert_eq!(env.archive().unwrap().unwrap().id(), "test.jar");
    }

    #[test]
    fn test_archive_wrong_type() {
        let mut env = MountEnv::new();
        env.insert(ENV_KEY_ARCHIVE, json!("test.jar"));
        assert!(matches!(env.archive(), Err(FsError::InvalidArgument(_))));
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut env = MountEnv::new();
        env.insert("compression", json!({ "level": 9 }));
        assert_eq!(env.len(), 1);
        assert!(env.archive().unwrap().is_none());
    }
}
