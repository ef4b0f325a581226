//! Canonical archive paths.
//!
//! An [`ArchivePath`] is the identity of a location inside an archive:
//!
//! ```text
//! input            canonical
//! ""           ──► "/"
//! "a/"         ──► "/a"
//! "//a/b//"    ──► "/a/b"
//! "a//b"       ──► "/a/b"
//! "/a" + "b"   ──► "/a/b"
//! ```
//!
//! There is exactly one canonical string per logical location, and `.`/`..`
//! have no special meaning.

use std::fmt;

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// [`SEPARATOR`] as a string slice.
pub const SEPARATOR_STR: &str = "/";

/// Immutable, normalized, absolute location inside an archive.
///
/// Two paths are equal iff their canonical strings are equal (no case folding).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchivePath {
    raw: String,
}

impl ArchivePath {
    /// The root location (`/`).
    pub fn root() -> Self {
        Self {
            raw: SEPARATOR_STR.to_string(),
        }
    }

    /// Create a canonical path from raw input. Never fails.
    ///
    /// A leading separator is inserted if absent, runs of separators collapse
    /// to one, and trailing separators are dropped unless the result is the root.
    pub fn new(raw: &str) -> Self {
        Self {
            raw: normalize(raw),
        }
    }

    /// Append `child` to this path with a single separator.
    pub fn join(&self, child: &str) -> Self {
        let base = self.raw.trim_end_matches(SEPARATOR);
        let child = child.trim_start_matches(SEPARATOR);
        Self::new(&format!("{base}{SEPARATOR}{child}"))
    }

    /// Create a path from a first component followed by zero or more children.
    pub fn from_components<S: AsRef<str>>(first: &str, more: &[S]) -> Self {
        more.iter()
            .fold(Self::new(first), |path, next| path.join(next.as_ref()))
    }

    /// Get the canonical string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check if this is the root location.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.raw == SEPARATOR_STR
    }

    /// Number of segments below the root; the root has 0.
    pub fn segment_count(&self) -> usize {
        let body = &self.raw[SEPARATOR.len_utf8()..];
        if body.is_empty() {
            return 0;
        }
        body.matches(SEPARATOR).count() + 1
    }

    /// Parent location, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let cut = self.raw.rfind(SEPARATOR)?;
        Some(Self::new(&self.raw[..cut]))
    }

    /// Final segment, or `None` for the root.
    pub fn last_segment(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.raw.rsplit(SEPARATOR).next()
    }

    /// Consume the path, returning its canonical string.
    pub fn into_string(self) -> String {
        self.raw
    }
}

fn normalize(raw: &str) -> String {
    let mut canonical = String::with_capacity(raw.len() + 1);
    for segment in raw.split(SEPARATOR).filter(|s| !s.is_empty()) {
        canonical.push(SEPARATOR);
        canonical.push_str(segment);
    }
    if canonical.is_empty() {
        canonical.push(SEPARATOR);
    }
    canonical
}

impl Default for ArchivePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for ArchivePath {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl From<&str> for ArchivePath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ArchivePath {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}
