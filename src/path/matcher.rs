//! Glob and regex matching of archive paths.
//!
//! Patterns use the `syntax:pattern` form. Supported syntaxes:
//!
//! - `glob`: `*` within one segment, `**` across segments, `?` one character,
//!   `[abc]`/`[!abc]` character classes, `{a,b}` alternatives, `\` escapes.
//! - `regex`: a regular expression, matched against the whole path.
//!
//! Patterns are matched against the canonical path string, which always
//! begins with `/` (so `glob:/*.txt`, not `glob:*.txt`).

use regex::Regex;

use super::adapter::FsPath;
use super::identity::{ArchivePath, SEPARATOR};
use crate::error::{FsError, FsResult};

/// Compiled path matcher.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    regex: Regex,
}

impl PathMatcher {
    /// Compile a `syntax:pattern` string.
    ///
    /// The syntax name is case-insensitive.
    pub fn new(syntax_and_pattern: &str) -> FsResult<Self> {
        let (syntax, pattern) = syntax_and_pattern.split_once(':').ok_or_else(|| {
            FsError::invalid(format!(
                "path matcher must be in syntax:pattern form, got {syntax_and_pattern}"
            ))
        })?;

        let expr = if syntax.eq_ignore_ascii_case("glob") {
            glob_to_regex(pattern)?
        } else if syntax.eq_ignore_ascii_case("regex") {
            pattern.to_string()
        } else {
            return Err(FsError::unsupported(format!("path matcher syntax {syntax}")));
        };

        let regex = Regex::new(&format!("^(?:{expr})$"))
            .map_err(|e| FsError::invalid(format!("bad pattern {pattern}: {e}")))?;
        Ok(Self { regex })
    }

    /// Check if `path` matches.
    #[inline]
    pub fn matches(&self, path: &FsPath) -> bool {
        self.matches_archive_path(path.archive_path())
    }

    /// Check if an archive path matches.
    #[inline]
    pub fn matches_archive_path(&self, path: &ArchivePath) -> bool {
        self.regex.is_match(path.as_str())
    }
}

/// Translate a glob into an (unanchored) regular expression.
fn glob_to_regex(glob: &str) -> FsResult<String> {
    let any_in_segment = format!("[^{SEPARATOR}]");
    let mut out = String::with_capacity(glob.len() * 2);
    let mut chars = glob.chars().peekable();
    let mut in_group = false;

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    out.push_str(".*");
                } else {
                    out.push_str(&any_in_segment);
                    out.push('*');
                }
            }
            '?' => out.push_str(&any_in_segment),
            '[' => {
                out.push('[');
                if chars.peek() == Some(&'!') {
                    chars.next();
                    out.push('^');
                }
                let mut closed = false;
                for c in chars.by_ref() {
                    match c {
                        ']' => {
                            closed = true;
                            break;
                        }
                        '\\' | '[' | '&' | '~' | '^' => {
                            out.push('\\');
                            out.push(c);
                        }
                        _ => out.push(c),
                    }
                }
                if !closed {
                    return Err(FsError::invalid(format!("unclosed character class in {glob}")));
                }
                out.push(']');
            }
            '{' => {
                if in_group {
                    return Err(FsError::invalid(format!("nested group in {glob}")));
                }
                in_group = true;
                out.push_str("(?:");
            }
            '}' if in_group => {
                in_group = false;
                out.push(')');
            }
            ',' if in_group => out.push('|'),
            '\\' => {
                let escaped = chars
                    .next()
                    .ok_or_else(|| FsError::invalid(format!("dangling escape in {glob}")))?;
                push_literal(&mut out, escaped);
            }
            _ => push_literal(&mut out, c),
        }
    }

    if in_group {
        return Err(FsError::invalid(format!("unclosed group in {glob}")));
    }
    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn matches(pattern: &str, path: &str) -> bool {
        PathMatcher::new(pattern)
            .unwrap()
            .matches_archive_path(&ArchivePath::new(path))
    }

    #[test]
    fn test_glob_star_stays_in_segment() {
        assert!(matches("glob:/*.txt", "/a.txt"));
        assert!(!matches("glob:/*.txt", "/dir/a.txt"));
        assert!(matches("glob:/dir/*", "/dir/a.txt"));
    }

    #[test]
    fn test_glob_double_star_crosses_segments() {
        assert!(matches("glob:/**.txt", "/a.txt"));
        assert!(matches("glob:/**.txt", "/dir/nested/a.txt"));
        assert!(matches("glob:/META-INF/**", "/META-INF/services/x"));
    }

    #[test]
    fn test_glob_question_and_class() {
        assert!(matches("glob:/file?.bin", "/file1.bin"));
        assert!(!matches("glob:/file?.bin", "/file10.bin"));
        assert!(matches("glob:/[abc]*", "/beta"));
        assert!(!matches("glob:/[!abc]*", "/beta"));
        assert!(matches("glob:/[!abc]*", "/delta"));
    }

    #[test]
    fn test_glob_group_and_literals() {
        assert!(matches("glob:/dir/{a,b}.txt", "/dir/b.txt"));
        assert!(!matches("glob:/dir/{a,b}.txt", "/dir/c.txt"));
        assert!(matches("glob:/a+b(c).txt", "/a+b(c).txt"));
        assert!(matches("glob:/\\*", "/*"));
        assert!(!matches("glob:/\\*", "/x"));
    }

    #[test]
    fn test_regex_syntax() {
        assert!(matches("regex:/dir/.*", "/dir/a/b"));
        assert!(!matches("regex:/dir/.*", "/other/dir/a"));
        assert!(matches("REGEX:/x", "/x"));
    }

    #[test]
    fn test_errors() {
        let kind = |p: &str| PathMatcher::new(p).unwrap_err().kind();
        assert_eq!(kind("noColon"), ErrorKind::InvalidArgument);
        assert_eq!(kind("xpath:/a"), ErrorKind::Unsupported);
        assert_eq!(kind("regex:("), ErrorKind::InvalidArgument);
        assert_eq!(kind("glob:/{a,b"), ErrorKind::InvalidArgument);
        assert_eq!(kind("glob:/[ab"), ErrorKind::InvalidArgument);
        assert_eq!(kind("glob:/a\\"), ErrorKind::InvalidArgument);
    }
}
