//! Path normalization and validation.
//!
//! Every key stored in the index and every key used for a lookup goes through
//! [`join_root`], so the two sides always agree. Normalization re-anchors at `/`,
//! which means `..` segments can never climb above the root.

use std::path::MAIN_SEPARATOR;

use crate::error::{Result, TarFsError};

/// The root key. It is never stored in the index.
pub const ROOT: &str = "/";

/// Joins `name` against the root and cleans the result.
///
/// Empty and `.` segments are dropped, `..` removes the previous segment (or
/// nothing at the root) and duplicate separators collapse.
/// Example: `"./dir1//../dir2/file.txt"` becomes `"/dir2/file.txt"`.
pub fn join_root(name: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in name.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return ROOT.to_string();
    }
    let mut out = String::with_capacity(name.len() + 1);
    for segment in segments {
        out.push('/');
        out.push_str(segment);
    }
    out
}

/// Validates a caller-supplied path and returns its normalized key.
///
/// Paths with a NUL byte are rejected, and so are paths containing the native
/// separator on platforms where it is not `/`.
pub fn resolve(raw: &str) -> Result<String> {
    if raw.contains('\0') || (MAIN_SEPARATOR != '/' && raw.contains(MAIN_SEPARATOR)) {
        return Err(TarFsError::InvalidPath);
    }
    Ok(join_root(raw))
}

/// Segment-aware prefix test on normalized keys.
///
/// `path` is a descendant of `dir` when `dir` is the root or when `path`
/// continues `dir` with a separator. `/foobar` is not under `/foo`.
pub fn is_descendant(dir: &str, path: &str) -> bool {
    if dir == ROOT {
        return path != ROOT;
    }
    path.len() > dir.len() && path.starts_with(dir) && path.as_bytes()[dir.len()] == b'/'
}

/// Last segment of a normalized key, `/` for the root.
pub fn base_name(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((_, "")) | None => ROOT,
        Some((_, name)) => name,
    }
}
