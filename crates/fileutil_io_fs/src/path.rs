//! Path string helpers.

use std::fs;
use std::path::{Path, PathBuf};

/// Replace the extension of the final path component.
///
/// `new_ext` may be given with or without its leading dot. An empty
/// `new_ext` strips the extension. A path without an extension gets one.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use fileutil_io_fs::path::replace_path_ext;
///
/// assert_eq!(replace_path_ext("data/a.txt", ".json"), Path::new("data/a.json"));
/// assert_eq!(replace_path_ext("data/a.txt", "md"), Path::new("data/a.md"));
/// assert_eq!(replace_path_ext("data/a.txt", ""), Path::new("data/a"));
/// ```
pub fn replace_path_ext<P: AsRef<Path>>(path: P, new_ext: &str) -> PathBuf {
    let ext = new_ext.strip_prefix('.').unwrap_or(new_ext);
    path.as_ref().with_extension(ext)
}

/// Join `segments` onto `base` in order.
pub fn join_path<P, I, S>(base: P, segments: I) -> PathBuf
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let mut path_out = base.as_ref().to_path_buf();
    for segment in segments {
        path_out.push(segment);
    }
    path_out
}

/// Absolute form of `path` with symlinks resolved where possible.
///
/// Components that do not exist yet are kept as written on top of their
/// nearest existing ancestor, which is resolved.
fn _normalize_path(path: &Path) -> PathBuf {
    let path_abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    for path_ancestor in path_abs.ancestors() {
        if let Ok(resolved) = fs::canonicalize(path_ancestor) {
            return match path_abs.strip_prefix(path_ancestor) {
                Ok(path_rest) if !path_rest.as_os_str().is_empty() => resolved.join(path_rest),
                _ => resolved,
            };
        }
    }
    path_abs
}

/// Whether `path_inner` resolves to a location strictly inside `path_outer`.
pub fn is_nested_within<P, Q>(path_inner: P, path_outer: Q) -> bool
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_outer_resolved = _normalize_path(path_outer.as_ref());
    let path_inner_resolved = _normalize_path(path_inner.as_ref());
    path_inner_resolved != path_outer_resolved
        && path_inner_resolved.starts_with(&path_outer_resolved)
}
