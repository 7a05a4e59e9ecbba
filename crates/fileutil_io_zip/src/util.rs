use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::conf::C_SEP_ENTRY;
use crate::spec::{Result, ZipArchiveError};

/// Append `name` to an entry-name prefix with the archive separator.
///
/// An empty prefix yields `name` alone, so names never start with `/`.
pub(crate) fn join_entry_name(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        return name.to_string();
    }
    format!("{prefix}{C_SEP_ENTRY}{name}")
}

/// Base name used for `path` inside the archive.
///
/// Paths without a final component (`.`, `..`) are resolved first.
pub(crate) fn derive_base_name(path: &Path) -> Result<String> {
    if let Some(name) = path.file_name() {
        return Ok(name.to_string_lossy().to_string());
    }
    fs::canonicalize(path)
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .ok_or_else(|| {
            ZipArchiveError::InvalidArgument(format!(
                "Cannot derive an entry name for {}",
                path.display()
            ))
        })
}

/// Map an archive entry name onto `dir_dest`.
///
/// Names are split on `/`; empty and `.` segments are dropped (so a leading
/// `/` is tolerated). Any segment that is not a plain name, such as `..` or
/// a drive prefix, is rejected so extraction never leaves `dir_dest`.
pub(crate) fn derive_extract_path(dir_dest: &Path, name_entry: &str) -> Result<PathBuf> {
    let mut path_out = dir_dest.to_path_buf();
    let mut n_segments = 0_usize;
    for segment in name_entry.split(C_SEP_ENTRY) {
        if segment.is_empty() || segment == "." {
            continue;
        }
        let mut iter_components = Path::new(segment).components();
        let b_is_plain = matches!(
            (iter_components.next(), iter_components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !b_is_plain {
            return Err(ZipArchiveError::InvalidArgument(format!(
                "Unsafe archive entry name: {name_entry:?}"
            )));
        }
        path_out.push(segment);
        n_segments += 1;
    }

    if n_segments == 0 {
        return Err(ZipArchiveError::InvalidArgument(format!(
            "Empty archive entry name: {name_entry:?}"
        )));
    }
    Ok(path_out)
}
