use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use crate::probe::make_dir;
use crate::spec::{FsError, Result};

////////////////////////////////////////////////////////////////////////////////
// #region SuffixMatching

/// Compiled case-insensitive file-name suffix filter.
///
/// Both the suffix and the candidate names are lowercased with full Unicode
/// folding before matching. An empty suffix matches every name.
#[derive(Debug, Clone)]
pub(crate) struct SpecSuffixFilter {
    matcher: Option<GlobMatcher>,
}

impl SpecSuffixFilter {
    pub(crate) fn new(suffix: &str) -> Result<Self> {
        if suffix.is_empty() {
            return Ok(Self { matcher: None });
        }
        let pattern = format!("*{}", globset::escape(&suffix.to_lowercase()));
        let matcher = GlobBuilder::new(&pattern)
            .literal_separator(false)
            .build()
            .map_err(|e| FsError::Pattern(format!("{suffix:?} ({e})")))?
            .compile_matcher();
        Ok(Self {
            matcher: Some(matcher),
        })
    }

    /// Match against a bare file name (not a full path).
    pub(crate) fn is_match(&self, name_file: &str) -> bool {
        match &self.matcher {
            None => true,
            Some(matcher) => matcher.is_match(name_file.to_lowercase()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

/// Relocate `path_src_item` from under `path_dir_src` to under `path_dir_dst`.
///
/// The source root is stripped as a leading component prefix, so a root
/// string recurring deeper in the path is left untouched.
///
/// # Examples
/// ```ignore
/// let path_dst = derive_destination_path(
///     Path::new("/data/src/x/src/a.txt"),
///     Path::new("/data/src"),
///     Path::new("/backup"),
/// )?;
/// assert_eq!(path_dst, Path::new("/backup/x/src/a.txt"));
/// ```
pub(crate) fn derive_destination_path(
    path_src_item: &Path,
    path_dir_src: &Path,
    path_dir_dst: &Path,
) -> Result<PathBuf> {
    let path_rel = path_src_item.strip_prefix(path_dir_src).map_err(|_| {
        FsError::InvalidArgument(format!(
            "Walked path {} is outside source root {}",
            path_src_item.display(),
            path_dir_src.display()
        ))
    })?;
    Ok(path_dir_dst.join(path_rel))
}

/// Make sure the parent directory of `path_file` exists.
pub(crate) fn ensure_parent_dir(path_file: &Path) -> Result<()> {
    match path_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => make_dir(parent),
        _ => Ok(()),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
