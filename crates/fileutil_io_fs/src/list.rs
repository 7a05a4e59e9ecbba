//! Shallow and recursive directory listing with suffix filtering.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::spec::{FsError, Result};
use crate::util::SpecSuffixFilter;

/// List the immediate children (files and directories) of `dir`.
///
/// Names are filtered by a case-insensitive `suffix`; an empty `suffix`
/// keeps everything. Results are joined with `dir` and sorted by name.
/// Names that are not valid UTF-8 are kept byte for byte; only the filter
/// sees their lossy form.
pub fn list_dir<P: AsRef<Path>>(dir: P, suffix: &str) -> Result<Vec<PathBuf>> {
    let path_dir = dir.as_ref();
    let filter_suffix = SpecSuffixFilter::new(suffix)?;

    let iter_entries =
        fs::read_dir(path_dir).map_err(|e| FsError::io("read dir error", path_dir, e))?;
    let mut l_names = Vec::new();
    for entry_res in iter_entries {
        let entry = entry_res.map_err(|e| FsError::io("read dir entry error", path_dir, e))?;
        let name_file = entry.file_name();
        if filter_suffix.is_match(&name_file.to_string_lossy()) {
            l_names.push(name_file);
        }
    }
    l_names.sort();

    Ok(l_names.into_iter().map(|n| path_dir.join(n)).collect())
}

/// List every file below `dir`, recursively. Directories are never returned.
///
/// File names are filtered by a case-insensitive `suffix`; an empty `suffix`
/// keeps every file. Order is depth-first, children sorted by name.
pub fn walk_dir<P: AsRef<Path>>(dir: P, suffix: &str) -> Result<Vec<PathBuf>> {
    let path_dir = dir.as_ref();
    let filter_suffix = SpecSuffixFilter::new(suffix)?;

    let mut l_files = Vec::new();
    for entry_res in WalkDir::new(path_dir).sort_by_file_name() {
        let entry = entry_res?;
        if entry.file_type().is_dir() {
            continue;
        }
        if filter_suffix.is_match(&entry.file_name().to_string_lossy()) {
            l_files.push(entry.into_path());
        }
    }
    Ok(l_files)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use super::{list_dir, walk_dir};

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, "x").expect("write");
    }

    fn build_tree(root: &Path) {
        touch(&root.join("a.txt"));
        touch(&root.join("B.TXT"));
        touch(&root.join("c.md"));
        touch(&root.join("nested/d.txt"));
        touch(&root.join("nested/deeper/e.Txt"));
        touch(&root.join("nested/deeper/f.log"));
        std::fs::create_dir_all(root.join("dir.txt")).expect("mkdir");
    }

    #[test]
    fn list_dir_is_shallow_and_includes_dirs() {
        let tmp = TempDir::new().expect("tempdir");
        build_tree(tmp.path());

        let l_all = list_dir(tmp.path(), "").expect("list");
        assert_eq!(
            l_all,
            ["B.TXT", "a.txt", "c.md", "dir.txt", "nested"]
                .iter()
                .map(|n| tmp.path().join(n))
                .collect::<Vec<_>>()
        );

        let l_txt = list_dir(tmp.path(), ".TXT").expect("list");
        assert_eq!(
            l_txt,
            ["B.TXT", "a.txt", "dir.txt"]
                .iter()
                .map(|n| tmp.path().join(n))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn walk_dir_returns_only_matching_files() {
        let tmp = TempDir::new().expect("tempdir");
        build_tree(tmp.path());

        let l_txt = walk_dir(tmp.path(), ".txt").expect("walk");
        assert_eq!(
            l_txt,
            ["B.TXT", "a.txt", "nested/d.txt", "nested/deeper/e.Txt"]
                .iter()
                .map(|n| tmp.path().join(n))
                .collect::<Vec<_>>()
        );
        assert!(l_txt.iter().all(|p| p.is_file()));

        let l_all = walk_dir(tmp.path(), "").expect("walk");
        assert_eq!(l_all.len(), 6);
    }

    #[test]
    fn suffix_match_folds_non_ascii_case() {
        let tmp = TempDir::new().expect("tempdir");
        touch(&tmp.path().join("a.ÄTXT"));
        touch(&tmp.path().join("b.atxt"));

        let l_walked = walk_dir(tmp.path(), ".ätxt").expect("walk");
        assert_eq!(l_walked, [tmp.path().join("a.ÄTXT")]);
        let l_listed = list_dir(tmp.path(), ".ÄtXt").expect("list");
        assert_eq!(l_listed, [tmp.path().join("a.ÄTXT")]);
    }

    #[cfg(unix)]
    #[test]
    fn list_dir_keeps_non_utf8_names_intact() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().expect("tempdir");
        let name_raw = OsStr::from_bytes(b"bad\xffname.txt");
        touch(&tmp.path().join(name_raw));
        touch(&tmp.path().join("good.txt"));

        let l_listed = list_dir(tmp.path(), ".txt").expect("list");
        assert_eq!(
            l_listed,
            [tmp.path().join(name_raw), tmp.path().join("good.txt")]
        );
        assert!(l_listed.iter().all(|p| p.is_file()));
    }

    #[test]
    fn listing_missing_dir_fails() {
        let tmp = TempDir::new().expect("tempdir");
        let path_missing = tmp.path().join("missing");
        assert!(list_dir(&path_missing, "").is_err());
        let err = walk_dir(&path_missing, ".txt").expect_err("must fail");
        assert!(err.is_not_found());
    }
}
