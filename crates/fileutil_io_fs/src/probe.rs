//! Single-path queries and thin wrappers over host file primitives.

use std::fs::{self, File};
use std::path::Path;
use std::time::SystemTime;

use filetime::{FileTime, set_file_mtime};
use serde::Serialize;

use crate::conf::N_MODE_DIR_CREATE;
use crate::spec::{FsError, Result, SpecFileEntry};

////////////////////////////////////////////////////////////////////////////////
// #region Queries

/// Whether `path` exists. Any stat failure counts as "does not exist".
pub fn is_existed<P: AsRef<Path>>(path: P) -> bool {
    fs::metadata(path).is_ok()
}

/// Whether `path` exists and is a directory.
pub fn is_dir<P: AsRef<Path>>(path: P) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_dir())
}

/// Whether `path` exists and is a regular file.
pub fn is_file<P: AsRef<Path>>(path: P) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file())
}

/// Take a [`SpecFileEntry`] snapshot of `path`, following symlinks.
pub fn stat_entry<P: AsRef<Path>>(path: P) -> Result<SpecFileEntry> {
    let path = path.as_ref();
    let meta = fs::metadata(path)
        .map_err(|e| FsError::io_or_not_found("stat file info error", path, e))?;
    let time_modified = meta
        .modified()
        .map_err(|e| FsError::io("stat file info error", path, e))?;

    Ok(SpecFileEntry {
        path: path.to_path_buf(),
        if_is_dir: meta.is_dir(),
        size: meta.len(),
        permissions: meta.permissions(),
        time_modified,
    })
}

/// Size of `path` in bytes.
pub fn get_file_size<P: AsRef<Path>>(path: P) -> Result<u64> {
    Ok(stat_entry(path)?.size)
}

/// Last modification time of `path`.
pub fn get_file_mod_time<P: AsRef<Path>>(path: P) -> Result<SystemTime> {
    Ok(stat_entry(path)?.time_modified)
}

/// Overwrite the modification time of `path`, keeping its access time.
pub fn set_file_mod_time<P: AsRef<Path>>(path: P, time_modified: SystemTime) -> Result<()> {
    let path = path.as_ref();
    set_file_mtime(path, FileTime::from_system_time(time_modified))
        .map_err(|e| FsError::io_or_not_found("set file mod time error", path, e))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Mutations

/// Create `dir` and its parents if it does not exist yet.
pub fn make_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    if is_existed(dir) {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(N_MODE_DIR_CREATE);
    }
    #[cfg(not(unix))]
    let _ = N_MODE_DIR_CREATE;

    builder
        .create(dir)
        .map_err(|e| FsError::io("make dir failed", dir, e))
}

/// Create (or truncate) `path` for writing, creating parent directories first.
pub fn create_file<P: AsRef<Path>>(path: P) -> Result<File> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        make_dir(parent)?;
    }
    File::create(path).map_err(|e| FsError::io("create file error", path, e))
}

/// Rename `path_old` to `path_new`.
pub fn rename_file<P: AsRef<Path>, Q: AsRef<Path>>(path_old: P, path_new: Q) -> Result<()> {
    let path_old = path_old.as_ref();
    fs::rename(path_old, path_new.as_ref())
        .map_err(|e| FsError::io_or_not_found("rename file error", path_old, e))
}

/// Remove a single file (or empty directory on some hosts).
pub fn remove_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    fs::remove_file(path).map_err(|e| FsError::io_or_not_found("remove file error", path, e))
}

/// Remove `path` recursively. A missing path is not an error.
pub fn remove_all<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let meta = match fs::symlink_metadata(path) {
        Ok(v) => v,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(FsError::io("remove all error", path, e)),
    };

    let res_remove = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    res_remove.map_err(|e| FsError::io("remove all error", path, e))
}

/// Read the whole content of `path`.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| FsError::io_or_not_found("read file error", path, e))
}

/// Write raw bytes (or a string) to `path`, creating parent directories.
pub fn write_data_to_file<P: AsRef<Path>, D: AsRef<[u8]>>(path: P, data: D) -> Result<()> {
    use std::io::Write;

    let path = path.as_ref();
    let mut file = create_file(path)?;
    file.write_all(data.as_ref())
        .map_err(|e| FsError::io("save data fail", path, e))
}

/// Serialize `value` as JSON and write it to `path`, creating parent directories.
pub fn write_json_to_file<P: AsRef<Path>, T: Serialize + ?Sized>(path: P, value: &T) -> Result<()> {
    let v_json = serde_json::to_vec(value)?;
    write_data_to_file(path, v_json)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use serde::Serialize;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn probe_reports_type_size_and_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let path_file = tmp.path().join("a.bin");
        std::fs::write(&path_file, [0_u8; 100]).expect("write");

        assert!(is_existed(&path_file));
        assert!(is_file(&path_file));
        assert!(!is_dir(&path_file));
        assert!(is_dir(tmp.path()));
        assert_eq!(get_file_size(&path_file).expect("size"), 100);

        let path_missing = tmp.path().join("missing");
        assert!(!is_existed(&path_missing));
        let err = stat_entry(&path_missing).expect_err("must fail");
        assert!(matches!(err, FsError::NotFound(_)));
        assert!(get_file_size(&path_missing).is_err());
    }

    #[test]
    fn set_and_get_mod_time() {
        let tmp = TempDir::new().expect("tempdir");
        let path_file = tmp.path().join("a.txt");
        std::fs::write(&path_file, "a").expect("write");

        let time_old = SystemTime::now() - Duration::from_secs(3600);
        set_file_mod_time(&path_file, time_old).expect("set mtime");
        let time_read = get_file_mod_time(&path_file).expect("mtime");
        let n_diff = time_read
            .duration_since(time_old)
            .unwrap_or_else(|e| e.duration());
        assert!(n_diff < Duration::from_secs(1));
    }

    #[test]
    fn create_file_and_make_dir_build_parents() {
        let tmp = TempDir::new().expect("tempdir");
        let path_file = tmp.path().join("x/y/z.txt");
        drop(create_file(&path_file).expect("create"));
        assert!(is_file(&path_file));

        make_dir(tmp.path().join("x/y")).expect("existing dir is fine");
        make_dir(tmp.path().join("p/q")).expect("new dir");
        assert!(is_dir(tmp.path().join("p/q")));
    }

    #[test]
    fn write_read_rename_remove() {
        #[derive(Serialize)]
        struct Payload {
            name: &'static str,
            n: u32,
        }

        let tmp = TempDir::new().expect("tempdir");
        let path_json = tmp.path().join("out/data.json");
        write_json_to_file(&path_json, &Payload { name: "a", n: 1 }).expect("json");
        assert_eq!(read_file(&path_json).expect("read"), br#"{"name":"a","n":1}"#);

        let path_txt = tmp.path().join("out/data.txt");
        write_data_to_file(&path_txt, "hello").expect("text");
        let path_renamed = tmp.path().join("out/renamed.txt");
        rename_file(&path_txt, &path_renamed).expect("rename");
        assert!(!is_existed(&path_txt));
        assert_eq!(read_file(&path_renamed).expect("read"), b"hello");

        remove_file(&path_renamed).expect("remove");
        assert!(remove_file(&path_renamed).expect_err("gone").is_not_found());

        remove_all(tmp.path().join("out")).expect("remove all");
        assert!(!is_existed(tmp.path().join("out")));
        remove_all(tmp.path().join("out")).expect("missing is fine");
    }
}
