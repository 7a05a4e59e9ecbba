//! Single-file copy strategies and directory tree copy.

use std::fs::{File, OpenOptions, Permissions};
use std::io::{self, Read, Write};
use std::path::Path;

use log::{debug, info};
use walkdir::WalkDir;

use crate::conf::derive_buffer_size;
use crate::path::is_nested_within;
use crate::probe::{is_dir, is_existed, make_dir};
use crate::report::{ReportCopy, ReportCopyBuilder};
use crate::spec::{EnumCopyFileStrategy, FsError, Result, SpecCopyFileOptions};
use crate::util::{derive_destination_path, ensure_parent_dir};

////////////////////////////////////////////////////////////////////////////////
// #region SingleFileCopy

fn open_source(path_file_src: &Path) -> Result<(File, Permissions)> {
    let file_src = File::open(path_file_src)
        .map_err(|e| FsError::io_or_not_found("open source file error", path_file_src, e))?;
    let stat_src = file_src
        .metadata()
        .map_err(|e| FsError::io("stat source file error", path_file_src, e))?;
    Ok((file_src, stat_src.permissions()))
}

/// Walk failures inside a tree copy are host IO failures of the walked path.
fn map_walk_error(e: walkdir::Error, path_dir_src: &Path) -> FsError {
    let path_failed = e.path().unwrap_or(path_dir_src).to_path_buf();
    FsError::io("walk source dir error", &path_failed, io::Error::from(e))
}

/// A source entry that vanished mid-walk is an IO failure of the copy, not
/// a missing argument.
fn map_entry_error(err: FsError) -> FsError {
    match err {
        FsError::NotFound(path) => FsError::io(
            "copy tree entry error",
            &path,
            io::Error::from(io::ErrorKind::NotFound),
        ),
        other => other,
    }
}

/// Open `path_file_dst` truncated and give it exactly `permissions`.
fn open_destination(path_file_dst: &Path, permissions: Permissions) -> Result<File> {
    let file_dst = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path_file_dst)
        .map_err(|e| FsError::io("open destination file error", path_file_dst, e))?;
    file_dst
        .set_permissions(permissions)
        .map_err(|e| FsError::io("set destination permissions error", path_file_dst, e))?;
    Ok(file_dst)
}

/// Copy `src` to `dst` by loading the whole content into memory.
///
/// Returns the number of bytes written.
pub fn copy_file_read_whole<P, Q>(src: P, dst: Q) -> Result<u64>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_file_src = src.as_ref();
    let path_file_dst = dst.as_ref();

    let (mut file_src, permissions) = open_source(path_file_src)?;
    let mut v_data = Vec::new();
    file_src
        .read_to_end(&mut v_data)
        .map_err(|e| FsError::io("read source file error", path_file_src, e))?;
    drop(file_src);

    let mut file_dst = open_destination(path_file_dst, permissions)?;
    file_dst
        .write_all(&v_data)
        .map_err(|e| FsError::io("write destination file error", path_file_dst, e))?;
    Ok(v_data.len() as u64)
}

/// Copy `src` to `dst` with a single streaming `io::copy`.
///
/// Returns the number of bytes written.
pub fn copy_file_stream<P, Q>(src: P, dst: Q) -> Result<u64>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_file_src = src.as_ref();
    let path_file_dst = dst.as_ref();

    let (mut file_src, permissions) = open_source(path_file_src)?;
    let mut file_dst = open_destination(path_file_dst, permissions)?;
    io::copy(&mut file_src, &mut file_dst)
        .map_err(|e| FsError::io("copy file error", path_file_dst, e))
}

/// Copy `src` to `dst` through a fixed-size buffer of `size_buffer` bytes.
///
/// `size_buffer == 0` falls back to [`crate::conf::N_SIZE_BUFFER_COPY_DEFAULT`].
/// Returns the number of bytes written.
pub fn copy_file_buffered<P, Q>(src: P, dst: Q, size_buffer: usize) -> Result<u64>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_file_src = src.as_ref();
    let path_file_dst = dst.as_ref();

    let (mut file_src, permissions) = open_source(path_file_src)?;
    let mut file_dst = open_destination(path_file_dst, permissions)?;

    let mut v_buf = vec![0_u8; derive_buffer_size(size_buffer)];
    let mut n_written: u64 = 0;
    loop {
        let n_read = match file_src.read(&mut v_buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FsError::io("read source file error", path_file_src, e)),
        };
        file_dst
            .write_all(&v_buf[..n_read])
            .map_err(|e| FsError::io("write destination file error", path_file_dst, e))?;
        n_written += n_read as u64;
    }
    Ok(n_written)
}

/// Copy one file with the strategy selected in `spec_cp_options`.
pub fn copy_file<P, Q>(src: P, dst: Q, spec_cp_options: &SpecCopyFileOptions) -> Result<u64>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    match spec_cp_options.rule_strategy {
        EnumCopyFileStrategy::ReadWhole => copy_file_read_whole(src, dst),
        EnumCopyFileStrategy::Stream => copy_file_stream(src, dst),
        EnumCopyFileStrategy::Buffered => {
            copy_file_buffered(src, dst, spec_cp_options.size_buffer)
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TreeCopy

/// Copy the content of `dir_source` into `dir_destination`.
///
/// Equivalent to [`copy_tree_with_options`] with the default (streaming)
/// file copy strategy.
pub fn copy_tree<P, Q>(dir_source: P, dir_destination: Q) -> Result<ReportCopy>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    copy_tree_with_options(dir_source, dir_destination, &SpecCopyFileOptions::default())
}

/// Copy the content of `dir_source` into `dir_destination`.
///
/// Both directories must already exist and must differ. Only descendants are
/// copied; the source root node itself is not recreated under the
/// destination. Children are visited depth-first in file-name order.
/// Directories (empty ones included) are created when missing, files are
/// copied with their permission bits.
///
/// The first failing entry aborts the walk with [`FsError::Io`]; whatever
/// was copied before stays on disk.
pub fn copy_tree_with_options<P, Q>(
    dir_source: P,
    dir_destination: Q,
    spec_cp_options: &SpecCopyFileOptions,
) -> Result<ReportCopy>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_dir_src = dir_source.as_ref();
    let path_dir_dst = dir_destination.as_ref();

    if !is_dir(path_dir_src) {
        return Err(FsError::InvalidArgument(format!(
            "Source is not a directory: {}",
            path_dir_src.display()
        )));
    }
    if !is_dir(path_dir_dst) {
        return Err(FsError::InvalidArgument(format!(
            "Destination is not a directory: {}",
            path_dir_dst.display()
        )));
    }
    if path_dir_src.to_string_lossy().trim() == path_dir_dst.to_string_lossy().trim() {
        return Err(FsError::InvalidArgument(format!(
            "Source and destination are the same path: {}",
            path_dir_src.display()
        )));
    }
    if is_nested_within(path_dir_dst, path_dir_src) {
        return Err(FsError::InvalidArgument(format!(
            "Destination {} is inside source {}",
            path_dir_dst.display(),
            path_dir_src.display()
        )));
    }

    let mut builder_cp_report = ReportCopyBuilder::default();
    for entry_res in WalkDir::new(path_dir_src).min_depth(1).sort_by_file_name() {
        let entry = entry_res.map_err(|e| map_walk_error(e, path_dir_src))?;
        builder_cp_report.add_scanned();

        let path_src = entry.path();
        let path_dst = derive_destination_path(path_src, path_dir_src, path_dir_dst)?;
        let cfg_file_type = entry.file_type();
        let b_is_dir = cfg_file_type.is_dir() || (cfg_file_type.is_symlink() && is_dir(path_src));

        if b_is_dir {
            if !is_existed(&path_dst) {
                make_dir(&path_dst)?;
                builder_cp_report.add_dir_created();
                debug!("Created directory {}", path_dst.display());
            }
            continue;
        }

        ensure_parent_dir(&path_dst)?;
        let n_bytes = copy_file(path_src, &path_dst, spec_cp_options).map_err(map_entry_error)?;
        builder_cp_report.add_file_copied(n_bytes);
        debug!(
            "Copied {} -> {} ({n_bytes} bytes)",
            path_src.display(),
            path_dst.display()
        );
    }

    let report = builder_cp_report.build();
    info!(
        "{} ({} -> {})",
        report,
        path_dir_src.display(),
        path_dir_dst.display()
    );
    Ok(report)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
