//! Archive-to-tree unpacker.

use std::fs::File;
use std::io;
use std::path::Path;

use fileutil_io_fs::{FsError, create_file, make_dir};
use log::{debug, info};
use zip::ZipArchive;

use crate::spec::{ReportZip, Result, ZipArchiveError};
use crate::util::derive_extract_path;

/// Extract every entry of the ZIP at `path_archive` under `dir_dest`.
///
/// Entries are processed in archive order. Directory markers become
/// (possibly empty) directories; file entries get their parent directories
/// created first. Entry names that would resolve outside `dir_dest` are
/// rejected. The first failure aborts; entries already extracted stay.
pub fn decompress<P, Q>(path_archive: P, dir_dest: Q) -> Result<ReportZip>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_archive = path_archive.as_ref();
    let path_dir_dest = dir_dest.as_ref();

    let file_archive = File::open(path_archive)
        .map_err(|e| FsError::io_or_not_found("open archive error", path_archive, e))?;
    let mut zip_archive = ZipArchive::new(file_archive)
        .map_err(|e| ZipArchiveError::zip("read archive error", path_archive, e))?;

    let mut report = ReportZip::default();
    for n_idx in 0..zip_archive.len() {
        let mut zip_entry = zip_archive
            .by_index(n_idx)
            .map_err(|e| ZipArchiveError::zip("read archive entry error", path_archive, e))?;
        let name_entry = zip_entry.name().to_string();
        let path_dst = derive_extract_path(path_dir_dest, &name_entry)?;

        if zip_entry.is_dir() {
            make_dir(&path_dst)?;
            report.add_dir();
            debug!("Extracted directory {}", path_dst.display());
            continue;
        }

        let mut file_dst = create_file(&path_dst)?;
        let n_bytes = io::copy(&mut zip_entry, &mut file_dst)
            .map_err(|e| ZipArchiveError::io("extract archive entry error", &path_dst, e))?;
        report.add_file(n_bytes);
        debug!("Extracted {name_entry} ({n_bytes} bytes)");
    }

    info!(
        "{} ({} -> {})",
        report,
        path_archive.display(),
        path_dir_dest.display()
    );
    Ok(report)
}
