//! Tree-to-archive packer.

use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::Path;

use fileutil_io_fs::{
    FsError, SpecFileEntry, create_file, is_nested_within, list_dir, stat_entry,
};
use log::{debug, info};
use zip::ZipWriter;
use zip::write::FileOptions;

use crate::conf::N_SIZE_ZIP64_THRESHOLD;
use crate::spec::{ReportZip, Result, SpecZipWriteOptions, ZipArchiveError};
use crate::util::{derive_base_name, join_entry_name};

struct SpecPackContext<'a, W: Write + Seek> {
    path_archive: &'a Path,
    zip_writer: ZipWriter<W>,
    options_entry: FileOptions,
    report: ReportZip,
}

/// A top-level source that has already been opened successfully.
struct SpecPackSource {
    spec_entry: SpecFileEntry,
    file_src: Option<File>,
}

/// Stat and open one source: files are opened for reading, directories
/// are listed once, so permission problems surface before any output.
fn open_pack_source(path_src: &Path) -> Result<SpecPackSource> {
    let spec_entry = stat_entry(path_src)?;
    if spec_entry.if_is_dir {
        fs::read_dir(path_src)
            .map_err(|e| FsError::io_or_not_found("read source dir error", path_src, e))?;
        return Ok(SpecPackSource {
            spec_entry,
            file_src: None,
        });
    }
    let file_src = File::open(path_src)
        .map_err(|e| FsError::io_or_not_found("open source file error", path_src, e))?;
    Ok(SpecPackSource {
        spec_entry,
        file_src: Some(file_src),
    })
}

/// Pack `sources` (files or directories) into a new ZIP at `path_archive`.
///
/// Equivalent to [`compress_with_options`] with default (deflate) options.
pub fn compress<P, S>(path_archive: P, sources: &[S]) -> Result<ReportZip>
where
    P: AsRef<Path>,
    S: AsRef<Path>,
{
    compress_with_options(path_archive, sources, &SpecZipWriteOptions::default())
}

/// Pack `sources` (files or directories) into a new ZIP at `path_archive`.
///
/// Each source lands under its own base name: a directory `data` yields
/// entries `data/...`, a file `a.txt` yields `a.txt`. Empty directories are
/// kept as directory markers. Children are packed in file-name order.
///
/// Every source is opened before the archive file is created, so a missing
/// or unreadable source leaves no archive behind. An archive path inside a
/// directory source is rejected. Later failures abort and leave a partial
/// archive on disk.
pub fn compress_with_options<P, S>(
    path_archive: P,
    sources: &[S],
    spec_zip_options: &SpecZipWriteOptions,
) -> Result<ReportZip>
where
    P: AsRef<Path>,
    S: AsRef<Path>,
{
    let path_archive = path_archive.as_ref();
    if sources.is_empty() {
        return Err(ZipArchiveError::InvalidArgument(
            "nothing to compress".to_string(),
        ));
    }

    let l_sources = sources
        .iter()
        .map(|p| open_pack_source(p.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    for spec_source in &l_sources {
        let path_src = &spec_source.spec_entry.path;
        if spec_source.spec_entry.if_is_dir && is_nested_within(path_archive, path_src) {
            return Err(ZipArchiveError::InvalidArgument(format!(
                "Archive {} is inside source {}",
                path_archive.display(),
                path_src.display()
            )));
        }
    }

    let file_archive = create_file(path_archive)?;
    let mut spec_pack_ctx = SpecPackContext {
        path_archive,
        zip_writer: ZipWriter::new(file_archive),
        options_entry: FileOptions::default()
            .compression_method(spec_zip_options.rule_compression.to_method()),
        report: ReportZip::default(),
    };

    for SpecPackSource {
        spec_entry,
        file_src,
    } in l_sources
    {
        pack_entry(&spec_entry, file_src, "", &mut spec_pack_ctx)?;
    }

    let SpecPackContext {
        mut zip_writer,
        report,
        ..
    } = spec_pack_ctx;
    zip_writer
        .finish()
        .map_err(|e| ZipArchiveError::zip("finish archive error", path_archive, e))?;

    info!("{} ({})", report, path_archive.display());
    Ok(report)
}

fn pack_entry<W: Write + Seek>(
    spec_entry: &SpecFileEntry,
    file_src: Option<File>,
    prefix: &str,
    spec_pack_ctx: &mut SpecPackContext<'_, W>,
) -> Result<()> {
    let name_entry = join_entry_name(prefix, &derive_base_name(&spec_entry.path)?);

    if spec_entry.if_is_dir {
        let l_children = list_dir(&spec_entry.path, "")?;
        if l_children.is_empty() {
            spec_pack_ctx
                .zip_writer
                .add_directory(name_entry.as_str(), spec_pack_ctx.options_entry)
                .map_err(|e| {
                    ZipArchiveError::zip("add directory entry error", &spec_entry.path, e)
                })?;
            spec_pack_ctx.report.add_dir();
            debug!("Packed empty directory {name_entry}/");
            return Ok(());
        }

        for path_child in l_children {
            let spec_child = stat_entry(&path_child)?;
            pack_entry(&spec_child, None, &name_entry, spec_pack_ctx)?;
        }
        return Ok(());
    }

    let mut file_src = match file_src {
        Some(file_src) => file_src,
        None => File::open(&spec_entry.path).map_err(|e| {
            FsError::io_or_not_found("open source file error", &spec_entry.path, e)
        })?,
    };
    let options_file = spec_pack_ctx
        .options_entry
        .large_file(spec_entry.size >= N_SIZE_ZIP64_THRESHOLD);
    spec_pack_ctx
        .zip_writer
        .start_file(name_entry.as_str(), options_file)
        .map_err(|e| ZipArchiveError::zip("add file entry error", &spec_entry.path, e))?;
    let n_bytes = io::copy(&mut file_src, &mut spec_pack_ctx.zip_writer).map_err(|e| {
        ZipArchiveError::io("write archive entry error", spec_pack_ctx.path_archive, e)
    })?;
    spec_pack_ctx.report.add_file(n_bytes);
    debug!("Packed {name_entry} ({n_bytes} bytes)");
    Ok(())
}
