//! Archive options, report model and error types.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use fileutil_io_fs::FsError;
use thiserror::Error;
use zip::CompressionMethod;
use zip::result::ZipError;

use crate::conf::derive_default_zip_write_options;

////////////////////////////////////////////////////////////////////////////////
// #region OptionsAndReport

/// Compression applied to file entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumZipCompression {
    /// Store bytes as-is.
    Stored,
    /// Deflate.
    Deflated,
}

impl EnumZipCompression {
    pub(crate) fn to_method(self) -> CompressionMethod {
        match self {
            Self::Stored => CompressionMethod::Stored,
            Self::Deflated => CompressionMethod::Deflated,
        }
    }
}

/// Input options for [`crate::writer::compress_with_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecZipWriteOptions {
    /// Compression method of file entries.
    pub rule_compression: EnumZipCompression,
}

impl Default for SpecZipWriteOptions {
    fn default() -> Self {
        derive_default_zip_write_options()
    }
}

/// Counters for one compress or decompress run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportZip {
    /// File entries written or extracted.
    pub cnt_files: u64,
    /// Directory marker entries written or extracted.
    pub cnt_dirs: u64,
    /// Uncompressed bytes moved through file entries.
    pub n_bytes: u64,
}

impl ReportZip {
    pub(crate) fn add_file(&mut self, n_bytes: u64) {
        self.cnt_files += 1;
        self.n_bytes += n_bytes;
    }

    pub(crate) fn add_dir(&mut self) {
        self.cnt_dirs += 1;
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} files={} dirs={} bytes={}",
            self.cnt_files, self.cnt_dirs, self.n_bytes
        )
    }
}

impl fmt::Display for ReportZip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[ZIP]"))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Errors returned by [`crate::writer`] and [`crate::reader`].
#[derive(Debug, Error)]
pub enum ZipArchiveError {
    /// Empty source list, unusable source name or unsafe entry name.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Host IO failure while streaming entry content.
    #[error("{context} {}: {source}", .path.display())]
    Io {
        context: String,
        path: PathBuf,
        source: io::Error,
    },

    /// ZIP container failure (header, directory, format).
    #[error("{context} {}: {source}", .path.display())]
    Zip {
        context: String,
        path: PathBuf,
        source: ZipError,
    },

    /// Failure from a filesystem helper (stat, create, open).
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl ZipArchiveError {
    pub(crate) fn io(context: &str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            context: context.to_string(),
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn zip(context: &str, path: &Path, source: ZipError) -> Self {
        Self::Zip {
            context: context.to_string(),
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether this error means an input path does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Fs(e) => e.is_not_found(),
            Self::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ZipArchiveError>;

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{EnumZipCompression, ReportZip, SpecZipWriteOptions};

    #[test]
    fn default_write_options_deflate() {
        assert_eq!(
            SpecZipWriteOptions::default().rule_compression,
            EnumZipCompression::Deflated
        );
    }

    #[test]
    fn report_zip_accumulates_and_formats() {
        let mut report = ReportZip::default();
        report.add_file(10);
        report.add_file(5);
        report.add_dir();
        assert_eq!(report.to_string(), "[ZIP] files=2 dirs=1 bytes=15");
    }
}
