//! Option models, entry snapshots and top-level error types.

use std::fs::Permissions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};

use thiserror::Error;

use crate::conf::{
    DURATION_POLL_INTERVAL, DURATION_QUIET_DEFAULT, DURATION_WAIT_TIMEOUT_DEFAULT,
    N_SIZE_BUFFER_COPY_DEFAULT,
};

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Single-file copy strategy.
///
/// All strategies produce the same destination bytes and permission bits;
/// they only differ in how data moves through memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumCopyFileStrategy {
    /// Read the whole source into memory, then write it out.
    ReadWhole,
    /// Stream with `std::io::copy`.
    #[default]
    Stream,
    /// Loop over a fixed-size intermediate buffer.
    Buffered,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndOptions

/// Input options for [`crate::copy::copy_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCopyFileOptions {
    /// Copy strategy.
    pub rule_strategy: EnumCopyFileStrategy,
    /// Buffer size for [`EnumCopyFileStrategy::Buffered`]; `0` means default (1 MiB).
    pub size_buffer: usize,
}

impl Default for SpecCopyFileOptions {
    fn default() -> Self {
        Self {
            rule_strategy: EnumCopyFileStrategy::Stream,
            size_buffer: N_SIZE_BUFFER_COPY_DEFAULT,
        }
    }
}

/// Input options for [`crate::wait::wait_for_stable_file_with`].
#[derive(Debug, Clone)]
pub struct SpecWaitOptions {
    /// Overall deadline measured from the first poll.
    pub timeout: Duration,
    /// Minimum age of the modification time for a file to count as stable.
    pub interval_quiet: Duration,
    /// Sleep between two polls.
    pub interval_poll: Duration,
    /// Optional external cancel flag, checked once per poll.
    pub flag_cancel: Option<Arc<AtomicBool>>,
}

impl SpecWaitOptions {
    /// Whether the external cancel flag has been raised.
    pub fn is_cancelled(&self) -> bool {
        self.flag_cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

impl Default for SpecWaitOptions {
    fn default() -> Self {
        Self {
            timeout: DURATION_WAIT_TIMEOUT_DEFAULT,
            interval_quiet: DURATION_QUIET_DEFAULT,
            interval_poll: DURATION_POLL_INTERVAL,
            flag_cancel: None,
        }
    }
}

/// Point-in-time snapshot of one filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFileEntry {
    /// Path the snapshot was taken from.
    pub path: PathBuf,
    /// Whether the entry is a directory (symlinks are followed).
    pub if_is_dir: bool,
    /// Size in bytes.
    pub size: u64,
    /// Permission bits.
    pub permissions: Permissions,
    /// Last modification time.
    pub time_modified: SystemTime,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Errors returned by every helper in this crate.
#[derive(Debug, Error)]
pub enum FsError {
    /// Bad or missing path, empty input list, equal source/destination.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The path does not exist.
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Host IO failure with a short context prefix.
    #[error("{context} {}: {source}", .path.display())]
    Io {
        context: String,
        path: PathBuf,
        source: io::Error,
    },

    /// Directory walk failure.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Suffix filter could not be compiled.
    #[error("Invalid suffix filter: {0}")]
    Pattern(String),

    /// JSON encoding failure.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Stability waiter deadline exceeded.
    #[error("Timed out after {timeout:?} waiting for a stable file among {paths:?}")]
    Timeout {
        timeout: Duration,
        paths: Vec<PathBuf>,
    },

    /// Stability waiter cancelled through its cancel flag.
    #[error("Wait for stable file cancelled")]
    Cancelled,
}

impl FsError {
    /// Wrap a host error with context and the offending path.
    pub fn io(context: &str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            context: context.to_string(),
            path: path.to_path_buf(),
            source,
        }
    }

    /// Like [`FsError::io`], but a host "not found" becomes [`FsError::NotFound`].
    pub fn io_or_not_found(context: &str, path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            return Self::NotFound(path.to_path_buf());
        }
        Self::io(context, path, source)
    }

    /// Whether this error means the path does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            Self::Walk(e) => e
                .io_error()
                .is_some_and(|e| e.kind() == io::ErrorKind::NotFound),
            _ => false,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FsError>;

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::Path;

    use super::{EnumCopyFileStrategy, FsError, SpecCopyFileOptions, SpecWaitOptions};

    #[test]
    fn io_or_not_found_maps_missing_path() {
        let err = FsError::io_or_not_found(
            "stat file info error",
            Path::new("/nope"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(matches!(err, FsError::NotFound(_)));
        assert!(err.is_not_found());

        let err = FsError::io_or_not_found(
            "stat file info error",
            Path::new("/nope"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, FsError::Io { .. }));
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("stat file info error /nope"));
    }

    #[test]
    fn default_options_are_stream_and_not_cancelled() {
        let spec_cp_options = SpecCopyFileOptions::default();
        assert_eq!(spec_cp_options.rule_strategy, EnumCopyFileStrategy::Stream);
        assert!(!SpecWaitOptions::default().is_cancelled());
    }
}
