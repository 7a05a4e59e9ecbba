//! Poll-based "wait until a file is stable" helper.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use log::{debug, trace};

use crate::conf::DURATION_QUIET_DEFAULT;
use crate::probe::stat_entry;
use crate::spec::{FsError, Result, SpecWaitOptions};

/// Time source and sleeper used by the waiter.
///
/// The wall clock is only compared against file modification times. The
/// deadline runs on the monotonic clock, so wall-clock steps cannot stretch
/// or shorten it.
pub trait Clock {
    /// Current wall-clock time.
    fn now(&self) -> SystemTime;
    /// Current monotonic time.
    fn instant(&self) -> Instant;
    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// [`Clock`] backed by the host clock and `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Wait until one of `paths` exists and has not been modified for `interval_quiet`.
///
/// Candidates are checked in input order on every poll and the first stable
/// one wins. Fails with [`FsError::Timeout`] once `timeout` has elapsed.
pub fn wait_for_stable_file<P: AsRef<Path>>(
    paths: &[P],
    timeout: Duration,
    interval_quiet: Duration,
) -> Result<PathBuf> {
    let spec_wait_options = SpecWaitOptions {
        timeout,
        interval_quiet,
        ..SpecWaitOptions::default()
    };
    wait_for_stable_file_with(paths, &spec_wait_options, &SystemClock)
}

/// Single-file variant of [`wait_for_stable_file`] with the default quiet interval (2 s).
pub fn check_file_existed<P: AsRef<Path>>(path: P, timeout: Duration) -> Result<()> {
    wait_for_stable_file(&[path], timeout, DURATION_QUIET_DEFAULT).map(|_| ())
}

/// General form of [`wait_for_stable_file`] with explicit options and clock.
///
/// Empty candidate paths are ignored; at least one non-empty path is
/// required. The cancel flag in `spec_wait_options` is checked once per
/// poll and yields [`FsError::Cancelled`].
pub fn wait_for_stable_file_with<P, C>(
    paths: &[P],
    spec_wait_options: &SpecWaitOptions,
    clock: &C,
) -> Result<PathBuf>
where
    P: AsRef<Path>,
    C: Clock + ?Sized,
{
    let l_candidates: Vec<&Path> = paths
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.as_os_str().is_empty())
        .collect();
    if l_candidates.is_empty() {
        return Err(FsError::InvalidArgument("no valid file path".to_string()));
    }

    let instant_start = clock.instant();
    let mut n_polls: u64 = 0;
    loop {
        if spec_wait_options.is_cancelled() {
            return Err(FsError::Cancelled);
        }

        n_polls += 1;
        let time_now = clock.now();
        for path_candidate in &l_candidates {
            if is_quiet(path_candidate, time_now, spec_wait_options.interval_quiet) {
                debug!(
                    "Stable file {} found after {n_polls} poll(s)",
                    path_candidate.display()
                );
                return Ok(path_candidate.to_path_buf());
            }
        }

        let duration_elapsed = clock.instant().saturating_duration_since(instant_start);
        trace!("No stable file yet (poll {n_polls}, elapsed {duration_elapsed:?})");
        if duration_elapsed > spec_wait_options.timeout {
            return Err(FsError::Timeout {
                timeout: spec_wait_options.timeout,
                paths: l_candidates.iter().map(|p| p.to_path_buf()).collect(),
            });
        }
        clock.sleep(spec_wait_options.interval_poll);
    }
}

/// A modification time in the future never counts as quiet.
fn is_quiet(path: &Path, time_now: SystemTime, interval_quiet: Duration) -> bool {
    let Ok(spec_entry) = stat_entry(path) else {
        return false;
    };
    time_now
        .duration_since(spec_entry.time_modified)
        .is_ok_and(|age| age > interval_quiet)
}
