//! Filesystem helper constants and default presets.

use std::time::Duration;

/// Buffer size used by the buffered copy strategy when the caller passes `0`.
pub const N_SIZE_BUFFER_COPY_DEFAULT: usize = 1024 * 1024;

/// Sleep between two polls of the stability waiter.
pub const DURATION_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Quiet interval used by [`crate::wait::check_file_existed`].
pub const DURATION_QUIET_DEFAULT: Duration = Duration::from_secs(2);

/// Overall deadline of a default [`crate::spec::SpecWaitOptions`].
pub const DURATION_WAIT_TIMEOUT_DEFAULT: Duration = Duration::from_secs(60);

/// Mode passed to recursive directory creation (umask still applies).
pub const N_MODE_DIR_CREATE: u32 = 0o777;

/// Resolve a requested copy buffer size, falling back to the default for `0`.
pub fn derive_buffer_size(size_buffer: usize) -> usize {
    if size_buffer == 0 {
        return N_SIZE_BUFFER_COPY_DEFAULT;
    }
    size_buffer
}
