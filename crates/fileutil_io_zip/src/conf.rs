//! Archive constants and default presets.

use crate::spec::{EnumZipCompression, SpecZipWriteOptions};

/// Entry-name separator inside the archive, independent of the host.
pub const C_SEP_ENTRY: char = '/';

/// Size from which an entry needs ZIP64 headers.
pub const N_SIZE_ZIP64_THRESHOLD: u64 = 0xFFFF_FFFF;

/// Build default write options (deflate).
pub fn derive_default_zip_write_options() -> SpecZipWriteOptions {
    SpecZipWriteOptions {
        rule_compression: EnumZipCompression::Deflated,
    }
}
