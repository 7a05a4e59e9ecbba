//! `fileutil_io_zip` v1:
//! ZIP packer/unpacker for directory trees.
//!
//! Modules:
//! - `conf`   : constants and default presets
//! - `spec`   : options/report/errors
//! - `writer` : tree-to-archive packer
//! - `reader` : archive-to-tree unpacker
//! - `util`   : entry-name helpers
pub mod conf;
pub mod reader;
pub mod spec;
mod util;
pub mod writer;

pub use conf::derive_default_zip_write_options;
pub use reader::decompress;
pub use spec::{EnumZipCompression, ReportZip, Result, SpecZipWriteOptions, ZipArchiveError};
pub use writer::{compress, compress_with_options};
