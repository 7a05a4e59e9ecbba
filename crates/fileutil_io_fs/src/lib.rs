//! `fileutil_io_fs` v1:
//! Filesystem convenience helpers.
//!
//! Modules:
//! - `conf`   : constants and default presets
//! - `spec`   : options/entry snapshots/errors
//! - `path`   : path string helpers
//! - `probe`  : single-path queries and thin OS wrappers
//! - `copy`   : single-file copy strategies and tree copy
//! - `report` : tree-copy report model
//! - `list`   : shallow and recursive directory listing
//! - `wait`   : polling stability waiter
//! - `util`   : shared helper functions

pub mod conf;
pub mod copy;
pub mod list;
pub mod path;
pub mod probe;
pub mod report;
pub mod spec;
mod util;
pub mod wait;

pub use copy::{
    copy_file, copy_file_buffered, copy_file_read_whole, copy_file_stream, copy_tree,
    copy_tree_with_options,
};
pub use list::{list_dir, walk_dir};
pub use path::{is_nested_within, join_path, replace_path_ext};
pub use probe::{
    create_file, get_file_mod_time, get_file_size, is_dir, is_existed, is_file, make_dir,
    read_file, remove_all, remove_file, rename_file, set_file_mod_time, stat_entry,
    write_data_to_file, write_json_to_file,
};
pub use report::{ReportCopy, ReportCopyBuilder};
pub use spec::{
    EnumCopyFileStrategy, FsError, Result, SpecCopyFileOptions, SpecFileEntry, SpecWaitOptions,
};
pub use wait::{
    Clock, SystemClock, check_file_existed, wait_for_stable_file, wait_for_stable_file_with,
};
