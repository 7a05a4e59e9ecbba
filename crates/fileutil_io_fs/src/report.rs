//! Tree-copy report model and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

/// Aggregate counters for one `copy_tree` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportCopy {
    /// Number of visited entries below the source root.
    pub cnt_scanned: u64,
    /// Number of destination directories created.
    pub cnt_dirs_created: u64,
    /// Number of files copied.
    pub cnt_files_copied: u64,
    /// Total bytes written to destination files.
    pub n_bytes_copied: u64,
}

impl ReportCopy {
    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_scanned".to_string(), self.cnt_scanned);
        dict_counts.insert("cnt_dirs_created".to_string(), self.cnt_dirs_created);
        dict_counts.insert("cnt_files_copied".to_string(), self.cnt_files_copied);
        dict_counts.insert("n_bytes_copied".to_string(), self.n_bytes_copied);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} scanned={} dirs={} files={} bytes={}",
            self.cnt_scanned, self.cnt_dirs_created, self.cnt_files_copied, self.n_bytes_copied
        )
    }
}

impl fmt::Display for ReportCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[COPY]"))
    }
}

/// Mutable accumulator for copy statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportCopyBuilder {
    cnt_scanned: u64,
    cnt_dirs_created: u64,
    cnt_files_copied: u64,
    n_bytes_copied: u64,
}

impl ReportCopyBuilder {
    /// Increment scanned count by one.
    pub fn add_scanned(&mut self) {
        self.cnt_scanned += 1;
    }

    /// Increment created-directory count by one.
    pub fn add_dir_created(&mut self) {
        self.cnt_dirs_created += 1;
    }

    /// Record one copied file of `n_bytes` bytes.
    pub fn add_file_copied(&mut self, n_bytes: u64) {
        self.cnt_files_copied += 1;
        self.n_bytes_copied += n_bytes;
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportCopy {
        ReportCopy {
            cnt_scanned: self.cnt_scanned,
            cnt_dirs_created: self.cnt_dirs_created,
            cnt_files_copied: self.cnt_files_copied,
            n_bytes_copied: self.n_bytes_copied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReportCopyBuilder;

    #[test]
    fn report_copy_builder_accumulates_and_formats() {
        let mut builder_cp_report = ReportCopyBuilder::default();
        builder_cp_report.add_scanned();
        builder_cp_report.add_scanned();
        builder_cp_report.add_scanned();
        builder_cp_report.add_dir_created();
        builder_cp_report.add_file_copied(100);
        builder_cp_report.add_file_copied(28);
        let report = builder_cp_report.build();

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_scanned"], 3);
        assert_eq!(dict_counts["cnt_dirs_created"], 1);
        assert_eq!(dict_counts["cnt_files_copied"], 2);
        assert_eq!(dict_counts["n_bytes_copied"], 128);

        let txt = report.format("[COPY]");
        assert_eq!(txt, "[COPY] scanned=3 dirs=1 files=2 bytes=128");
        assert_eq!(report.to_string(), txt);
    }
}
