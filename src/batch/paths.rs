//! Typed paths into a batch directory layout.
use std::path::{Path, PathBuf};

/// Convenience wrapper for locating batch artifacts.
#[derive(Debug, Clone)]
pub struct BatchPaths {
    root: PathBuf,
}

impl BatchPaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Return the batch root used for path derivation.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the `batch/` directory path.
    pub fn batch_dir(&self) -> PathBuf {
        self.root.join("batch")
    }

    /// Return the `batch/config.json` path.
    pub fn config_path(&self) -> PathBuf {
        self.batch_dir().join("config.json")
    }

    /// Return the `batch/records.json` path.
    pub fn records_path(&self) -> PathBuf {
        self.batch_dir().join("records.json")
    }

    /// Return the `batch/report.json` path.
    pub fn report_path(&self) -> PathBuf {
        self.batch_dir().join("report.json")
    }

    /// Return the `batch/history.jsonl` path.
    pub fn history_path(&self) -> PathBuf {
        self.batch_dir().join("history.jsonl")
    }
}
