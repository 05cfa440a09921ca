use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identity used to avoid collecting the same file twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeenKey {
    Inode { dev: u64, ino: u64 },
    Path(PathBuf),
}

/// A file found by the walker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredFile {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Input root name joined with the path below that root.
    pub relative: PathBuf,
    pub key: SeenKey,
}

/// Everything the walker produced for a set of inputs.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Discovery {
    pub files: Vec<DiscoveredFile>,
    /// Inputs that did not exist and were skipped.
    pub missing: Vec<PathBuf>,
    /// Entries the walker could not read.
    pub walk_errors: usize,
}

/// Why a discovered file did not make it into the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    Binary,
    TooLarge { size: u64, limit: u64 },
    Error { message: String },
}

/// Final state of a single discovered file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Written {
        path: PathBuf,
        encoding: String,
        bytes: u64,
    },
    Skipped {
        path: PathBuf,
        reason: SkipReason,
    },
}
