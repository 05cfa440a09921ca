//! Size gate applied before a file is ever opened.

/// Default upper bound on collected file size: 200 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 200 * 1024 * 1024;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Conversions for the size limits accepted on the command line.
pub struct SizeLimit;

impl SizeLimit {
    /// Converts a megabyte value into a byte limit.
    ///
    /// Zero, negative and non-finite values disable the gate.
    pub fn from_megabytes(megabytes: f64) -> Option<u64> {
        if !megabytes.is_finite() || megabytes <= 0.0 {
            return None;
        }
        Some((megabytes * BYTES_PER_MEGABYTE) as u64)
    }
}

/// Outcome of checking a file length against the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admit,
    TooLarge { size: u64, limit: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeGate {
    limit: Option<u64>,
}

impl SizeGate {
    pub fn new(limit: Option<u64>) -> Self {
        Self { limit }
    }

    /// Rejects only files strictly larger than the limit.
    pub fn check(&self, size: u64) -> Admission {
        match self.limit {
            Some(limit) if size > limit => Admission::TooLarge { size, limit },
            _ => Admission::Admit,
        }
    }
}
