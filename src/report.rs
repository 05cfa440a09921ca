//! Run summary and its human and JSON renderings.

use crate::error::SweepError;
use crate::types::{Discovery, FileOutcome, SkipReason};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Encodings listed before the report collapses the rest into a count.
pub const ENCODING_REPORT_LIMIT: usize = 10;

/// Formats a byte count as `{:.1}` followed by a 1024-based unit.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut n = bytes as f64;
    for unit in UNITS {
        if n < 1024.0 {
            return format!("{:.1}{}", n, unit);
        }
        n /= 1024.0;
    }
    format!("{:.1}PB", n)
}

/// Counters and per-file outcomes for one collection run.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub files_discovered: usize,
    pub processed: usize,
    pub skipped_binary: usize,
    pub skipped_large: usize,
    pub errors: usize,
    pub bytes_written: u64,
    pub missing_inputs: Vec<PathBuf>,
    pub walk_errors: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl Summary {
    pub fn new(discovery: &Discovery) -> Self {
        Self {
            files_discovered: discovery.files.len(),
            missing_inputs: discovery.missing.clone(),
            walk_errors: discovery.walk_errors,
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: FileOutcome) {
        match &outcome {
            FileOutcome::Written { .. } => self.processed += 1,
            FileOutcome::Skipped { reason, .. } => match reason {
                SkipReason::Binary => self.skipped_binary += 1,
                SkipReason::TooLarge { .. } => self.skipped_large += 1,
                SkipReason::Error { .. } => self.errors += 1,
            },
        }
        self.outcomes.push(outcome);
    }

    /// `(path, encoding label)` for every written file, in output order.
    pub fn encodings(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FileOutcome::Written { path, encoding, .. } => {
                Some((path.as_path(), encoding.as_str()))
            }
            FileOutcome::Skipped { .. } => None,
        })
    }

    /// Plain-text report; zero skip and error counters are left out.
    pub fn render_text(&self, output: Option<(&Path, Option<u64>)>, encoding_report: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Summary:");
        let _ = writeln!(out, "  Files discovered: {}", self.files_discovered);
        let _ = writeln!(out, "  Files processed:  {}", self.processed);
        if self.skipped_binary > 0 {
            let _ = writeln!(out, "  Skipped (binary-like): {}", self.skipped_binary);
        }
        if self.skipped_large > 0 {
            let _ = writeln!(out, "  Skipped (too large): {}", self.skipped_large);
        }
        if self.errors > 0 {
            let _ = writeln!(out, "  Errors: {}", self.errors);
        }
        if !self.missing_inputs.is_empty() {
            let _ = writeln!(out, "  Missing inputs: {}", self.missing_inputs.len());
        }
        if self.walk_errors > 0 {
            let _ = writeln!(out, "  Walk errors: {}", self.walk_errors);
        }
        match output {
            Some((path, Some(size))) => {
                let _ = writeln!(
                    out,
                    "  Output file: {}  (size: {})",
                    path.display(),
                    human_size(size)
                );
            }
            Some((path, None)) => {
                let _ = writeln!(out, "  Output file: {}", path.display());
            }
            None => {}
        }
        if encoding_report {
            let encodings: Vec<_> = self.encodings().collect();
            if !encodings.is_empty() {
                let _ = writeln!(out, "\nEncodings detected (sample):");
                for (path, label) in encodings.iter().take(ENCODING_REPORT_LIMIT) {
                    let _ = writeln!(out, "  {} -> {}", path.display(), label);
                }
                if encodings.len() > ENCODING_REPORT_LIMIT {
                    let _ = writeln!(
                        out,
                        "  ... and {} more",
                        encodings.len() - ENCODING_REPORT_LIMIT
                    );
                }
            }
        }
        out
    }

    pub fn render_json(&self, pretty: bool) -> Result<String, SweepError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
