use crate::aggregate::Aggregator;
use crate::decode::{self, DetectedEncoding};
use crate::error::SweepError;
use crate::options::{BinaryDetection, SweepOptions};
use crate::report::Summary;
use crate::size::{Admission, SizeGate};
use crate::sniff;
use crate::types::{DiscoveredFile, Discovery, FileOutcome, SkipReason};
use crate::walk;
use chrono::Local;
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use tracing::{debug, warn};
enum Verdict {
    Text(DetectedEncoding),
    Skip(SkipReason),
}
/// Size gate first, then the sniffer; oversized files are never opened.
fn classify(file: &DiscoveredFile, gate: SizeGate, method: BinaryDetection) -> Verdict {
    if let Ok(metadata) = fs::metadata(&file.path) {
        if let Admission::TooLarge { size, limit } = gate.check(metadata.len()) {
            debug!("Skipped (too large {} > {}): {}", size, limit, file.path.display());
            return Verdict::Skip(SkipReason::TooLarge { size, limit });
        }
    }
    let sample = match sniff::read_sample(&file.path) {
        Ok(sample) => sample,
        Err(e) => {
            warn!("Error reading (sample) {}: {}", file.path.display(), e);
            return Verdict::Skip(SkipReason::Error {
                message: e.to_string(),
            });
        }
    };
    if sniff::is_binary(&sample, method) {
        debug!("Skipped (binary-like): {}", file.path.display());
        return Verdict::Skip(SkipReason::Binary);
    }
    Verdict::Text(decode::detect_encoding(&sample))
}
#[cfg(not(feature = "parallel"))]
fn classify_all(files: &[DiscoveredFile], options: &SweepOptions) -> Vec<Verdict> {
    let gate = SizeGate::new(options.max_file_size);
    files
        .iter()
        .map(|file| classify(file, gate, options.binary_detection))
        .collect()
}
#[cfg(feature = "parallel")]
fn classify_all(files: &[DiscoveredFile], options: &SweepOptions) -> Vec<Verdict> {
    let gate = SizeGate::new(options.max_file_size);
    files
        .par_iter()
        .map(|file| classify(file, gate, options.binary_detection))
        .collect()
}
/// Runs discovery and aggregation for one set of options.
pub struct Collector {
    options: SweepOptions,
    progress: ProgressBar,
}
impl Collector {
    pub fn new(options: SweepOptions) -> Self {
        Self {
            options,
            progress: ProgressBar::hidden(),
        }
    }
    /// Reports one tick per processed file on `progress`.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }
    pub fn options(&self) -> &SweepOptions {
        &self.options
    }
    pub fn discover(&self) -> Result<Discovery, SweepError> {
        debug!("Starting discovery over {} input(s)", self.options.inputs.len());
        walk::discover(&self.options)
    }
    /// Classifies every discovered file, then writes the text ones in
    /// discovery order.
    ///
    /// Per-file failures are counted on the returned [`Summary`] and never
    /// abort the run.
    pub fn run<W: Write>(
        &self,
        discovery: &Discovery,
        aggregator: &mut Aggregator<W>,
    ) -> Result<Summary, SweepError> {
        let mut summary = Summary::new(discovery);
        self.progress.set_length(discovery.files.len() as u64);
        let verdicts = classify_all(&discovery.files, &self.options);
        for (file, verdict) in discovery.files.iter().zip(verdicts) {
            let outcome = match verdict {
                Verdict::Skip(reason) => FileOutcome::Skipped {
                    path: file.path.clone(),
                    reason,
                },
                Verdict::Text(encoding) => match aggregator.append(file, encoding) {
                    Ok(decoded) => FileOutcome::Written {
                        path: file.path.clone(),
                        encoding: decoded.label,
                        bytes: decoded.bytes_written,
                    },
                    Err(e) => {
                        warn!("Error processing {}: {}", file.path.display(), e);
                        FileOutcome::Skipped {
                            path: file.path.clone(),
                            reason: SkipReason::Error {
                                message: e.to_string(),
                            },
                        }
                    }
                },
            };
            summary.record(outcome);
            self.progress.inc(1);
        }
        aggregator.flush()?;
        summary.bytes_written = aggregator.bytes_written();
        Ok(summary)
    }
}
/// Collects everything `options` names into `out`, banner first.
///
/// # Errors
///
/// Fails on invalid glob patterns or when the banner or final flush cannot be
/// written. Unreadable files are reported in the [`Summary`] instead.
pub fn sweep<W: Write>(options: SweepOptions, out: W) -> Result<Summary, SweepError> {
    let collector = Collector::new(options);
    let discovery = collector.discover()?;
    let mut aggregator = Aggregator::new(out, collector.options().path_style);
    aggregator.write_banner(&Local::now())?;
    collector.run(&discovery, &mut aggregator)
}
