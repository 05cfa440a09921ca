//! # Textsweep
//!
//! `textsweep` walks one or more files and directory trees, decides for every
//! file whether it is text or binary, and concatenates the text files into a
//! single output stream. Each file is introduced by a delimiter line and its
//! path:
//!
//! ```text
//!
//!
//! ----
//! project/src/main.rs
//! fn main() {}
//! ```
//!
//! Binary files and files above the size limit are skipped and counted in the
//! returned [`Summary`]. Text is decoded from UTF-8, UTF-16 (with BOM) or
//! Windows-1252 and always written as UTF-8.
//!
//! # Features
//!
//! - `parallel` (default): classifies files on the Rayon thread pool. Output
//!   order is unaffected.
//!
//! # Example
//!
//! ```no_run
//! use textsweep::{BinaryDetection, SweepBuilder, sweep};
//!
//! let options = SweepBuilder::new("src")
//!     .include_hidden(false)
//!     .binary_detection(BinaryDetection::Heuristic)
//!     .max_file_size(Some(10 * 1024 * 1024)) // 10 MB
//!     .build();
//!
//! let mut out: Vec<u8> = Vec::new();
//! let summary = sweep(options, &mut out).expect("Failed to collect files");
//! println!("{} files written", summary.processed);
//! ```

pub mod aggregate;
pub mod decode;
mod engine;
mod error;
mod options;
pub mod output;
pub mod report;
pub mod size;
pub mod sniff;
mod types;
mod walk;

pub use aggregate::Aggregator;
pub use engine::{Collector, sweep};
pub use error::SweepError;
pub use options::{BinaryDetection, PathStyle, SweepBuilder, SweepOptions};
pub use report::{Summary, human_size};
pub use size::SizeLimit;
pub use types::{DiscoveredFile, Discovery, FileOutcome, SeenKey, SkipReason};
pub use walk::discover;
