//! Command-line interface for textsweep.
//!
//! Collects the text files under the given inputs into one output file and
//! prints a summary of what was written and skipped.

use chrono::Local;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::process::exit;
use textsweep::output::{open_output, prepare_output_path};
use textsweep::{
    Aggregator, BinaryDetection, Collector, PathStyle, SizeLimit, Summary, SweepBuilder,
    SweepOptions,
};
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: i32 = 1;
const EXIT_DISCOVERY: i32 = 2;
const EXIT_OUTPUT: i32 = 3;

/// textsweep — collect text files into a single output file
#[derive(Parser)]
#[command(name = "textsweep", version, about, long_about = None)]
struct Cli {
    /// Input file(s) and/or directory(ies)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file path; a directory gets a timestamped file inside it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory levels to descend (0 = root files only, unlimited if not set)
    #[arg(long, visible_alias = "scale")]
    depth: Option<usize>,

    /// Include hidden files and directories
    #[arg(long)]
    include_hidden: bool,

    /// Follow symbolic links
    #[arg(long)]
    follow_symlinks: bool,

    /// Honour .gitignore files
    #[arg(long)]
    gitignore: bool,

    /// Only collect files matching these globs (can be repeated)
    #[arg(short = 'i', long = "include")]
    include_patterns: Vec<String>,

    /// Skip files and directories matching these globs (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Maximum file size in MB; 0 disables the limit
    #[arg(long, default_value_t = 200.0)]
    max_size: f64,

    /// Binary detection strategy
    #[arg(long, default_value = "heuristic", value_parser = parse_binary_detection)]
    binary_detection: BinaryDetection,

    /// Write absolute paths in the delimiter lines
    #[arg(long)]
    absolute_paths: bool,

    /// Append to the output file if it exists
    #[arg(long)]
    append: bool,

    /// List the encoding detected for each file in the summary
    #[arg(long)]
    encoding_report: bool,

    /// Summary format
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    summary: SummaryFormat,

    /// Worker threads used to classify files
    #[arg(long)]
    workers: Option<usize>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print discovery decisions and the files that would be processed, then exit
    #[arg(long)]
    debug_discovery: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SummaryFormat {
    Text,
    Json,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "heuristic" => Ok(BinaryDetection::Heuristic),
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

struct RunSettings {
    output: Option<PathBuf>,
    append: bool,
    encoding_report: bool,
    summary: SummaryFormat,
    workers: Option<usize>,
    progress: bool,
    verbose: bool,
    debug_discovery: bool,
}

impl Cli {
    fn into_options(self) -> (SweepOptions, RunSettings) {
        let mut builder = SweepBuilder::with_inputs(self.inputs)
            .include_hidden(self.include_hidden)
            .follow_links(self.follow_symlinks)
            .respect_gitignore(self.gitignore)
            .include_patterns(self.include_patterns)
            .ignore_patterns(self.ignore_patterns)
            .max_file_size(SizeLimit::from_megabytes(self.max_size))
            .binary_detection(self.binary_detection)
            .path_style(if self.absolute_paths {
                PathStyle::Absolute
            } else {
                PathStyle::Relative
            });

        builder = if let Some(depth) = self.depth {
            builder.max_depth(depth)
        } else {
            builder.no_limit_depth()
        };

        (
            builder.build(),
            RunSettings {
                output: self.output,
                append: self.append,
                encoding_report: self.encoding_report,
                summary: self.summary,
                workers: self.workers,
                progress: !self.no_progress,
                verbose: self.verbose,
                debug_discovery: self.debug_discovery,
            },
        )
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "textsweep=debug"
    } else {
        "textsweep=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "parallel")]
fn configure_workers(workers: Option<usize>) {
    if let Some(n) = workers {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
        {
            eprintln!("Warning: Failed to set thread pool size: {}", e);
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn configure_workers(_workers: Option<usize>) {}

fn new_progress_bar(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.green/white}] {pos}/{len} ({percent}%) {elapsed_precise}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.set_prefix("Collecting files");
    progress
}

fn main() {
    let cli = Cli::parse();
    let (mut options, settings) = cli.into_options();

    init_tracing(settings.verbose || settings.debug_discovery);
    configure_workers(settings.workers);

    if settings.debug_discovery {
        run_debug_discovery(options);
        return;
    }

    let now = Local::now();
    let out_path = match prepare_output_path(settings.output.as_deref(), &now) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("{}", e);
            exit(EXIT_OUTPUT);
        }
    };
    options.exclude.push(out_path.clone());

    let progress = new_progress_bar(settings.progress);
    let collector = Collector::new(options).with_progress(progress.clone());
    let discovery = match collector.discover() {
        Ok(discovery) => discovery,
        Err(e) => {
            eprintln!("Failed during discovery: {}", e);
            exit(EXIT_DISCOVERY);
        }
    };

    if discovery.files.is_empty() {
        println!("No files found to process. Exiting.");
        return;
    }

    let target = match open_output(&out_path, settings.append) {
        Ok(target) => target,
        Err(e) => {
            eprintln!("{}", e);
            exit(EXIT_OUTPUT);
        }
    };

    let mut aggregator = Aggregator::new(target.writer, collector.options().path_style);
    if !target.appending {
        if let Err(e) = aggregator.write_banner(&now) {
            eprintln!("Error: {}", e);
            exit(EXIT_FAILURE);
        }
    }
    let result = collector.run(&discovery, &mut aggregator);
    progress.finish_and_clear();
    drop(aggregator);

    match result {
        Ok(summary) => print_summary(&summary, &target.path, &settings),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(EXIT_FAILURE);
        }
    }
}

fn run_debug_discovery(options: SweepOptions) {
    println!("Running discovery in debug mode...");
    match Collector::new(options).discover() {
        Ok(discovery) => {
            for file in &discovery.files {
                println!(" WOULD-PROCESS: {}", file.path.display());
            }
            println!("Debug discovery finished.");
        }
        Err(e) => {
            eprintln!("Failed during discovery: {}", e);
            exit(EXIT_DISCOVERY);
        }
    }
}

fn print_summary(summary: &Summary, out_path: &std::path::Path, settings: &RunSettings) {
    match settings.summary {
        SummaryFormat::Text => {
            let size = fs::metadata(out_path).ok().map(|m| m.len());
            println!();
            print!(
                "{}",
                summary.render_text(Some((out_path, size)), settings.encoding_report)
            );
            println!("\nDone.");
        }
        SummaryFormat::Json => match summary.render_json(true) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("JSON serialization error: {}", e);
                exit(EXIT_FAILURE);
            }
        },
    }
}
