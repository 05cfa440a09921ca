use crate::size::DEFAULT_MAX_FILE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
/// Strategy used to decide whether a sampled file is binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BinaryDetection {
    /// Null byte or more than 30% non-text bytes in the first 1 KiB.
    #[default]
    Heuristic,
    /// Null byte anywhere in the sample.
    Simple,
    /// `content_inspector` classification.
    Accurate,
    /// Treat every file as text.
    None,
}
/// How file paths are rendered in the delimiter line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathStyle {
    /// Input root name joined with the path below it, `/` separated.
    #[default]
    Relative,
    /// Absolute path on disk.
    Absolute,
}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepOptions {
    pub inputs: Vec<PathBuf>,
    pub max_depth: Option<usize>,
    pub include_hidden: bool,
    pub follow_links: bool,
    pub respect_gitignore: bool,
    pub include_patterns: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub max_file_size: Option<u64>,
    pub binary_detection: BinaryDetection,
    pub path_style: PathStyle,
    pub exclude: Vec<PathBuf>,
}
impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            inputs: vec![PathBuf::from(".")],
            max_depth: None,
            include_hidden: false,
            follow_links: false,
            respect_gitignore: false,
            include_patterns: Vec::new(),
            ignore_patterns: Vec::new(),
            max_file_size: Some(DEFAULT_MAX_FILE_SIZE),
            binary_detection: BinaryDetection::Heuristic,
            path_style: PathStyle::Relative,
            exclude: Vec::new(),
        }
    }
}
#[derive(Debug, Default)]
pub struct SweepBuilder {
    options: SweepOptions,
}
impl SweepBuilder {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            options: SweepOptions {
                inputs: vec![input.into()],
                ..Default::default()
            },
        }
    }
    pub fn with_inputs<I, P>(inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            options: SweepOptions {
                inputs: inputs.into_iter().map(Into::into).collect(),
                ..Default::default()
            },
        }
    }
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.inputs.push(path.into());
        self
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }
    pub fn no_limit_depth(mut self) -> Self {
        self.options.max_depth = None;
        self
    }
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.options.include_hidden = yes;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.options.respect_gitignore = yes;
        self
    }
    pub fn include_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.include_patterns = patterns;
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn max_file_size(mut self, limit: Option<u64>) -> Self {
        self.options.max_file_size = limit;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn path_style(mut self, style: PathStyle) -> Self {
        self.options.path_style = style;
        self
    }
    pub fn exclude(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.exclude.push(path.into());
        self
    }
    pub fn build(self) -> SweepOptions {
        self.options
    }
}
