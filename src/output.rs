//! Output destination handling.
//!
//! Resolves where the collected text goes and opens it in overwrite or append
//! mode.

use crate::error::SweepError;
use chrono::{DateTime, TimeZone};
use std::fs::{self, File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// File name used when no output file is given, or when a directory is.
pub fn default_file_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("collected_files_{}.txt", now.format("%Y%m%d_%H%M%S"))
}

/// Resolves the file the run writes to.
///
/// * `None` gives a timestamped file in the current directory.
/// * An existing directory gives a timestamped file inside it.
/// * Anything else is used as-is, with missing parent directories created.
pub fn prepare_output_path<Tz>(
    requested: Option<&Path>,
    now: &DateTime<Tz>,
) -> Result<PathBuf, SweepError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let Some(requested) = requested else {
        let cwd = std::env::current_dir().map_err(|e| SweepError::io(".", e))?;
        return Ok(cwd.join(default_file_name(now)));
    };
    if requested.is_dir() {
        return Ok(requested.join(default_file_name(now)));
    }
    if let Some(parent) = requested.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| SweepError::output(requested, e))?;
        }
    }
    Ok(requested.to_path_buf())
}

/// An opened output file and whether the run is appending to it.
pub struct OutputTarget {
    pub path: PathBuf,
    pub writer: BufWriter<File>,
    pub appending: bool,
}

/// Opens `path` for writing.
///
/// Appending only happens when it was asked for and the file already exists;
/// otherwise the file is created or truncated.
pub fn open_output(path: &Path, append: bool) -> Result<OutputTarget, SweepError> {
    let appending = append && path.exists();
    let file = if appending {
        OpenOptions::new().append(true).open(path)
    } else {
        File::create(path)
    }
    .map_err(|e| SweepError::output(path, e))?;
    Ok(OutputTarget {
        path: path.to_path_buf(),
        writer: BufWriter::new(file),
        appending,
    })
}
