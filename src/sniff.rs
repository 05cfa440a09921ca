//! Text/binary classification from a file's leading bytes.

use crate::error::SweepError;
use crate::options::BinaryDetection;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes read from every candidate file.
pub const SAMPLE_SIZE: usize = 8192;
/// Prefix of the sample the heuristic actually inspects.
pub const SNIFF_WINDOW: usize = 1024;
/// Share of non-text bytes above which a window counts as binary.
pub const NONTEXT_RATIO: f64 = 0.30;

const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// BEL, BS, TAB, LF, FF, CR, ESC plus everything from space upwards.
fn is_text_byte(b: u8) -> bool {
    matches!(b, 0x07 | 0x08 | 0x09 | 0x0A | 0x0C | 0x0D | 0x1B) || b >= 0x20
}

fn has_utf16_bom(sample: &[u8]) -> bool {
    sample.starts_with(&UTF16_LE_BOM) || sample.starts_with(&UTF16_BE_BOM)
}

/// Null-byte and non-text-ratio heuristic over the first [`SNIFF_WINDOW`] bytes.
pub fn looks_binary(data: &[u8]) -> bool {
    if data.is_empty() {
        return false;
    }
    let window = &data[..data.len().min(SNIFF_WINDOW)];
    if window.contains(&0) {
        return true;
    }
    let nontext = window.iter().filter(|&&b| !is_text_byte(b)).count();
    nontext as f64 / window.len() as f64 > NONTEXT_RATIO
}

/// Classifies a sample with the requested strategy.
pub fn is_binary(sample: &[u8], method: BinaryDetection) -> bool {
    match method {
        BinaryDetection::Heuristic => !has_utf16_bom(sample) && looks_binary(sample),
        BinaryDetection::Simple => sample.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(sample).is_binary(),
        BinaryDetection::None => false,
    }
}

/// Reads up to [`SAMPLE_SIZE`] bytes from the start of `path`.
pub fn read_sample(path: &Path) -> Result<Vec<u8>, SweepError> {
    let file = File::open(path).map_err(|e| SweepError::io(path, e))?;
    let mut sample = Vec::with_capacity(SAMPLE_SIZE);
    file.take(SAMPLE_SIZE as u64)
        .read_to_end(&mut sample)
        .map_err(|e| SweepError::io(path, e))?;
    Ok(sample)
}
