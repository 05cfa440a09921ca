//! Streaming conversion of collected files to UTF-8.

use encoding_rs::{CoderResult, Encoding, UTF_8, WINDOWS_1252};
use std::io::{self, Read, Write};

/// Read size used while streaming a file through the decoder.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Encoding picked for a file from its leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedEncoding {
    pub encoding: &'static Encoding,
    pub bom: bool,
}

impl DetectedEncoding {
    /// Lower-case label, `utf-8-sig` for BOM-prefixed UTF-8.
    pub fn label(&self) -> String {
        if self.encoding == UTF_8 && self.bom {
            return "utf-8-sig".to_string();
        }
        self.encoding.name().to_ascii_lowercase()
    }
}

/// Result of streaming one file through [`decode_stream`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Encoding label, suffixed with `-replace` when malformed input was seen.
    pub label: String,
    pub bytes_written: u64,
    pub had_replacements: bool,
}

/// BOM first, then UTF-8 validity of the sample, then Windows-1252.
///
/// A multi-byte UTF-8 sequence cut off by the end of the sample still counts
/// as valid.
pub fn detect_encoding(sample: &[u8]) -> DetectedEncoding {
    if let Some((encoding, _)) = Encoding::for_bom(sample) {
        return DetectedEncoding {
            encoding,
            bom: true,
        };
    }
    let utf8 = match std::str::from_utf8(sample) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    };
    DetectedEncoding {
        encoding: if utf8 { UTF_8 } else { WINDOWS_1252 },
        bom: false,
    }
}

/// Decodes everything `reader` yields as `detected` and writes UTF-8 to `writer`.
pub fn decode_stream<R: Read, W: Write>(
    mut reader: R,
    writer: &mut W,
    detected: DetectedEncoding,
) -> io::Result<Decoded> {
    let mut decoder = detected.encoding.new_decoder_with_bom_removal();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut out = String::with_capacity(CHUNK_SIZE);
    let mut bytes_written = 0u64;
    let mut had_replacements = false;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let last = n == 0;
        let mut src = &buf[..n];
        loop {
            let needed = decoder
                .max_utf8_buffer_length(src.len())
                .unwrap_or(src.len().saturating_mul(3) + 16);
            out.reserve(needed);
            let (result, read, replaced) = decoder.decode_to_string(src, &mut out, last);
            had_replacements |= replaced;
            src = &src[read..];
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }
        if !out.is_empty() {
            writer.write_all(out.as_bytes())?;
            bytes_written += out.len() as u64;
            out.clear();
        }
        if last {
            break;
        }
    }
    let mut label = detected.label();
    if had_replacements {
        label.push_str("-replace");
    }
    Ok(Decoded {
        label,
        bytes_written,
        had_replacements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_16BE, UTF_16LE};

    fn decode_all(bytes: &[u8]) -> (String, Decoded) {
        let detected = detect_encoding(&bytes[..bytes.len().min(8192)]);
        let mut out = Vec::new();
        let decoded = decode_stream(bytes, &mut out, detected).unwrap();
        (String::from_utf8(out).unwrap(), decoded)
    }

    #[test]
    fn plain_utf8_passes_through() {
        let (text, decoded) = decode_all("héllo wörld\n".as_bytes());
        assert_eq!(text, "héllo wörld\n");
        assert_eq!(decoded.label, "utf-8");
        assert_eq!(decoded.bytes_written, text.len() as u64);
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let (text, decoded) = decode_all(b"\xEF\xBB\xBFabc");
        assert_eq!(text, "abc");
        assert_eq!(decoded.label, "utf-8-sig");
    }

    #[test]
    fn utf16_boms_are_detected() {
        assert_eq!(detect_encoding(&[0xFF, 0xFE, b'a', 0]).encoding, UTF_16LE);
        assert_eq!(detect_encoding(&[0xFE, 0xFF, 0, b'a']).encoding, UTF_16BE);
        let (text, decoded) = decode_all(&[0xFF, 0xFE, b'h', 0, b'i', 0]);
        assert_eq!(text, "hi");
        assert_eq!(decoded.label, "utf-16le");
    }

    #[test]
    fn invalid_utf8_falls_back_to_windows_1252() {
        let (text, decoded) = decode_all(b"caf\xE9 \x80");
        assert_eq!(text, "café €");
        assert_eq!(decoded.label, "windows-1252");
        assert!(!decoded.had_replacements);
    }

    #[test]
    fn truncated_sequence_at_sample_edge_is_still_utf8() {
        let sample = &"aé".as_bytes()[..2];
        assert_eq!(detect_encoding(sample).encoding, UTF_8);
    }

    #[test]
    fn sequence_split_across_chunks_survives() {
        let mut bytes = vec![b'a'; CHUNK_SIZE - 1];
        bytes.extend_from_slice("€ end".as_bytes());
        let (text, decoded) = decode_all(&bytes);
        assert!(text.ends_with("€ end"));
        assert!(!decoded.had_replacements);
    }

    #[test]
    fn late_invalid_bytes_are_replaced() {
        let mut bytes = vec![b'a'; 9000];
        bytes.push(0xFF);
        let (text, decoded) = decode_all(&bytes);
        assert!(text.ends_with('\u{FFFD}'));
        assert_eq!(decoded.label, "utf-8-replace");
    }
}
