//! STL decoding
//!
//! STL comes in two encodings that share no magic number. Binary files start
//! with an arbitrary 80-byte comment header; ASCII files start with the
//! keyword `solid`. The decoder sniffs the header to choose a path:
//!
//! - header (lowercased) contains `"solid"` → ASCII
//! - otherwise → binary
//!
//! This is a heuristic. Some exporters write binary files whose header begins
//! with "solid", and those are misread as ASCII. [`FormatDetection::Strict`]
//! falls back to the binary decoder in that situation; the default keeps the
//! plain heuristic.

mod ascii;
mod binary;

use crate::error::{Error, Result};
use crate::model::TriangleMesh;
use std::io::Read;
use tracing::{debug, instrument};

/// Number of leading bytes inspected when sniffing the encoding
pub const HEADER_SIZE: usize = 80;

/// Default upper bound on input size (50 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// STL encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlFormat {
    /// Text STL (`solid` / `facet normal` / `vertex` ...)
    Ascii,
    /// Little-endian binary STL
    Binary,
}

/// How the decoder chooses between ASCII and binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatDetection {
    /// Header contains "solid" → ASCII, else binary
    #[default]
    Heuristic,
    /// Like `Heuristic`, but when the ASCII parse fails or finds no triangles
    /// and the buffer length matches the binary layout exactly, decode it as
    /// binary instead
    Strict,
}

/// Configuration for decoding STL files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Inputs larger than this many bytes are rejected before parsing
    pub max_file_size: u64,
    /// Encoding detection strategy
    pub detection: FormatDetection,
}

impl ParserConfig {
    /// Create a configuration with the default size limit and heuristic
    /// detection
    pub fn new() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            detection: FormatDetection::Heuristic,
        }
    }

    /// Create a configuration that uses [`FormatDetection::Strict`]
    pub fn strict() -> Self {
        Self::new().with_detection(FormatDetection::Strict)
    }

    /// Set the maximum accepted input size in bytes
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Set the detection strategy
    pub fn with_detection(mut self, detection: FormatDetection) -> Self {
        self.detection = detection;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Guess the encoding of an STL buffer from its first 80 bytes
///
/// Invalid UTF-8 in the header is replaced rather than rejected, so every
/// buffer gets an answer.
pub fn detect_format(bytes: &[u8]) -> StlFormat {
    let header = &bytes[..bytes.len().min(HEADER_SIZE)];
    let text = String::from_utf8_lossy(header).to_lowercase();
    if text.contains("solid") {
        StlFormat::Ascii
    } else {
        StlFormat::Binary
    }
}

/// Decode an STL buffer with the default configuration
///
/// # Example
///
/// ```
/// use stl_quote::parser::parse_stl;
///
/// let stl = b"solid tri
///   facet normal 0 0 1
///     outer loop
///       vertex 0 0 0
///       vertex 1 0 0
///       vertex 0 1 0
///     endloop
///   endfacet
/// endsolid tri";
///
/// let mesh = parse_stl(stl).unwrap();
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
pub fn parse_stl(bytes: &[u8]) -> Result<TriangleMesh> {
    parse_stl_with_config(bytes, &ParserConfig::default())
}

/// Decode an STL buffer
///
/// Fails with a parse error if the buffer cannot be read as STL; a file with
/// zero triangles is a success. No partial mesh is ever returned.
#[instrument(level = "debug", skip_all, fields(len = bytes.len()))]
pub fn parse_stl_with_config(bytes: &[u8], config: &ParserConfig) -> Result<TriangleMesh> {
    let size = bytes.len() as u64;
    if size > config.max_file_size {
        return Err(Error::FileTooLarge {
            size,
            limit: config.max_file_size,
        });
    }

    let format = detect_format(bytes);
    debug!(?format, detection = ?config.detection, "detected STL encoding");

    let mesh = match (format, config.detection) {
        (StlFormat::Binary, _) => binary::parse(bytes)?,
        (StlFormat::Ascii, FormatDetection::Heuristic) => ascii::parse(bytes)?,
        (StlFormat::Ascii, FormatDetection::Strict) => match ascii::parse(bytes) {
            Ok(mesh) if !mesh.is_empty() => mesh,
            Ok(_) if binary::length_matches(bytes) => {
                debug!("ASCII parse found no triangles, buffer has binary layout");
                binary::parse(bytes)?
            }
            Err(err) if binary::length_matches(bytes) => {
                debug!(%err, "ASCII parse failed, buffer has binary layout");
                binary::parse(bytes)?
            }
            other => other?,
        },
    };

    debug!(triangles = mesh.triangle_count(), "decoded STL");
    Ok(mesh)
}

/// Decode STL from a reader, enforcing the size limit while reading
pub fn parse_stl_reader<R: Read>(reader: R, config: &ParserConfig) -> Result<TriangleMesh> {
    let mut buffer = Vec::new();
    reader
        .take(config.max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)?;

    let size = buffer.len() as u64;
    if size > config.max_file_size {
        return Err(Error::FileTooLarge {
            size,
            limit: config.max_file_size,
        });
    }

    parse_stl_with_config(&buffer, config)
}
