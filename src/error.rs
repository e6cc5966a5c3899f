//! Error types for STL analysis
//!
//! Every error carries a code so callers can categorize failures without
//! matching on message text.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O and input size errors
//! - **E2xxx**: STL decoding errors
//! - **E3xxx**: Caller input errors (settings, material tables)
//! - **E4xxx**: Report serialization errors
//!
//! ## Error Codes
//!
//! - `E1001`: I/O error
//! - `E1002`: Input exceeds the configured size limit
//! - `E2001`: Parse error (malformed ASCII token, invalid UTF-8)
//! - `E2002`: Truncated binary STL
//! - `E2003`: Buffer too short to hold an STL header
//! - `E3001`: Invalid print settings
//! - `E3002`: Invalid material table
//! - `E4001`: JSON error

use std::io;
use thiserror::Error;

/// Result type for STL analysis operations
pub type Result<T> = std::result::Result<T, Error>;

/// Additional context attached to parse errors
///
/// The ASCII decoder knows the line it was on when a token failed to parse,
/// so the message shown to the user points at the problem.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// 1-based line number (ASCII STL)
    pub line: Option<usize>,

    /// A helpful hint for resolving the error
    pub hint: Option<String>,
}

impl ErrorContext {
    /// Create a new empty error context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line number
    pub fn line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the hint
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();

        if let Some(line) = self.line {
            parts.push(format!("Line: {}", line));
        }

        if let Some(ref hint) = self.hint {
            parts.push(format!("Hint: {}", hint));
        }

        if !parts.is_empty() {
            write!(f, "\n{}", parts.join("\n"))
        } else {
            Ok(())
        }
    }
}

/// Errors that can occur while decoding and analyzing STL files
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading input or writing a report
    ///
    /// **Error Code**: E1001
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is larger than the configured limit
    ///
    /// **Error Code**: E1002
    ///
    /// **Suggestions**:
    /// - Decimate the mesh before uploading
    /// - Raise `ParserConfig::max_file_size` if the limit is too strict
    #[error("[E1002] File too large: {size} bytes exceeds the limit of {limit} bytes")]
    FileTooLarge {
        /// Size of the rejected input in bytes (a lower bound for readers)
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// The buffer could not be interpreted as STL
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Non-numeric token after `vertex` or `facet normal`
    /// - Fewer than three coordinates on a line
    /// - ASCII file that is not valid UTF-8
    ///
    /// **Suggestions**:
    /// - Verify numbers use a dot as decimal separator ("1.5" not "1,5")
    /// - Re-export the file from the modelling tool
    #[error("[E2001] Parse error: {0}")]
    ParseError(String),

    /// Binary STL shorter than its declared triangle count requires
    ///
    /// **Error Code**: E2002
    ///
    /// **Common Causes**:
    /// - Interrupted upload or download
    /// - Triangle count field corrupted
    #[error("[E2002] Truncated binary STL: {declared} triangles need {expected} bytes, got {actual}")]
    Truncated {
        /// Triangle count stored at bytes 80..84
        declared: u32,
        /// Byte length the declared count implies
        expected: u64,
        /// Actual byte length of the buffer
        actual: u64,
    },

    /// Buffer too short to contain an STL header
    ///
    /// **Error Code**: E2003
    #[error("[E2003] Invalid STL header: {0}")]
    InvalidHeader(String),

    /// Print settings outside their valid domain
    ///
    /// **Error Code**: E3001
    ///
    /// This is a caller contract violation: the estimation engine never
    /// checks its inputs, so callers validate settings before invoking it.
    #[error("[E3001] Invalid print settings: {0}")]
    InvalidSettings(String),

    /// Material property table could not be loaded
    ///
    /// **Error Code**: E3002
    #[error("[E3002] Invalid material table: {0}")]
    InvalidMaterialTable(String),

    /// JSON serialization or deserialization failed
    ///
    /// **Error Code**: E4001
    #[error("[E4001] JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the input could not be decoded as STL (any E2xxx code)
    ///
    /// Truncated and header errors are reported separately from token
    /// errors but belong to the same failure class.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::ParseError(_) | Error::Truncated { .. } | Error::InvalidHeader(_)
        )
    }

    /// Create a ParseError for a token on a specific ASCII STL line
    ///
    /// # Arguments
    /// * `line` - 1-based line number
    /// * `field_name` - What was being parsed (e.g., "vertex coordinate")
    /// * `value` - The offending token
    ///
    /// # Example
    /// ```ignore
    /// Error::parse_error_at_line(12, "vertex coordinate", "1,5")
    /// ```
    pub fn parse_error_at_line(line: usize, field_name: &str, value: &str) -> Self {
        let context = ErrorContext::new()
            .line(line)
            .hint("Verify the value is properly formatted");
        Error::ParseError(format!(
            "Failed to parse {}: expected floating-point number, got '{}'{}",
            field_name, value, context
        ))
    }

    /// Create a ParseError for a line that has too few numeric tokens
    pub fn missing_tokens(line: usize, keyword: &str, found: usize) -> Self {
        let context = ErrorContext::new().line(line);
        Error::ParseError(format!(
            "'{}' needs 3 coordinates, found {}{}",
            keyword, found, context
        ))
    }

    /// Create an InvalidSettings error for a single field
    pub fn invalid_setting(field_name: &str, message: &str) -> Self {
        Error::InvalidSettings(format!("{}: {}", field_name, message))
    }
}
