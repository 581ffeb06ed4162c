//! Error handling types and utilities for the MASML toolchain.
//!
//! This module provides the error handling system shared by the MASML parser,
//! VM, and CLI. It includes a structured error type carrying optional source
//! line information and convenience functions for error creation and
//! propagation.
//!
//! MASML is a line-oriented language, so errors are located by 1-based line
//! number only; there is no column tracking.
//!
//! # Examples
//!
//! ```rust
//! use masml_syntax::error::{Error, Result, error};
//!
//! // Create a simple error
//! let simple_error = Error::new("can't open file: prog.masml");
//!
//! // Create an error anchored to a source line
//! let located_error = Error::at_line("unknown instruction: FOO", 3);
//!
//! // Use the convenience function
//! fn might_fail() -> Result<f64> {
//!     error("jump target 9 is out of range")
//! }
//! ```

use std::fmt;

/// An error that occurred while parsing or executing a MASML program.
///
/// Each error includes a descriptive message and, for parse errors, the
/// 1-based source line the error was found on. Runtime and I/O errors
/// usually have no line.
#[derive(Debug, Clone)]
pub struct Error {
    /// Human-readable error message
    pub msg: String,

    /// Optional line number in the source file (1-based)
    pub line: Option<usize>,
}

impl Error {
    /// Creates a new error with the given message and no source location.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use masml_syntax::Error;
    ///
    /// let error = Error::new("can't open file: prog.masml");
    /// let error_from_string = Error::new(format!("unknown option: {}", "--frobnicate"));
    /// ```
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            line: None,
        }
    }

    /// Creates a new error anchored to a source line.
    ///
    /// This should be used for parse errors and anything else that can be
    /// precisely located in the source file.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use masml_syntax::Error;
    ///
    /// let error = Error::at_line("SWAP doesn't need a register", 7);
    /// println!("{}", error); // "SWAP doesn't need a register at line 7"
    /// ```
    pub fn at_line(msg: impl Into<String>, line: usize) -> Self {
        Self {
            msg: msg.into(),
            line: Some(line),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(l) = self.line {
            write!(f, "{} at line {}", self.msg, l)
        } else {
            write!(f, "{}", self.msg)
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::new(s)
    }
}
impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::new(s)
    }
}

/// A specialized `Result` type for MASML operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience function to create an error result.
///
/// Shorthand for `Err(Error::new(msg))`.
///
/// # Examples
///
/// ```rust
/// use masml_syntax::error::{Result, error};
///
/// fn validate_input(s: &str) -> Result<()> {
///     if s.is_empty() {
///         error("input cannot be empty")
///     } else {
///         Ok(())
///     }
/// }
/// ```
pub fn error<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::new(msg))
}

/// Convenience function to create an error result anchored to a source line.
///
/// Shorthand for `Err(Error::at_line(msg, line))`.
pub fn error_at<T>(line: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::at_line(msg, line))
}
