//! Error types for eqplot.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

use crate::expr::ExprError;
use crate::graph::EquationId;

/// Result type alias for eqplot operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur in eqplot.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of an equation file could not be parsed or compiled.
    #[error("line {line}: {source} (in `{text}`)")]
    InvalidEquation {
        line: usize,
        text: String,
        #[source]
        source: ExprError,
    },

    /// Viewport bounds are not finite or not increasing.
    #[error("Invalid range: [{left}, {right}]")]
    RangeInvalid { left: f64, right: f64 },

    /// No equation with this id is loaded.
    #[error("Equation not found: {0}")]
    EquationNotFound(EquationId),

    /// A file that is not UTF-8 text.
    #[error("Not a UTF-8 text file: {path}")]
    NotText { path: PathBuf },

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),
}

impl GraphError {
    /// Create a FileOpen error, or NotText when the bytes are not UTF-8.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::InvalidData {
            Self::NotText { path }
        } else {
            Self::FileOpen { path, source }
        }
    }

    /// Create an InvalidEquation error.
    pub fn invalid_equation(line: usize, text: impl Into<String>, source: ExprError) -> Self {
        Self::InvalidEquation {
            line,
            text: text.into(),
            source,
        }
    }

    /// Create a RangeInvalid error.
    pub fn range_invalid(left: f64, right: f64) -> Self {
        Self::RangeInvalid { left, right }
    }
}
