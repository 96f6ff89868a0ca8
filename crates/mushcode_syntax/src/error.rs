//! Error types for softcode recognition.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::span::Span;
use crate::token::TokenKind;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for softcode recognition.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a malformed structure error.
    ///
    /// `found` is `None` at end of input. `line` is the source line the
    /// span starts on, kept for diagnostics.
    #[must_use]
    pub fn malformed(expected: TokenKind, found: Option<TokenKind>, at: Span, line: &str) -> Self {
        Self::new(ErrorKind::MalformedStructure {
            expected,
            found,
            offset: at.start,
            line: at.line,
            column: at.column,
            context: line.to_string(),
        })
    }

    /// Creates a nesting limit error.
    #[must_use]
    pub fn nesting_limit(limit: usize, at: Span) -> Self {
        Self::new(ErrorKind::LimitExceeded(NestingLimit {
            limit,
            offset: at.start,
        }))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns the byte offset the error is anchored at, if any.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match &self.kind {
            ErrorKind::MalformedStructure { offset, .. } => Some(*offset),
            ErrorKind::LimitExceeded(limit) => Some(limit.offset),
            ErrorKind::Internal(_) => None,
        }
    }

    /// Returns the token kind a malformed structure was waiting for.
    #[must_use]
    pub const fn expected(&self) -> Option<TokenKind> {
        match &self.kind {
            ErrorKind::MalformedStructure { expected, .. } => Some(*expected),
            _ => None,
        }
    }

    /// Returns true if this is a malformed structure error.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self.kind, ErrorKind::MalformedStructure { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A bracket or paren was opened but its closer never arrived.
    #[error(
        "malformed structure at {line}:{column}: expected {expected}, found {}",
        describe_found(.found)
    )]
    MalformedStructure {
        /// The token kind that was required.
        expected: TokenKind,
        /// The token kind that was present, or `None` at end of input.
        found: Option<TokenKind>,
        /// Byte offset of the offending position.
        offset: usize,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// Nesting went deeper than the configured limit.
    #[error("limit exceeded: {0}")]
    LimitExceeded(NestingLimit),

    /// Failure outside recognition (terminal, file I/O).
    #[error("internal error: {0}")]
    Internal(String),
}

fn describe_found(found: &Option<TokenKind>) -> &'static str {
    found.map_or("end of input", TokenKind::name)
}

/// The nesting limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestingLimit {
    /// The configured limit.
    pub limit: usize,
    /// Byte offset where the limit was crossed.
    pub offset: usize,
}

impl fmt::Display for NestingLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max nesting depth ({}) exceeded at offset {}",
            self.limit, self.offset
        )
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Name of the input (file, attribute, REPL line).
    pub source: Option<String>,
    /// Line number in the input.
    pub line: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line number.
    #[must_use]
    pub const fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        Ok(())
    }
}
