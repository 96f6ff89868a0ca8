//! REPL and CLI for the softcode recognizer.
//!
//! This crate provides:
//! - [`Repl`] - Interactive read-recognize-print loop
//! - [`LineEditor`] - Line editing behind a swappable trait
//! - The `mushcode` command-line tool

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod highlight;
pub mod repl;

pub use editor::{LineEditor, ReadResult, RustylineEditor, input_is_complete};
pub use highlight::SoftcodeHighlighter;
pub use repl::{OutputMode, Repl, ReplConfig};
