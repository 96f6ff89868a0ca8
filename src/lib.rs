//! Mushcode - MUSH softcode tokenizer and recognizer
//!
//! This crate re-exports both layers for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: mushcode_runtime — REPL, CLI, line editing
//! Layer 0: mushcode_syntax  — Lexer, parser, command lists, substitutions
//! ```

pub use mushcode_runtime as runtime;
pub use mushcode_syntax as syntax;
