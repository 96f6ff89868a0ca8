//! Integration tests for Layer 0: Syntax
//!
//! Tests for the lexer, recognizer, argument splitting, command lists,
//! substitutions, and the unparser.

mod arguments;
mod commands;
mod lexer;
mod parser;
mod pretty;
mod substitutions;
