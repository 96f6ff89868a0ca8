//! Tokenizer and recognizer for MUSH softcode.
//!
//! This crate provides:
//! - `Lexer` - Escape-aware tokenization of softcode
//! - `Parser` - Recognition of evaluation strings into a `Node` tree
//! - `parse_command_list` - Splitting `;`-separated command lists
//! - `substitutions` - Classification of `%`-codes
//!
//! Recognition is purely structural. Nothing is evaluated.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod command;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod span;
pub mod substitution;
pub mod token;
pub mod visitor;


pub use ast::{Call, Node};
pub use command::{Command, parse_command_list};
pub use config::{LexerConfig, ParserConfig};
pub use error::{Error, ErrorContext, ErrorKind, NestingLimit, Result};
pub use lexer::{Lexer, LexerMode};
pub use parser::{Parser, parse, parse_with_config};
pub use span::Span;
pub use substitution::{Pronoun, Substitution, SubstitutionKind, scan_substitutions, substitutions};
pub use token::{Token, TokenKind};
pub use visitor::{NodeVisitor, TreeStats, function_calls, tree_stats, walk_node};

/// Tokenizes source with the default configuration.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::tokenize_all(source)
}
