//! Command-list splitting.
//!
//! A command list is a `;`-separated run of commands such as
//! `@emit hi; think [add(1,2)]`. Splitting works on tokens, so escaped
//! semicolons stay inside their command. Semicolons inside `{}` groups or
//! inside `[]`/`()` nesting do not split either.
//!
//! Splitting never fails: an unbalanced group simply runs to the end of
//! the input.

use tracing::trace;

use crate::ast::Node;
use crate::error::Result;
use crate::lexer::Lexer;
use crate::parser::parse;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// One command from a command list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    /// Raw source text of the command, surrounding whitespace trimmed.
    pub source: String,
    /// The command word: everything before the first space.
    pub name: String,
    /// Raw text after the first space, if there is one.
    pub argument: Option<String>,
    /// Location in the command list.
    pub span: Span,
}

impl Command {
    fn new(source: &str, span: Span) -> Self {
        let text = span.text(source);
        let (name, argument) = match text.split_once(' ') {
            Some((name, argument)) => (name, Some(argument.to_string())),
            None => (text, None),
        };
        Self {
            source: text.to_string(),
            name: name.to_string(),
            argument,
            span,
        }
    }

    /// Recognizes the argument as an evaluation string.
    ///
    /// Returns `None` for commands without an argument.
    ///
    /// # Errors
    /// Returns the recognizer's error if the argument is malformed.
    pub fn parse_argument(&self) -> Option<Result<Node>> {
        self.argument.as_deref().map(parse)
    }
}

/// Group nesting seen so far while splitting.
#[derive(Debug, Default)]
struct Nesting {
    braces: usize,
    brackets: usize,
}

impl Nesting {
    fn track(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::OpenBrace => self.braces += 1,
            TokenKind::CloseBrace => self.braces = self.braces.saturating_sub(1),
            TokenKind::OpenBracket | TokenKind::OpenParen => self.brackets += 1,
            TokenKind::CloseBracket | TokenKind::CloseParen => {
                self.brackets = self.brackets.saturating_sub(1);
            }
            _ => {}
        }
    }

    const fn is_top_level(&self) -> bool {
        self.braces == 0 && self.brackets == 0
    }
}

/// Splits a command list into its commands.
///
/// Empty commands (from `;;` or surrounding whitespace) are dropped.
#[must_use]
pub fn parse_command_list(source: &str) -> Vec<Command> {
    let mut commands = Vec::new();
    let mut nesting = Nesting::default();
    let mut current: Vec<Token> = Vec::new();

    for token in Lexer::new(source) {
        if token.kind == TokenKind::Semicolon && nesting.is_top_level() {
            commands.extend(finish(source, &current));
            current.clear();
            continue;
        }
        nesting.track(token.kind);
        current.push(token);
    }
    commands.extend(finish(source, &current));

    trace!(count = commands.len(), "command list");
    commands
}

/// Builds a command from its tokens, trimming unescaped whitespace.
fn finish(source: &str, tokens: &[Token]) -> Option<Command> {
    let is_blank = |t: &&Token| t.lexeme.is_whitespace() && !t.is_escaped(source);
    let first = tokens.iter().find(|t| !is_blank(t))?;
    let last = tokens.iter().rev().find(|t| !is_blank(t))?;
    Some(Command::new(source, first.span.to(last.span)))
}
