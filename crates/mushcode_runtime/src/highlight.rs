//! Syntax highlighting for the REPL.
//!
//! Highlighting runs the real tokenizer, so escaped characters are never
//! colored as structure.

use std::borrow::Cow;

use mushcode_syntax::{Lexer, Token, TokenKind, scan_substitutions};

/// Color applied to a run of source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Style {
    Plain,
    FunctionName,
    Delimiter,
    Separator,
    Substitution,
    Escaped,
}

impl Style {
    const fn code(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::FunctionName => Some("\x1b[32m"), // green
            Self::Delimiter => Some("\x1b[1m"),     // bold
            Self::Separator => Some("\x1b[33m"),    // yellow
            Self::Substitution => Some("\x1b[36m"), // cyan
            Self::Escaped => Some("\x1b[2m"),       // dim
        }
    }
}

/// Highlighter for softcode.
pub struct SoftcodeHighlighter;

impl SoftcodeHighlighter {
    /// Creates a new highlighter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Highlight a line of input.
    #[allow(clippy::unused_self)]
    #[must_use]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let tokens = Lexer::tokenize_all(line);
        if tokens.is_empty() {
            return Cow::Borrowed(line);
        }

        let styles = token_styles(line, &tokens);
        let mut result = String::with_capacity(line.len() * 2);
        let mut current = Style::Plain;

        for (token, style) in tokens.iter().zip(styles) {
            if style != current {
                if current.code().is_some() {
                    result.push_str("\x1b[0m");
                }
                if let Some(code) = style.code() {
                    result.push_str(code);
                }
                current = style;
            }
            result.push_str(token.text(line));
        }

        if current.code().is_some() {
            result.push_str("\x1b[0m");
        }

        // A dangling escape produces no token.
        let end = tokens.last().map_or(0, |t| t.span.end);
        result.push_str(&line[end..]);

        Cow::Owned(result)
    }
}

impl Default for SoftcodeHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks a style for every token.
fn token_styles(line: &str, tokens: &[Token]) -> Vec<Style> {
    let mut styles: Vec<Style> = tokens
        .iter()
        .map(|token| {
            if token.is_escaped(line) {
                return Style::Escaped;
            }
            match token.kind {
                TokenKind::OpenBracket
                | TokenKind::CloseBracket
                | TokenKind::OpenParen
                | TokenKind::CloseParen
                | TokenKind::OpenBrace
                | TokenKind::CloseBrace => Style::Delimiter,
                TokenKind::Comma | TokenKind::Semicolon => Style::Separator,
                _ => Style::Plain,
            }
        })
        .collect();

    // Name characters directly in front of `(`, scanning right to left.
    let mut in_name = false;
    for (i, token) in tokens.iter().enumerate().rev() {
        match token.kind {
            TokenKind::OpenParen if styles[i] == Style::Delimiter => in_name = true,
            TokenKind::FuncChar if in_name => styles[i] = Style::FunctionName,
            _ => in_name = false,
        }
    }

    for substitution in scan_substitutions(tokens) {
        for (token, style) in tokens.iter().zip(styles.iter_mut()) {
            if substitution.span.contains(token.span.start) {
                *style = Style::Substitution;
            }
        }
    }

    styles
}
