//! Token types for softcode.
//!
//! Every token stands for exactly one literal character once escapes are
//! resolved. The recognizer groups `FuncChar` runs into names; the lexer
//! never does.

use std::fmt;

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// The kind of this token.
    pub kind: TokenKind,
    /// The literal character this token represents after escape resolution.
    pub lexeme: char,
    /// Source location, including any escape marker or absorbed space.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, lexeme: char, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    /// Returns the raw source text this token covers.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    /// Returns true if this token came out of an escape sequence.
    ///
    /// Escaped tokens are always literal text.
    #[must_use]
    pub fn is_escaped(&self, source: &str) -> bool {
        self.kind == TokenKind::Unescape || self.text(source).starts_with('\\')
    }

    /// Returns true if this separator swallowed the space that followed it.
    #[must_use]
    pub const fn absorbed_space(&self) -> bool {
        self.kind.is_separator() && self.span.len() > self.lexeme.len_utf8()
    }
}

/// Token kinds for softcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// A `\` escape marker. Consumed by the lexer, never yielded.
    Escape,
    /// One character of `[0-9A-Za-z]`, eligible for a function name.
    FuncChar,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `,`
    Comma,
    /// `=`
    Equals,
    /// `$`
    Dollar,
    /// `%`
    Percent,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// The ESC control character (0x1B) that introduces ANSI sequences.
    AnsiIntroducer,
    /// A literal backslash produced by `\\`.
    Unescape,
    /// Any other single literal character.
    Other,
}

impl TokenKind {
    /// Returns the kind for a punctuation character in default mode.
    #[must_use]
    pub const fn from_punctuation(c: char) -> Option<Self> {
        Some(match c {
            '[' => Self::OpenBracket,
            ']' => Self::CloseBracket,
            '{' => Self::OpenBrace,
            '}' => Self::CloseBrace,
            '(' => Self::OpenParen,
            ')' => Self::CloseParen,
            ',' => Self::Comma,
            '=' => Self::Equals,
            '$' => Self::Dollar,
            '%' => Self::Percent,
            ';' => Self::Semicolon,
            ':' => Self::Colon,
            '\x1b' => Self::AnsiIntroducer,
            _ => return None,
        })
    }

    /// Returns true for separators that may swallow one following space.
    #[must_use]
    pub const fn is_separator(self) -> bool {
        matches!(self, Self::Comma | Self::Semicolon)
    }

    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Escape => "escape",
            Self::FuncChar => "function name character",
            Self::OpenBracket => "'['",
            Self::CloseBracket => "']'",
            Self::OpenBrace => "'{'",
            Self::CloseBrace => "'}'",
            Self::OpenParen => "'('",
            Self::CloseParen => "')'",
            Self::Comma => "','",
            Self::Equals => "'='",
            Self::Dollar => "'$'",
            Self::Percent => "'%'",
            Self::Semicolon => "';'",
            Self::Colon => "':'",
            Self::AnsiIntroducer => "ANSI escape",
            Self::Unescape => "escaped backslash",
            Self::Other => "text",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
