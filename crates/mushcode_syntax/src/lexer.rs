//! Escape-aware lexer for softcode.
//!
//! The lexer is a two-state machine. In [`LexerMode::Default`] every
//! character is classified into the token alphabet; a backslash switches to
//! [`LexerMode::Escaping`], where the next character is taken literally and
//! the machine drops straight back to `Default`. The lexer never fails: a
//! trailing lone backslash escapes nothing and the stream simply ends.

use crate::config::LexerConfig;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// The lexer's scanning state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LexerMode {
    /// Classify characters into the token alphabet.
    #[default]
    Default,
    /// Take exactly one character literally.
    Escaping,
}

/// Lexer for softcode.
///
/// Tokens are produced lazily through [`Lexer::next_token`] or the
/// [`Iterator`] impl.
pub struct Lexer<'src> {
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
    /// Mode the next scanning step starts in.
    mode: LexerMode,
    config: LexerConfig,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    /// Creates a new lexer with explicit configuration.
    #[must_use]
    pub fn with_config(source: &'src str, config: LexerConfig) -> Self {
        Self {
            rest: source,
            position: 0,
            line: 1,
            column: 1,
            mode: LexerMode::Default,
            config,
        }
    }

    /// Returns the mode the next scanning step will start in.
    #[must_use]
    pub const fn mode(&self) -> LexerMode {
        self.mode
    }

    /// Returns a zero-width span at the current position.
    #[must_use]
    pub const fn location(&self) -> Span {
        Span::point(self.position, self.line, self.column)
    }

    /// Returns the next token, or `None` once the input is exhausted.
    ///
    /// Escape markers are folded into the span of the token they escape.
    pub fn next_token(&mut self) -> Option<Token> {
        let mut escape: Option<Span> = None;
        loop {
            let Some((token, next)) = self.scan(self.mode) else {
                // A dangling escape at end of input escapes nothing.
                self.mode = LexerMode::Default;
                return None;
            };
            self.mode = next;

            if token.kind == TokenKind::Escape {
                escape = Some(token.span);
                continue;
            }

            return Some(match escape {
                Some(marker) => Token::new(token.kind, token.lexeme, marker.to(token.span)),
                None => token,
            });
        }
    }

    /// Tokenizes all source with the default configuration.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    /// Returns the escape-resolved text of the source.
    ///
    /// This is the concatenation of every token's lexeme.
    #[must_use]
    pub fn resolve(source: &str) -> String {
        Lexer::new(source).map(|t| t.lexeme).collect()
    }

    /// Performs one scanning step starting in `mode`.
    ///
    /// Returns the token produced (possibly an internal [`TokenKind::Escape`])
    /// and the mode the following step must start in.
    fn scan(&mut self, mode: LexerMode) -> Option<(Token, LexerMode)> {
        match mode {
            LexerMode::Default => self.scan_default(),
            LexerMode::Escaping => self.scan_escaping(),
        }
    }

    fn scan_default(&mut self) -> Option<(Token, LexerMode)> {
        let start = self.location();
        let c = self.peek_char()?;
        self.advance();

        let (kind, next) = match c {
            '\\' => (TokenKind::Escape, LexerMode::Escaping),
            c if c.is_ascii_alphanumeric() => (TokenKind::FuncChar, LexerMode::Default),
            c => (
                TokenKind::from_punctuation(c).unwrap_or(TokenKind::Other),
                LexerMode::Default,
            ),
        };

        if kind.is_separator() && self.config.absorb_separator_space && self.peek_char() == Some(' ')
        {
            self.advance();
        }

        Some((Token::new(kind, c, self.span_from(start)), next))
    }

    fn scan_escaping(&mut self) -> Option<(Token, LexerMode)> {
        let start = self.location();
        let c = self.peek_char()?;
        self.advance();

        let kind = if c == '\\' {
            TokenKind::Unescape
        } else {
            TokenKind::Other
        };
        Some((Token::new(kind, c, self.span_from(start)), LexerMode::Default))
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn span_from(&self, start: Span) -> Span {
        Span::new(start.start, self.position, start.line, start.column)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
