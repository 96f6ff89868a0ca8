//! Configuration for the tokenizer and recognizer.

/// Configuration for the [`Lexer`](crate::Lexer).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexerConfig {
    /// Swallow one space directly after `,` or `;`.
    ///
    /// The space becomes part of the separator token's span and produces
    /// no token of its own. A second space is ordinary text.
    pub absorb_separator_space: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            absorb_separator_space: true,
        }
    }
}

impl LexerConfig {
    /// Creates a configuration that keeps every space as text.
    #[must_use]
    pub const fn verbatim() -> Self {
        Self {
            absorb_separator_space: false,
        }
    }

    /// Builder method to set separator space absorption.
    #[must_use]
    pub const fn with_absorb_separator_space(mut self, absorb: bool) -> Self {
        self.absorb_separator_space = absorb;
        self
    }
}

/// Configuration for the [`Parser`](crate::Parser).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Tokenizer settings used for the parse.
    pub lexer: LexerConfig,

    /// Maximum evaluation-string nesting depth.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            lexer: LexerConfig::default(),
            max_depth: 128,
        }
    }
}

impl ParserConfig {
    /// Creates a configuration with a tight nesting limit, matching the
    /// function recursion limit MUSH servers ship with.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_depth: 50,
            ..Self::default()
        }
    }

    /// Builder method to set the tokenizer configuration.
    #[must_use]
    pub const fn with_lexer(mut self, lexer: LexerConfig) -> Self {
        self.lexer = lexer;
        self
    }

    /// Builder method to set the nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
