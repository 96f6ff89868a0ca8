//! Structural recognizer for evaluation strings.
//!
//! The parser pulls tokens from the [`Lexer`] on demand and builds a
//! [`Node`] tree by recursive descent. Every decision is made by looking
//! ahead at token kinds; the parser never backtracks.
//!
//! An evaluation string is one of five alternatives, tried in order:
//!
//! 1. `function` followed by an explicit evaluation string
//! 2. `explicitFunction` followed by an explicit evaluation string
//! 3. `function` alone
//! 4. `explicitFunction` alone
//! 5. `genericText`, followed by an explicit evaluation string when the
//!    text stopped in front of an explicit call
//!
//! Only the head may be a bare `function`. Everything after it is an
//! explicit evaluation string, which holds bracketed calls and text.

mod arguments;

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::ast::{Call, Node};
use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Where an evaluation string sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Position {
    /// The whole input. Runs to end of input.
    TopLevel,
    /// One function argument. Ends at a depth-0 `,` or `)`.
    Argument,
}

/// What the head of an evaluation string will be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Head {
    Function,
    ExplicitFunction,
    Text,
    Empty,
}

/// Paren nesting inside the text of one evaluation string.
///
/// Text-level parens are literal, but an argument must not end on a `)` or
/// `,` that sits inside them.
#[derive(Debug, Default)]
struct TextState {
    paren_depth: usize,
}

/// Parser for softcode evaluation strings.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Tokens pulled from the lexer but not yet consumed.
    lookahead: VecDeque<Token>,
    /// Source text (for error messages).
    source: &'src str,
    config: ParserConfig,
    /// Current evaluation-string nesting depth.
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    /// Creates a new parser with explicit configuration.
    #[must_use]
    pub fn with_config(source: &'src str, config: ParserConfig) -> Self {
        Self {
            lexer: Lexer::with_config(source, config.lexer),
            lookahead: VecDeque::new(),
            source,
            config,
            depth: 0,
        }
    }

    /// Parses the entire source as one top-level evaluation string.
    ///
    /// # Errors
    /// Returns a malformed structure error if a committed call is missing
    /// its `)` or `]`, or a limit error if nesting is too deep.
    pub fn parse(&mut self) -> Result<Node> {
        let node = self.parse_evaluation_string(Position::TopLevel)?;
        debug!(
            kind = node.type_name(),
            segments = node.segments().len(),
            bytes = self.source.len(),
            "recognized evaluation string"
        );
        Ok(node)
    }

    /// Parses an evaluation string.
    fn parse_evaluation_string(&mut self, position: Position) -> Result<Node> {
        self.enter()?;

        let mut state = TextState::default();
        let head = self.predict_head(position, &state);
        trace!(?head, ?position, offset = self.location().start, "evaluation string");

        let head = match head {
            Head::Function => Node::PlainFunctionCall(self.parse_function()?),
            Head::ExplicitFunction => self.parse_explicit_function()?,
            Head::Text => self.parse_generic_text(position, &mut state),
            Head::Empty => Node::text("", self.location()),
        };

        let node = if self.at_end(position, &state) {
            head
        } else {
            let tail = self.parse_explicit_evaluation_string(position, &mut state)?;
            Node::sequence(head, tail)
        };

        self.depth -= 1;
        Ok(node)
    }

    /// Picks the head alternative from lookahead alone.
    fn predict_head(&mut self, position: Position, state: &TextState) -> Head {
        if self.at_end(position, state) {
            Head::Empty
        } else if self.function_starts_at(0) {
            Head::Function
        } else if self.explicit_function_starts_at(0) {
            Head::ExplicitFunction
        } else {
            Head::Text
        }
    }

    /// Parses the tail of an evaluation string: bracketed calls and text,
    /// folded right into a sequence.
    fn parse_explicit_evaluation_string(
        &mut self,
        position: Position,
        state: &mut TextState,
    ) -> Result<Node> {
        let mut segments = Vec::new();
        while !self.at_end(position, state) {
            if self.explicit_function_starts_at(0) {
                segments.push(self.parse_explicit_function()?);
            } else {
                segments.push(self.parse_generic_text(position, state));
            }
        }

        let location = self.location();
        Ok(segments
            .into_iter()
            .rev()
            .reduce(|tail, head| Node::sequence(head, tail))
            .unwrap_or_else(|| Node::text("", location)))
    }

    /// Parses `[` function `]`.
    fn parse_explicit_function(&mut self) -> Result<Node> {
        let open = self.expect(TokenKind::OpenBracket)?;
        let mut call = self.parse_function()?;
        let close = self.expect(TokenKind::CloseBracket)?;
        call.span = open.span.to(close.span);
        Ok(Node::ExplicitFunctionCall(call))
    }

    /// Parses a name, `(`, the arguments, and `)`.
    fn parse_function(&mut self) -> Result<Call> {
        let start = self.location();
        let mut name = String::new();
        while let Some(token) = self.peek(0).filter(|t| t.kind == TokenKind::FuncChar) {
            self.advance();
            name.push(token.lexeme);
        }

        self.expect(TokenKind::OpenParen)?;
        let arguments = self.parse_arguments()?;
        let close = self.expect(TokenKind::CloseParen)?;

        Ok(Call {
            name,
            arguments,
            span: start.to(close.span),
        })
    }

    /// Consumes text up to the end of the evaluation string or the next
    /// explicit call, whichever comes first.
    fn parse_generic_text(&mut self, position: Position, state: &mut TextState) -> Node {
        let start = self.location();
        let mut end = start;
        let mut content = String::new();

        while !self.at_end(position, state) {
            let Some(token) = self.peek(0) else {
                break;
            };
            match token.kind {
                TokenKind::OpenBracket if self.explicit_function_starts_at(0) => break,
                TokenKind::OpenParen => state.paren_depth += 1,
                TokenKind::CloseParen => state.paren_depth = state.paren_depth.saturating_sub(1),
                _ => {}
            }
            self.advance();
            content.push(token.lexeme);
            // The space only belongs to a separator between arguments.
            if token.absorbed_space() {
                content.push(' ');
            }
            end = token.span;
        }

        Node::text(content, start.to(end))
    }

    /// Returns true if `FuncChar+ '('` starts `from` tokens ahead.
    fn function_starts_at(&mut self, from: usize) -> bool {
        let mut n = from;
        while self.peek_kind(n) == Some(TokenKind::FuncChar) {
            n += 1;
        }
        n > from && self.peek_kind(n) == Some(TokenKind::OpenParen)
    }

    /// Returns true if `'[' FuncChar+ '('` starts `from` tokens ahead.
    fn explicit_function_starts_at(&mut self, from: usize) -> bool {
        self.peek_kind(from) == Some(TokenKind::OpenBracket) && self.function_starts_at(from + 1)
    }

    /// Returns true if the evaluation string in `position` is complete.
    fn at_end(&mut self, position: Position, state: &TextState) -> bool {
        match self.peek_kind(0) {
            None => true,
            Some(TokenKind::Comma | TokenKind::CloseParen) => {
                position == Position::Argument && state.paren_depth == 0
            }
            Some(_) => false,
        }
    }

    /// Records one more level of nesting.
    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(Error::nesting_limit(self.config.max_depth, self.location()));
        }
        Ok(())
    }

    /// Peeks `n` tokens ahead, pulling from the lexer as needed.
    fn peek(&mut self, n: usize) -> Option<Token> {
        while self.lookahead.len() <= n {
            let token = self.lexer.next_token()?;
            self.lookahead.push_back(token);
        }
        self.lookahead.get(n).copied()
    }

    fn peek_kind(&mut self, n: usize) -> Option<TokenKind> {
        self.peek(n).map(|t| t.kind)
    }

    /// Consumes the next token.
    fn advance(&mut self) -> Option<Token> {
        self.lookahead
            .pop_front()
            .or_else(|| self.lexer.next_token())
    }

    /// Consumes a token of the expected kind.
    fn expect(&mut self, expected: TokenKind) -> Result<Token> {
        match self.peek(0) {
            Some(token) if token.kind == expected => {
                self.advance();
                Ok(token)
            }
            found => {
                let at = found.map_or_else(|| self.lexer.location(), |t| t.span);
                Err(Error::malformed(
                    expected,
                    found.map(|t| t.kind),
                    at,
                    self.line_at(at),
                ))
            }
        }
    }

    /// Returns a zero-width span where the next token starts.
    fn location(&mut self) -> Span {
        match self.peek(0) {
            Some(token) => Span::point(token.span.start, token.span.line, token.span.column),
            None => self.lexer.location(),
        }
    }

    /// Returns the source line containing a span.
    fn line_at(&self, span: Span) -> &'src str {
        let start = self.source[..span.start].rfind('\n').map_or(0, |i| i + 1);
        let end = self.source[span.start..]
            .find('\n')
            .map_or(self.source.len(), |i| span.start + i);
        &self.source[start..end]
    }
}

/// Parses source into an evaluation-string tree.
///
/// # Errors
/// Returns an error if a call is left unterminated or nesting is too deep.
pub fn parse(source: &str) -> Result<Node> {
    Parser::new(source).parse()
}

/// Parses source with explicit configuration.
///
/// # Errors
/// Returns an error if a call is left unterminated or nesting is too deep.
pub fn parse_with_config(source: &str, config: ParserConfig) -> Result<Node> {
    Parser::with_config(source, config).parse()
}
