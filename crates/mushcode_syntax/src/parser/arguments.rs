//! Argument lists.
//!
//! A call's arguments are evaluation strings separated by commas at text
//! paren depth zero. The list ends at the call's closing `)`, which is left
//! for the caller to consume. An empty list still yields one empty
//! argument, so `rand()` and `rand( )` both have arity one.

use tracing::trace;

use super::{Parser, Position};
use crate::ast::Node;
use crate::error::Result;
use crate::token::TokenKind;

impl Parser<'_> {
    /// Parses the arguments between a call's `(` and `)`.
    pub(super) fn parse_arguments(&mut self) -> Result<Vec<Node>> {
        let mut arguments = vec![self.parse_evaluation_string(Position::Argument)?];

        while self.peek_kind(0) == Some(TokenKind::Comma) {
            self.advance();
            arguments.push(self.parse_evaluation_string(Position::Argument)?);
        }

        trace!(count = arguments.len(), "arguments");
        Ok(arguments)
    }
}
