//! Syntax tree for evaluation strings.
//!
//! A parsed evaluation string is a [`Node`]. Function calls keep their
//! name exactly as written and their arguments as nested nodes; text keeps
//! the escape-resolved characters along with the raw source span.

use crate::span::Span;

/// An evaluation-string node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// Un-bracketed call like `add(1,2)`, only ever at the head of an
    /// evaluation string.
    PlainFunctionCall(Call),
    /// Bracketed call like `[add(1,2)]`.
    ExplicitFunctionCall(Call),
    /// Literal text that formed no call.
    GenericText {
        /// The text with escapes resolved.
        content: String,
        /// Raw source covered by the text.
        span: Span,
    },
    /// A head node followed by the rest of the evaluation string.
    Sequence {
        /// First element.
        head: Box<Node>,
        /// Everything after the head.
        tail: Box<Node>,
        /// Span covering both.
        span: Span,
    },
}

/// A function call: a name plus its argument list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Call {
    /// Function name, case preserved.
    pub name: String,
    /// Arguments in order. Never empty; `foo()` has one empty argument.
    pub arguments: Vec<Node>,
    /// Span of the call, brackets included for explicit calls.
    pub span: Span,
}

impl Call {
    /// Returns the first argument.
    ///
    /// # Panics
    /// Never panics for calls built by the parser, which always have at
    /// least one argument.
    #[must_use]
    pub fn argument(&self) -> &Node {
        &self.arguments[0]
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }
}

impl Node {
    /// Creates a text node.
    #[must_use]
    pub fn text(content: impl Into<String>, span: Span) -> Self {
        Self::GenericText {
            content: content.into(),
            span,
        }
    }

    /// Creates a sequence node spanning both halves.
    #[must_use]
    pub fn sequence(head: Node, tail: Node) -> Self {
        let span = head.span().to(tail.span());
        Self::Sequence {
            head: Box::new(head),
            tail: Box::new(tail),
            span,
        }
    }

    /// Returns the source span of this node.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::PlainFunctionCall(call) | Self::ExplicitFunctionCall(call) => call.span,
            Self::GenericText { span, .. } | Self::Sequence { span, .. } => *span,
        }
    }

    /// Returns a short name for this node's variant.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::PlainFunctionCall(_) => "PlainFunctionCall",
            Self::ExplicitFunctionCall(_) => "ExplicitFunctionCall",
            Self::GenericText { .. } => "GenericText",
            Self::Sequence { .. } => "Sequence",
        }
    }

    /// Returns true if this is any kind of function call.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        matches!(
            self,
            Self::PlainFunctionCall(_) | Self::ExplicitFunctionCall(_)
        )
    }

    /// Returns true if this is generic text.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::GenericText { .. })
    }

    /// Returns the call if this is a plain or explicit function call.
    #[must_use]
    pub const fn as_call(&self) -> Option<&Call> {
        match self {
            Self::PlainFunctionCall(call) | Self::ExplicitFunctionCall(call) => Some(call),
            _ => None,
        }
    }

    /// Returns the resolved content if this is generic text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::GenericText { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Returns the elements of a sequence chain in order.
    ///
    /// Non-sequence nodes yield themselves.
    #[must_use]
    pub fn segments(&self) -> Vec<&Node> {
        let mut segments = Vec::new();
        let mut current = self;
        while let Self::Sequence { head, tail, .. } = current {
            segments.push(head.as_ref());
            current = tail;
        }
        segments.push(current);
        segments
    }

    /// Returns true if the node contains no calls at any depth.
    #[must_use]
    pub fn is_plain_text(&self) -> bool {
        self.segments().iter().all(|segment| segment.is_text())
    }

    /// Compares two trees ignoring spans.
    #[must_use]
    pub fn same_shape(&self, other: &Node) -> bool {
        match (self, other) {
            (Self::PlainFunctionCall(a), Self::PlainFunctionCall(b))
            | (Self::ExplicitFunctionCall(a), Self::ExplicitFunctionCall(b)) => {
                a.name == b.name
                    && a.arguments.len() == b.arguments.len()
                    && a
                        .arguments
                        .iter()
                        .zip(&b.arguments)
                        .all(|(x, y)| x.same_shape(y))
            }
            (Self::GenericText { content: a, .. }, Self::GenericText { content: b, .. }) => a == b,
            (
                Self::Sequence {
                    head: ha, tail: ta, ..
                },
                Self::Sequence {
                    head: hb, tail: tb, ..
                },
            ) => ha.same_shape(hb) && ta.same_shape(tb),
            _ => false,
        }
    }
}
