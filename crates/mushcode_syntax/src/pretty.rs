//! Unparser and tree printer.
//!
//! [`to_source`] turns a tree back into softcode that recognizes to the
//! same shape. [`format_tree`] renders an indented dump for humans.
//!
//! # Example
//!
//! ```
//! use mushcode_syntax::{parse, pretty::to_source};
//!
//! let node = parse("You have [add(1,2)] apples").unwrap();
//! assert_eq!(to_source(&node), "You have [add(1,2)] apples");
//! ```

use std::fmt::Write;

use crate::ast::{Call, Node};
use crate::token::TokenKind;

/// Configuration for tree printing.
#[derive(Debug, Clone)]
pub struct PrettyConfig {
    /// Number of spaces for each indentation level.
    pub indent_width: usize,
    /// Whether to append byte ranges to each line.
    pub show_spans: bool,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            show_spans: false,
        }
    }
}

/// Renders a tree back to softcode.
#[must_use]
pub fn to_source(node: &Node) -> String {
    let mut output = String::new();
    write_source(&mut output, node);
    output
}

/// Escapes text so that every character reads back literally.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || TokenKind::from_punctuation(c).is_some() {
            output.push('\\');
        }
        output.push(c);
    }
    output
}

fn write_source(output: &mut String, node: &Node) {
    match node {
        Node::PlainFunctionCall(call) => write_call(output, call),
        Node::ExplicitFunctionCall(call) => {
            output.push('[');
            write_call(output, call);
            output.push(']');
        }
        Node::GenericText { content, .. } => output.push_str(&escape_text(content)),
        Node::Sequence { head, tail, .. } => {
            write_source(output, head);
            write_source(output, tail);
        }
    }
}

fn write_call(output: &mut String, call: &Call) {
    output.push_str(&call.name);
    output.push('(');
    for (i, argument) in call.arguments.iter().enumerate() {
        let rendered = to_source(argument);
        if i > 0 {
            output.push(',');
            // The lexer swallows one space after a bare comma.
            if rendered.starts_with(' ') {
                output.push('\\');
            }
        }
        output.push_str(&rendered);
    }
    output.push(')');
}

/// Renders an indented dump of a tree.
#[must_use]
pub fn format_tree(node: &Node) -> String {
    format_tree_with_config(node, &PrettyConfig::default())
}

/// Renders an indented dump of a tree with custom configuration.
#[must_use]
pub fn format_tree_with_config(node: &Node, config: &PrettyConfig) -> String {
    let mut printer = TreePrinter {
        config,
        output: String::new(),
        indent_level: 0,
    };
    printer.print(node);
    printer.output
}

/// Tree printer state.
struct TreePrinter<'a> {
    config: &'a PrettyConfig,
    output: String,
    indent_level: usize,
}

impl TreePrinter<'_> {
    fn print(&mut self, node: &Node) {
        self.write_indent();
        match node {
            Node::PlainFunctionCall(call) | Node::ExplicitFunctionCall(call) => {
                let _ = write!(
                    self.output,
                    "{} {}/{}",
                    node.type_name(),
                    call.name,
                    call.arity()
                );
                self.finish_line(node);
                self.print_children(&call.arguments);
            }
            Node::GenericText { content, .. } => {
                let _ = write!(self.output, "GenericText {content:?}");
                self.finish_line(node);
            }
            Node::Sequence { .. } => {
                self.output.push_str("Sequence");
                self.finish_line(node);
                self.print_children(node.segments());
            }
        }
    }

    fn print_children<'n>(&mut self, children: impl IntoIterator<Item = &'n Node>) {
        self.indent_level += 1;
        for child in children {
            self.print(child);
        }
        self.indent_level -= 1;
    }

    fn finish_line(&mut self, node: &Node) {
        if self.config.show_spans {
            let span = node.span();
            let _ = write!(self.output, " @{}..{}", span.start, span.end);
        }
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        let width = self.indent_level * self.config.indent_width;
        self.output.extend(std::iter::repeat_n(' ', width));
    }
}
