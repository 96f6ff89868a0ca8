//! Read-only traversal of evaluation-string trees.
//!
//! Evaluators hook in here: [`NodeVisitor::enter_call`] hands over each
//! call's name and arguments, outermost first.
//!
//! # Example
//!
//! ```
//! use mushcode_syntax::{parse, Call};
//! use mushcode_syntax::visitor::{NodeVisitor, walk_node};
//!
//! struct Names(Vec<String>);
//!
//! impl NodeVisitor for Names {
//!     fn enter_call(&mut self, call: &Call, _explicit: bool) {
//!         self.0.push(call.name.clone());
//!     }
//! }
//!
//! let node = parse("add(1,[mul(2,3)])").unwrap();
//! let mut names = Names(Vec::new());
//! walk_node(&mut names, &node);
//! assert_eq!(names.0, vec!["add", "mul"]);
//! ```

use crate::ast::{Call, Node};
use crate::span::Span;

/// Trait for read-only tree visitors.
///
/// The default implementations do nothing. Use [`walk_node`] to drive
/// the traversal.
#[allow(unused_variables)]
pub trait NodeVisitor {
    /// Called when entering any node.
    fn enter_node(&mut self, node: &Node) {}

    /// Called when leaving any node, after its children.
    fn leave_node(&mut self, node: &Node) {}

    /// Called before a call's arguments are visited.
    fn enter_call(&mut self, call: &Call, explicit: bool) {}

    /// Called after a call's arguments are visited.
    fn leave_call(&mut self, call: &Call, explicit: bool) {}

    /// Visit a run of generic text.
    fn visit_text(&mut self, content: &str, span: Span) {}
}

/// Walks a tree depth-first, calling visitor methods in source order.
pub fn walk_node<V: NodeVisitor + ?Sized>(visitor: &mut V, node: &Node) {
    visitor.enter_node(node);

    match node {
        Node::PlainFunctionCall(call) | Node::ExplicitFunctionCall(call) => {
            let explicit = matches!(node, Node::ExplicitFunctionCall(_));
            visitor.enter_call(call, explicit);
            for argument in &call.arguments {
                walk_node(visitor, argument);
            }
            visitor.leave_call(call, explicit);
        }
        Node::GenericText { content, span } => visitor.visit_text(content, *span),
        Node::Sequence { head, tail, .. } => {
            walk_node(visitor, head);
            walk_node(visitor, tail);
        }
    }

    visitor.leave_node(node);
}

/// Returns every call in the tree, outermost first, in source order.
#[must_use]
pub fn function_calls(node: &Node) -> Vec<&Call> {
    fn collect<'a>(node: &'a Node, calls: &mut Vec<&'a Call>) {
        match node {
            Node::PlainFunctionCall(call) | Node::ExplicitFunctionCall(call) => {
                calls.push(call);
                for argument in &call.arguments {
                    collect(argument, calls);
                }
            }
            Node::GenericText { .. } => {}
            Node::Sequence { head, tail, .. } => {
                collect(head, calls);
                collect(tail, calls);
            }
        }
    }

    let mut calls = Vec::new();
    collect(node, &mut calls);
    calls
}

/// Summary counts gathered in one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Bracketed calls.
    pub explicit_calls: usize,
    /// Bare calls.
    pub plain_calls: usize,
    /// Text runs.
    pub text_runs: usize,
    /// Deepest call nesting; 0 for text-only trees.
    pub max_call_depth: usize,
}

#[derive(Default)]
struct StatsVisitor {
    stats: TreeStats,
    depth: usize,
}

impl NodeVisitor for StatsVisitor {
    fn enter_call(&mut self, _call: &Call, explicit: bool) {
        if explicit {
            self.stats.explicit_calls += 1;
        } else {
            self.stats.plain_calls += 1;
        }
        self.depth += 1;
        self.stats.max_call_depth = self.stats.max_call_depth.max(self.depth);
    }

    fn leave_call(&mut self, _call: &Call, _explicit: bool) {
        self.depth -= 1;
    }

    fn visit_text(&mut self, _content: &str, _span: Span) {
        self.stats.text_runs += 1;
    }
}

/// Counts calls and text runs in a tree.
#[must_use]
pub fn tree_stats(node: &Node) -> TreeStats {
    let mut visitor = StatsVisitor::default();
    walk_node(&mut visitor, node);
    visitor.stats
}
