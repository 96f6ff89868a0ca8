//! Integration tests for the recognizer
//!
//! Tests recognition of evaluation strings into trees.

use mushcode_syntax::{ErrorKind, Node, ParserConfig, TokenKind, parse, parse_with_config};

fn call_name(node: &Node) -> &str {
    node.as_call().map(|c| c.name.as_str()).expect("expected a call")
}

// =============================================================================
// Alternatives
// =============================================================================

#[test]
fn bare_call_is_never_text() {
    let node = parse("add(1,2)").unwrap();
    assert!(matches!(node, Node::PlainFunctionCall(_)));
    assert_eq!(call_name(&node), "add");
}

#[test]
fn bracketed_call() {
    let node = parse("[add(1,2)]").unwrap();
    assert!(matches!(node, Node::ExplicitFunctionCall(_)));
    assert_eq!(call_name(&node), "add");
}

#[test]
fn bare_call_followed_by_more() {
    let node = parse("add(1,2)[mul(3,4)]").unwrap();
    let segments = node.segments();
    assert!(matches!(segments[0], Node::PlainFunctionCall(_)));
    assert!(matches!(segments[1], Node::ExplicitFunctionCall(_)));
}

#[test]
fn bracketed_call_followed_by_more() {
    let node = parse("[a()]b[c()]").unwrap();
    let kinds: Vec<_> = node.segments().iter().map(|n| n.type_name()).collect();
    assert_eq!(
        kinds,
        vec!["ExplicitFunctionCall", "GenericText", "ExplicitFunctionCall"]
    );
}

#[test]
fn plain_text() {
    let node = parse("Hello, world.").unwrap();
    assert_eq!(node.as_text(), Some("Hello, world."));
}

#[test]
fn empty_input_is_empty_text() {
    let node = parse("").unwrap();
    assert_eq!(node.as_text(), Some(""));
    assert_eq!(node.span().len(), 0);
}

// =============================================================================
// Escapes
// =============================================================================

#[test]
fn escaped_call_is_text() {
    let node = parse(r"\[add(1,2)\]").unwrap();
    assert_eq!(node.as_text(), Some("[add(1,2)]"));
}

#[test]
fn escaped_backslash_before_call() {
    let node = parse(r"\\[add(1,2)]").unwrap();
    let segments = node.segments();
    assert_eq!(segments[0].as_text(), Some("\\"));
    assert!(matches!(segments[1], Node::ExplicitFunctionCall(_)));
}

#[test]
fn text_spans_cover_raw_escapes() {
    let source = r"a\[b";
    let node = parse(source).unwrap();
    assert_eq!(node.span().text(source), source);
}

// =============================================================================
// Nesting
// =============================================================================

#[test]
fn bracketed_argument() {
    let node = parse("foo([bar(1,2)])").unwrap();
    let foo = node.as_call().unwrap();
    assert_eq!(foo.name, "foo");
    assert!(matches!(foo.argument(), Node::ExplicitFunctionCall(_)));
    assert_eq!(call_name(foo.argument()), "bar");
}

#[test]
fn deep_nesting_within_limit() {
    let source = format!("{}x{}", "[f(".repeat(60), ")]".repeat(60));
    assert!(parse(&source).is_ok());
}

#[test]
fn strict_config_limits_nesting() {
    let source = format!("{}x{}", "f(".repeat(60), ")".repeat(60));
    let err = parse_with_config(&source, ParserConfig::strict()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LimitExceeded(_)));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unclosed_bracket_reports_end_of_input() {
    let err = parse("[add(1,2)").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::MalformedStructure {
            expected: TokenKind::CloseBracket,
            found: None,
            offset: 9,
            ..
        }
    ));
}

#[test]
fn unclosed_paren_reports_end_of_input() {
    let err = parse("think(").unwrap_err();
    assert_eq!(err.expected(), Some(TokenKind::CloseParen));
    assert_eq!(err.offset(), Some(6));
}

#[test]
fn stray_text_before_closer_is_reported() {
    let err = parse("[f(x)y]").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::MalformedStructure {
            expected: TokenKind::CloseBracket,
            found: Some(TokenKind::FuncChar),
            offset: 5,
            ..
        }
    ));
}

#[test]
fn bracket_inside_argument_is_text() {
    let err = parse("[f(x]").unwrap_err();
    assert_eq!(err.expected(), Some(TokenKind::CloseParen));
    assert!(matches!(
        err.kind,
        ErrorKind::MalformedStructure { found: None, .. }
    ));
}

#[test]
fn error_message_is_readable() {
    let err = parse("[add(1,2)").unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed structure at 1:10: expected ']', found end of input"
    );
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn text_only_reparse_is_idempotent() {
    for source in ["plain", "a b  c", "x)y", "(paren) text"] {
        let first = parse(source).unwrap();
        let text = first.as_text().unwrap();
        let second = parse(text).unwrap();
        assert!(first.same_shape(&second), "{source}");
    }
}

#[test]
fn parses_are_independent() {
    let _ = parse("[broken(");
    let node = parse("ok").unwrap();
    assert_eq!(node.as_text(), Some("ok"));
}
