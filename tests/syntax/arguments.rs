//! Integration tests for argument splitting

use mushcode_syntax::{Node, function_calls, parse};

fn argument_texts(source: &str) -> Vec<String> {
    let node = parse(source).unwrap();
    let call = node.as_call().unwrap();
    call.arguments
        .iter()
        .map(|a| a.as_text().unwrap_or("<call>").to_string())
        .collect()
}

#[test]
fn commas_split_arguments() {
    assert_eq!(argument_texts("add(1,2,3)"), vec!["1", "2", "3"]);
}

#[test]
fn nested_call_commas_stay_nested() {
    let node = parse("add([mul(2,3)],4)").unwrap();
    let add = node.as_call().unwrap();
    assert_eq!(add.arity(), 2);
    assert_eq!(add.argument().as_call().unwrap().arity(), 2);
    assert_eq!(add.arguments[1].as_text(), Some("4"));
}

#[test]
fn parenthesized_text_keeps_commas() {
    assert_eq!(argument_texts("f((a,b),c)"), vec!["(a,b)", "c"]);
}

#[test]
fn escaped_commas_are_text() {
    assert_eq!(argument_texts(r"f(a\,b,c)"), vec!["a,b", "c"]);
}

#[test]
fn empty_call_has_one_empty_argument() {
    assert_eq!(argument_texts("time()"), vec![""]);
}

#[test]
fn empty_arguments_between_commas() {
    assert_eq!(argument_texts("f(,,)"), vec!["", "", ""]);
}

#[test]
fn braces_do_not_group_arguments() {
    assert_eq!(argument_texts("f({a,b})"), vec!["{a", "b}"]);
}

#[test]
fn calls_are_handed_over_with_arguments() {
    let node = parse("[setq(0,[add(1,2)])]").unwrap();
    let calls = function_calls(&node);
    let summary: Vec<_> = calls.iter().map(|c| (c.name.as_str(), c.arity())).collect();
    assert_eq!(summary, vec![("setq", 2), ("add", 2)]);
    assert!(matches!(calls[0].arguments[1], Node::ExplicitFunctionCall(_)));
}
