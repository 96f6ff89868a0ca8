//! Integration tests for command-list splitting

use mushcode_syntax::{Node, parse_command_list};

#[test]
fn typical_command_list() {
    let commands = parse_command_list("@emit Hello; think [add(1,2)]; look");
    let names: Vec<_> = commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["@emit", "think", "look"]);
    assert_eq!(commands[0].argument.as_deref(), Some("Hello"));
    assert_eq!(commands[2].argument, None);
}

#[test]
fn spans_point_into_the_list() {
    let source = "a;  bb cc";
    let commands = parse_command_list(source);
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[1].span.text(source), "bb cc");
}

#[test]
fn braced_actions_are_one_command() {
    let commands = parse_command_list("@dolist 1 2={@emit ##; think ##}; @emit done");
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0].source, "@dolist 1 2={@emit ##; think ##}");
}

#[test]
fn arguments_recognize_as_evaluation_strings() {
    let commands = parse_command_list("think [add(1,2)] apples");
    let node = commands[0].parse_argument().unwrap().unwrap();
    assert!(matches!(node.segments()[0], Node::ExplicitFunctionCall(_)));
}

#[test]
fn escaped_separators_stay_put() {
    let commands = parse_command_list(r"say one\; two");
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].argument.as_deref(), Some(r"one\; two"));
}
