//! End-to-end tests over realistic softcode.
//!
//! Each sample is the kind of attribute text found on a live MUSH.

use mushcode::runtime::{OutputMode, Repl, ReplConfig};
use mushcode::syntax::pretty::to_source;
use mushcode::syntax::{Node, function_calls, parse, parse_command_list, substitutions};

const SAMPLES: &[(&str, &[&str])] = &[
    (
        "You have [add(%0,[mul(2,%1)])] coins.",
        &["add", "mul"],
    ),
    (
        "[switch(%0,1,One!,2,Two!,Something else.)]",
        &["switch"],
    ),
    (
        "[iter(lnum(1,5),[add(##,1)])]",
        &["iter", "lnum", "add"],
    ),
    (
        "[setq(0,[get(%#/score)])][if(gt(%q0,10),High,Low)]",
        &["setq", "get", "if", "gt"],
    ),
    (
        r"[ansi(hr,\[Alert\])] %N enters.",
        &["ansi"],
    ),
    (
        "u(me/fn_format,%0)",
        &["u"],
    ),
];

#[test]
fn samples_recognize_with_expected_calls() {
    for (source, expected) in SAMPLES {
        let node = parse(source).unwrap_or_else(|e| panic!("{source}: {e}"));
        let names: Vec<_> = function_calls(&node).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(&names, expected, "{source}");
    }
}

#[test]
fn samples_round_trip() {
    for (source, _) in SAMPLES {
        let node = parse(source).unwrap();
        let again = parse(&to_source(&node)).unwrap();
        assert!(node.same_shape(&again), "{source}");
    }
}

#[test]
fn bare_calls_inside_arguments() {
    // `gt(...)` heads the first argument of `if`, so it is a call.
    let node = parse("[if(gt(%q0,10),High,Low)]").unwrap();
    let if_call = node.as_call().unwrap();
    assert!(matches!(if_call.argument(), Node::PlainFunctionCall(_)));
    assert_eq!(if_call.arguments[1].as_text(), Some("High"));
}

#[test]
fn attribute_with_command_list() {
    let attribute = "$+score *:@pemit %#=[name(%0)] has [get(%0/score)] points.; @trigger me/log=%0";
    let commands = parse_command_list(attribute);
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[1].name, "@trigger");
    assert!(!substitutions(attribute).is_empty());
}

#[test]
fn repl_renders_samples() {
    let mut repl = Repl::new()
        .map(|repl| {
            repl.with_config(ReplConfig {
                output: OutputMode::Source,
                show_banner: false,
                ..ReplConfig::default()
            })
        })
        .ok();
    // Terminal setup can fail in headless environments.
    if let Some(repl) = repl.as_mut() {
        assert_eq!(repl.eval("add(1,2)").unwrap(), "add(1,2)");
    }
}
