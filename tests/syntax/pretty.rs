//! Integration tests for the unparser and tree printer

use mushcode_syntax::parse;
use mushcode_syntax::pretty::{escape_text, format_tree, to_source};

fn assert_round_trip(source: &str) {
    let node = parse(source).unwrap();
    let rendered = to_source(&node);
    let again = parse(&rendered).unwrap();
    assert!(node.same_shape(&again), "{source} -> {rendered}");
}

#[test]
fn round_trips() {
    for source in [
        "add(1,2)",
        "You have [add(1,2)] apples",
        "foo([bar(1,2)])",
        r"\[not a call\]",
        "f((a,b),  c)",
        "[switch(%0,1,one,2,two,other)]",
        "x)y",
        r"a\\b",
        "",
    ] {
        assert_round_trip(source);
    }
}

#[test]
fn canonical_source_for_calls() {
    let node = parse("add(1, 2)").unwrap();
    assert_eq!(to_source(&node), "add(1,2)");
}

#[test]
fn escaped_text_reads_back_literally() {
    let text = "[a(b), c; d]";
    let node = parse(&escape_text(text)).unwrap();
    assert_eq!(node.as_text(), Some(text));
}

#[test]
fn tree_dump_names_every_node() {
    let dump = format_tree(&parse("a [f(b)]").unwrap());
    assert_eq!(
        dump,
        "Sequence\n  GenericText \"a \"\n  ExplicitFunctionCall f/1\n    GenericText \"b\"\n"
    );
}
