//! Integration tests for %-substitution scanning

use mushcode_syntax::{Pronoun, SubstitutionKind, scan_substitutions, substitutions, tokenize};

#[test]
fn codes_in_running_text() {
    let source = "%N hands %o the %0.%r";
    let found: Vec<_> = substitutions(source)
        .iter()
        .map(|s| s.text(source).to_string())
        .collect();
    assert_eq!(found, vec!["%N", "%o", "%0", "%r"]);
}

#[test]
fn classification() {
    let kinds: Vec<_> = substitutions("%o%#%+%?").into_iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SubstitutionKind::Pronoun {
                pronoun: Pronoun::Objective,
                capitalized: false
            },
            SubstitutionKind::EnactorDbref,
            SubstitutionKind::ArgumentCount,
            SubstitutionKind::InvocationDepth,
        ]
    );
}

#[test]
fn works_on_existing_tokens() {
    let tokens = tokenize("x %q<score> y");
    let found = scan_substitutions(&tokens);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, SubstitutionKind::Register("score".into()));
}

#[test]
fn substitutions_inside_calls_are_found() {
    assert_eq!(substitutions("[add(%0,%1)]").len(), 2);
}

#[test]
fn escaped_percent_is_literal() {
    assert!(substitutions(r"100\%").is_empty());
}
