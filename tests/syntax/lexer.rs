//! Integration tests for the lexer
//!
//! Tests escape-aware tokenization of softcode.

use mushcode_syntax::{Lexer, LexerConfig, Span, TokenKind, tokenize};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

// =============================================================================
// Token Alphabet
// =============================================================================

#[test]
fn every_alphanumeric_is_a_name_character() {
    assert!(kinds("azAZ09").iter().all(|k| *k == TokenKind::FuncChar));
}

#[test]
fn structural_characters() {
    assert_eq!(
        kinds("[f(x)]"),
        vec![
            TokenKind::OpenBracket,
            TokenKind::FuncChar,
            TokenKind::OpenParen,
            TokenKind::FuncChar,
            TokenKind::CloseParen,
            TokenKind::CloseBracket,
        ]
    );
}

#[test]
fn whitespace_and_symbols_are_other() {
    assert_eq!(
        kinds(" \t\n-_#"),
        vec![TokenKind::Other; 6]
    );
}

// =============================================================================
// Escaping
// =============================================================================

#[test]
fn escape_emits_no_token_of_its_own() {
    let tokens = tokenize(r"\(");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Other);
    assert_eq!(tokens[0].lexeme, '(');
}

#[test]
fn escaped_backslash_is_unescape() {
    assert_eq!(kinds(r"a\\b"), vec![
        TokenKind::FuncChar,
        TokenKind::Unescape,
        TokenKind::FuncChar,
    ]);
}

#[test]
fn escaping_returns_to_default_after_one_character() {
    assert_eq!(kinds(r"\[["), vec![TokenKind::Other, TokenKind::OpenBracket]);
}

#[test]
fn trailing_backslash_is_silent() {
    assert_eq!(kinds("x\\"), vec![TokenKind::FuncChar]);
    assert!(kinds("\\").is_empty());
}

#[test]
fn resolve_matches_lexemes() {
    let source = r"say \[hi\] \\o/";
    let lexemes: String = tokenize(source).iter().map(|t| t.lexeme).collect();
    assert_eq!(lexemes, Lexer::resolve(source));
    assert_eq!(lexemes, r"say [hi] \o/");
}

// =============================================================================
// Separator Spaces
// =============================================================================

#[test]
fn semicolon_absorbs_one_space() {
    let tokens = tokenize("a; b");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].kind, TokenKind::Semicolon);
    assert_eq!(tokens[1].span, Span::new(1, 3, 1, 2));
}

#[test]
fn other_punctuation_does_not_absorb() {
    assert_eq!(kinds("a= b").len(), 4);
}

#[test]
fn verbatim_config_keeps_space() {
    let tokens: Vec<_> = Lexer::with_config("a; b", LexerConfig::verbatim()).collect();
    assert_eq!(tokens.len(), 4);
}

// =============================================================================
// Spans
// =============================================================================

#[test]
fn spans_tile_the_input() {
    let source = r"x, [f(\,y)] \\\;z";
    let tokens = tokenize(source);
    let mut offset = 0;
    for token in &tokens {
        assert_eq!(token.span.start, offset);
        offset = token.span.end;
    }
    assert_eq!(offset, source.len());
}

#[test]
fn lines_and_columns() {
    let tokens = tokenize("a\n  b");
    let b = tokens.last().expect("token");
    assert_eq!((b.span.line, b.span.column), (2, 3));
}
