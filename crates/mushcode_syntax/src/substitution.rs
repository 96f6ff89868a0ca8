//! `%`-substitution scanning.
//!
//! Substitutions are recognized on the token stream, so an escaped `\%`
//! never starts one. Recognition only classifies the code; expansion is
//! left to the evaluator.

use std::fmt;

use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// A recognized `%`-code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Substitution {
    /// What the code stands for.
    pub kind: SubstitutionKind,
    /// Source span from the `%` through the last character of the code.
    pub span: Span,
}

impl Substitution {
    /// Returns the raw source text of the substitution.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }
}

/// The pronoun cases a `%`-code can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pronoun {
    /// `%s`: he, she, it, they.
    Subjective,
    /// `%o`: him, her, it, them.
    Objective,
    /// `%p`: his, her, its, their.
    Possessive,
    /// `%a`: his, hers, its, theirs.
    AbsolutePossessive,
}

/// Classification of a `%`-code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubstitutionKind {
    /// `%0` through `%9`.
    Argument(u8),
    /// `%q<x>` or `%q<name>`.
    Register(String),
    /// `%v?`, `%w?` or `%x?`: a single-letter attribute on the executor.
    Variable {
        /// `v`, `w` or `x`.
        bank: char,
        /// The letter naming the attribute.
        slot: char,
    },
    /// `%b`
    Space,
    /// `%r`
    Newline,
    /// `%t`
    Tab,
    /// `%#`
    EnactorDbref,
    /// `%n` or `%N`.
    EnactorName {
        /// Uppercase form.
        capitalized: bool,
    },
    /// `%~`
    AccentedName,
    /// `%k` or `%K`.
    Moniker {
        /// Uppercase form.
        capitalized: bool,
    },
    /// `%s %o %p %a` and their uppercase forms.
    Pronoun {
        /// Which case.
        pronoun: Pronoun,
        /// Uppercase form.
        capitalized: bool,
    },
    /// `%@`
    CallerDbref,
    /// `%!`
    ExecutorDbref,
    /// `%l`
    LocationDbref,
    /// `%c`
    LastCommand,
    /// `%u`
    EvaluatedCommand,
    /// `%?`
    InvocationDepth,
    /// `%+`
    ArgumentCount,
    /// `%i<n>`: text of the nth enclosing iteration.
    IterationText(u32),
    /// `%$<n>`: text of the nth enclosing switch.
    SwitchText(u32),
    /// `%%`
    Percent,
    /// An unrecognized code.
    Unknown(char),
    /// A `%` with nothing after it, or a code missing its operand.
    Incomplete,
}

impl fmt::Display for SubstitutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argument(n) => write!(f, "argument {n}"),
            Self::Register(name) => write!(f, "register {name}"),
            Self::Variable { bank, slot } => write!(f, "variable {bank}{slot}"),
            Self::Space => f.write_str("space"),
            Self::Newline => f.write_str("newline"),
            Self::Tab => f.write_str("tab"),
            Self::EnactorDbref => f.write_str("enactor dbref"),
            Self::EnactorName { .. } => f.write_str("enactor name"),
            Self::AccentedName => f.write_str("accented name"),
            Self::Moniker { .. } => f.write_str("moniker"),
            Self::Pronoun { pronoun, .. } => write!(f, "{pronoun:?} pronoun"),
            Self::CallerDbref => f.write_str("caller dbref"),
            Self::ExecutorDbref => f.write_str("executor dbref"),
            Self::LocationDbref => f.write_str("location dbref"),
            Self::LastCommand => f.write_str("last command"),
            Self::EvaluatedCommand => f.write_str("evaluated command"),
            Self::InvocationDepth => f.write_str("invocation depth"),
            Self::ArgumentCount => f.write_str("argument count"),
            Self::IterationText(n) => write!(f, "iteration text {n}"),
            Self::SwitchText(n) => write!(f, "switch text {n}"),
            Self::Percent => f.write_str("literal percent"),
            Self::Unknown(c) => write!(f, "unknown code {c:?}"),
            Self::Incomplete => f.write_str("incomplete"),
        }
    }
}

/// Finds every substitution in source.
#[must_use]
pub fn substitutions(source: &str) -> Vec<Substitution> {
    scan_substitutions(&Lexer::tokenize_all(source))
}

/// Finds every substitution in an already tokenized stream.
#[must_use]
pub fn scan_substitutions(tokens: &[Token]) -> Vec<Substitution> {
    let mut found = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind == TokenKind::Percent {
            let (kind, consumed) = classify(&tokens[i + 1..]);
            let last = tokens[i + consumed].span;
            found.push(Substitution {
                kind,
                span: tokens[i].span.to(last),
            });
            i += consumed + 1;
        } else {
            i += 1;
        }
    }
    found
}

/// Classifies the code following a `%`.
///
/// Returns the kind and how many tokens after the `%` it used.
fn classify(rest: &[Token]) -> (SubstitutionKind, usize) {
    let Some(code) = rest.first() else {
        return (SubstitutionKind::Incomplete, 0);
    };

    let kind = match code.lexeme {
        c @ '0'..='9' => SubstitutionKind::Argument(c as u8 - b'0'),
        'q' | 'Q' => return classify_register(&rest[1..]),
        bank @ ('v' | 'V' | 'w' | 'W' | 'x' | 'X') => {
            return match rest.get(1) {
                Some(slot) if slot.lexeme.is_ascii_alphabetic() => (
                    SubstitutionKind::Variable {
                        bank: bank.to_ascii_lowercase(),
                        slot: slot.lexeme.to_ascii_lowercase(),
                    },
                    2,
                ),
                Some(_) => (SubstitutionKind::Unknown(bank), 1),
                None => (SubstitutionKind::Incomplete, 1),
            };
        }
        c @ ('i' | 'I') => {
            return classify_counter(c, &rest[1..], SubstitutionKind::IterationText);
        }
        '$' => return classify_counter('$', &rest[1..], SubstitutionKind::SwitchText),
        'b' | 'B' => SubstitutionKind::Space,
        'r' | 'R' => SubstitutionKind::Newline,
        't' | 'T' => SubstitutionKind::Tab,
        '#' => SubstitutionKind::EnactorDbref,
        c @ ('n' | 'N') => SubstitutionKind::EnactorName {
            capitalized: c.is_ascii_uppercase(),
        },
        '~' => SubstitutionKind::AccentedName,
        c @ ('k' | 'K') => SubstitutionKind::Moniker {
            capitalized: c.is_ascii_uppercase(),
        },
        c @ ('s' | 'S' | 'o' | 'O' | 'p' | 'P' | 'a' | 'A') => SubstitutionKind::Pronoun {
            pronoun: match c.to_ascii_lowercase() {
                's' => Pronoun::Subjective,
                'o' => Pronoun::Objective,
                'p' => Pronoun::Possessive,
                _ => Pronoun::AbsolutePossessive,
            },
            capitalized: c.is_ascii_uppercase(),
        },
        '@' => SubstitutionKind::CallerDbref,
        '!' => SubstitutionKind::ExecutorDbref,
        'l' | 'L' => SubstitutionKind::LocationDbref,
        'c' | 'C' => SubstitutionKind::LastCommand,
        'u' | 'U' => SubstitutionKind::EvaluatedCommand,
        '?' => SubstitutionKind::InvocationDepth,
        '+' => SubstitutionKind::ArgumentCount,
        '%' => SubstitutionKind::Percent,
        other => SubstitutionKind::Unknown(other),
    };
    (kind, 1)
}

/// `%q` followed by one alphanumeric, or a `<name>` group.
fn classify_register(rest: &[Token]) -> (SubstitutionKind, usize) {
    match rest.first() {
        None => (SubstitutionKind::Incomplete, 1),
        Some(token) if token.lexeme.is_ascii_alphanumeric() => (
            SubstitutionKind::Register(token.lexeme.to_ascii_lowercase().to_string()),
            2,
        ),
        Some(token) if token.lexeme == '<' => {
            let Some(close) = rest.iter().position(|t| t.lexeme == '>') else {
                return (SubstitutionKind::Incomplete, rest.len() + 1);
            };
            let name: String = rest[1..close].iter().map(|t| t.lexeme).collect();
            (SubstitutionKind::Register(name.to_ascii_lowercase()), close + 2)
        }
        Some(_) => (SubstitutionKind::Unknown('q'), 1),
    }
}

/// `%i` or `%$` followed by a run of digits.
fn classify_counter(
    code: char,
    rest: &[Token],
    make: fn(u32) -> SubstitutionKind,
) -> (SubstitutionKind, usize) {
    let digits: String = rest
        .iter()
        .map(|t| t.lexeme)
        .take_while(char::is_ascii_digit)
        .collect();

    if digits.is_empty() {
        let kind = if rest.is_empty() {
            SubstitutionKind::Incomplete
        } else {
            SubstitutionKind::Unknown(code)
        };
        return (kind, 1);
    }

    match digits.parse() {
        Ok(n) => (make(n), digits.len() + 1),
        Err(_) => (SubstitutionKind::Incomplete, digits.len() + 1),
    }
}
