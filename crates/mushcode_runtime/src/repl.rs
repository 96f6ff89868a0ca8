//! The main REPL implementation.
//!
//! Every line is recognized, never evaluated: the REPL prints the tree, the
//! tokens, or the canonical source depending on the output mode. Lines
//! starting with `:` are REPL commands.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use mushcode_syntax::pretty::{format_tree, to_source};
use mushcode_syntax::{
    Error, ErrorContext, ParserConfig, Result, Token, parse_command_list, parse_with_config,
    substitutions, tree_stats,
};
use tracing::{debug, info};

use crate::editor::{LineEditor, ReadResult, RustylineEditor, input_is_complete};

/// What the REPL prints for a recognized line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Indented tree dump.
    #[default]
    Tree,
    /// Canonical softcode rebuilt from the tree.
    Source,
    /// The token stream.
    Tokens,
}

impl OutputMode {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "tree" => Some(Self::Tree),
            "source" => Some(Self::Source),
            "tokens" => Some(Self::Tokens),
            _ => None,
        }
    }
}

/// Configuration for the REPL.
#[derive(Clone, Debug)]
pub struct ReplConfig {
    /// Recognizer settings.
    pub parser: ParserConfig,
    /// What to print for each line.
    pub output: OutputMode,
    /// Whether to show the welcome banner.
    pub show_banner: bool,
    /// Primary prompt.
    pub prompt: String,
    /// Continuation prompt (for multi-line input).
    pub continuation_prompt: String,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            output: OutputMode::default(),
            show_banner: true,
            prompt: "mush> ".to_string(),
            continuation_prompt: ".. ".to_string(),
        }
    }
}

/// REPL commands, offered for completion.
const COMMANDS: &[&str] = &[
    ":help", ":quit", ":tree", ":source", ":tokens", ":commands", ":subs", ":calls", ":mode",
];

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    config: ReplConfig,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(mut editor: E) -> Self {
        editor.set_keywords(COMMANDS.iter().map(ToString::to_string).collect());
        Self {
            editor,
            config: ReplConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.config.show_banner = false;
        self
    }

    /// Returns the line editor.
    #[must_use]
    pub const fn editor(&self) -> &E {
        &self.editor
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ReplConfig {
        &self.config
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.config.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => print_error(&e),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(input) = self.read_input()? else {
            return Ok(false);
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(true);
        }
        if trimmed == ":quit" || trimmed == ":q" {
            return Ok(false);
        }

        self.editor.add_history(&input);

        match self.eval(&input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{}", output.trim_end());
                }
            }
            Err(e) => print_error(&e),
        }

        Ok(true)
    }

    /// Reads a potentially multi-line input.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let prompt = if first_line {
                &self.config.prompt
            } else {
                &self.config.continuation_prompt
            };

            match self.editor.read_line(prompt)? {
                ReadResult::Line(line) => {
                    if first_line {
                        input = line;
                    } else {
                        input.push('\n');
                        input.push_str(&line);
                    }

                    if input_is_complete(&input) {
                        return Ok(Some(input));
                    }

                    first_line = false;
                }
                ReadResult::Interrupted => {
                    if !first_line {
                        println!("\nInput cancelled.");
                    }
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    if first_line {
                        return Ok(None);
                    }
                    return Err(Error::internal("unexpected EOF in multi-line input"));
                }
            }
        }
    }

    /// Evaluates one input and returns what should be printed.
    ///
    /// # Errors
    ///
    /// Returns an error if the input does not recognize or a command is
    /// malformed.
    pub fn eval(&mut self, input: &str) -> Result<String> {
        let Some(command) = input.strip_prefix(':') else {
            return self.render(input, self.config.output);
        };

        let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
        match name {
            "help" | "h" => Ok(help_text()),
            "tree" => self.render(rest, OutputMode::Tree),
            "source" => self.render(rest, OutputMode::Source),
            "tokens" => self.render(rest, OutputMode::Tokens),
            "commands" => Ok(format_commands(rest)),
            "subs" => Ok(format_substitutions(rest)),
            "calls" => self.calls(rest),
            "mode" => {
                let mode = OutputMode::from_name(rest.trim()).ok_or_else(|| {
                    Error::internal(format!(
                        "unknown mode '{}': expected tree, source or tokens",
                        rest.trim()
                    ))
                })?;
                self.config.output = mode;
                Ok(format!("output mode: {}", rest.trim()))
            }
            other => Err(Error::internal(format!(
                "unknown command ':{other}', try :help"
            ))),
        }
    }

    /// Evaluates every non-empty line of a source text.
    ///
    /// Errors carry the input name and line number.
    ///
    /// # Errors
    ///
    /// Returns the first line that fails to recognize.
    pub fn eval_source(&mut self, name: &str, source: &str) -> Result<Vec<String>> {
        let mut outputs = Vec::new();
        for (index, line) in source.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let output = self.eval(line).map_err(|e| {
                e.with_context(ErrorContext::new().with_source(name).with_line(index + 1))
            })?;
            outputs.push(output);
        }
        debug!(name, lines = outputs.len(), "evaluated source");
        Ok(outputs)
    }

    /// Loads a file and prints the result of each line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line fails to
    /// recognize.
    pub fn eval_file(&mut self, path: &Path) -> Result<()> {
        info!(path = %path.display(), "loading file");
        let source = fs::read_to_string(path).map_err(|e| {
            Error::internal(format!("failed to read {}: {e}", path.display()))
        })?;

        let name = path.display().to_string();
        for output in self.eval_source(&name, &source)? {
            println!("{}", output.trim_end());
        }
        Ok(())
    }

    fn render(&self, source: &str, mode: OutputMode) -> Result<String> {
        if mode == OutputMode::Tokens {
            let tokens: Vec<Token> =
                mushcode_syntax::Lexer::with_config(source, self.config.parser.lexer).collect();
            return Ok(format_tokens(source, &tokens));
        }

        let node = parse_with_config(source, self.config.parser)?;
        Ok(match mode {
            OutputMode::Source => to_source(&node),
            _ => format_tree(&node),
        })
    }

    fn calls(&self, source: &str) -> Result<String> {
        let node = parse_with_config(source, self.config.parser)?;
        let mut output = String::new();
        for call in mushcode_syntax::function_calls(&node) {
            let _ = writeln!(output, "{}/{}", call.name, call.arity());
        }
        let stats = tree_stats(&node);
        let _ = write!(
            output,
            "{} call(s), {} text run(s), depth {}",
            stats.plain_calls + stats.explicit_calls,
            stats.text_runs,
            stats.max_call_depth
        );
        Ok(output)
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mmushcode\x1b[0m softcode recognizer v{}", env!("CARGO_PKG_VERSION"));
        println!("Type softcode to see its structure, :help for commands, Ctrl+D to exit.\n");

        let _ = io::stdout().flush();
    }
}

fn print_error(error: &Error) {
    match &error.context {
        Some(context) => eprintln!("\x1b[31mError: {error} ({context})\x1b[0m"),
        None => eprintln!("\x1b[31mError: {error}\x1b[0m"),
    }
}

/// Renders one token per line: kind, lexeme and raw text.
fn format_tokens(source: &str, tokens: &[Token]) -> String {
    let mut output = String::new();
    for token in tokens {
        let _ = writeln!(
            output,
            "{:>4}..{:<4} {:<24} {:?} {:?}",
            token.span.start,
            token.span.end,
            format!("{:?}", token.kind),
            token.lexeme,
            token.text(source)
        );
    }
    output
}

fn format_commands(source: &str) -> String {
    let mut output = String::new();
    for (i, command) in parse_command_list(source).iter().enumerate() {
        let _ = write!(output, "{}: {}", i + 1, command.name);
        if let Some(argument) = &command.argument {
            let _ = write!(output, " <- {argument:?}");
        }
        output.push('\n');
    }
    output
}

fn format_substitutions(source: &str) -> String {
    let mut output = String::new();
    for substitution in substitutions(source) {
        let _ = writeln!(
            output,
            "{} {}",
            substitution.text(source),
            substitution.kind
        );
    }
    output
}

fn help_text() -> String {
    "\
Type softcode to see how it is recognized.

Commands:
  :tree <code>      Show the parse tree
  :source <code>    Show canonical softcode rebuilt from the tree
  :tokens <code>    Show the token stream
  :commands <list>  Split a ;-separated command list
  :subs <code>      List %-substitutions
  :calls <code>     List function calls outermost first
  :mode <mode>      Set default output: tree, source or tokens
  :help             Show this help
  :quit             Exit"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple mock editor for testing.
    struct MockEditor {
        inputs: Vec<String>,
        index: usize,
    }

    impl MockEditor {
        fn new(inputs: Vec<&str>) -> Self {
            Self {
                inputs: inputs.into_iter().map(String::from).collect(),
                index: 0,
            }
        }
    }

    impl LineEditor for MockEditor {
        fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
            if self.index < self.inputs.len() {
                let line = self.inputs[self.index].clone();
                self.index += 1;
                Ok(ReadResult::Line(line))
            } else {
                Ok(ReadResult::Eof)
            }
        }

        fn add_history(&mut self, _line: &str) {}

        fn set_keywords(&mut self, _keywords: Vec<String>) {}
    }

    fn repl() -> Repl<MockEditor> {
        Repl::with_editor(MockEditor::new(vec![])).without_banner()
    }

    #[test]
    fn eval_prints_tree_by_default() {
        let output = repl().eval("add(1,2)").unwrap();
        assert!(output.starts_with("PlainFunctionCall add/2"));
    }

    #[test]
    fn eval_source_mode() {
        let mut repl = repl();
        repl.eval(":mode source").unwrap();
        assert_eq!(repl.config().output, OutputMode::Source);
        assert_eq!(repl.eval(r"\[x\]").unwrap(), r"\[x\]");
    }

    #[test]
    fn eval_reports_malformed_input() {
        let err = repl().eval("[add(1,2)").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(repl().eval(":frobnicate").is_err());
        assert!(repl().eval(":mode sideways").is_err());
    }

    #[test]
    fn tokens_command() {
        let output = repl().eval(":tokens a,b").unwrap();
        assert_eq!(output.lines().count(), 3);
        assert!(output.contains("Comma"));
    }

    #[test]
    fn commands_command() {
        let output = repl().eval(":commands look; say hi").unwrap();
        assert_eq!(output, "1: look\n2: say <- \"hi\"\n");
    }

    #[test]
    fn calls_command() {
        let output = repl().eval(":calls f([g(1)])").unwrap();
        assert!(output.starts_with("f/1\ng/1\n"));
        assert!(output.ends_with("depth 2"));
    }

    #[test]
    fn eval_source_adds_line_context() {
        let err = repl()
            .eval_source("attrs.txt", "ok\n\n[broken(\n")
            .unwrap_err();
        let context = err.context.expect("context attached");
        assert_eq!(context.source.as_deref(), Some("attrs.txt"));
        assert_eq!(context.line, Some(3));
    }

    #[test]
    fn run_stops_at_quit() {
        let editor = MockEditor::new(vec!["add(1,2)", ":quit", "never read"]);
        let mut repl = Repl::with_editor(editor).without_banner();
        repl.run().unwrap();
        assert_eq!(repl.editor.index, 2);
    }

    #[test]
    fn multi_line_input_is_joined() {
        let editor = MockEditor::new(vec!["[add(1,", "2)]"]);
        let mut repl = Repl::with_editor(editor).without_banner();
        let input = repl.read_input().unwrap();
        assert_eq!(input.as_deref(), Some("[add(1,\n2)]"));
    }
}
