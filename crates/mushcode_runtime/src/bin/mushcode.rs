//! Command-line entry point for the softcode recognizer.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use mushcode_runtime::{OutputMode, Repl, ReplConfig};
use mushcode_syntax::{LexerConfig, ParserConfig};
use thiserror::Error;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    show_tokens: bool,
    verbatim: bool,
    trace: bool,
    max_depth: Option<usize>,
}

/// Failures surfaced to the user.
#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Syntax(#[from] mushcode_syntax::Error),
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Syntax(e)) if e.context.is_some() => {
            let context = e.context.as_ref().map(ToString::to_string).unwrap_or_default();
            eprintln!("\x1b[31mError: {e} ({context})\x1b[0m");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, CliError> {
    let mut config = CliConfig::default();

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--tokens" => config.show_tokens = true,
            "--verbatim" => config.verbatim = true,
            "--trace" => config.trace = true,
            "--max-depth" => {
                let value = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--max-depth requires a value".into()))?;
                config.max_depth = Some(value.parse().map_err(|_| {
                    CliError::Usage(format!("invalid --max-depth value: {value}"))
                })?);
            }
            arg if arg.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown option: {arg}")));
            }
            path => config.files.push(PathBuf::from(path)),
        }
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), CliError> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("mushcode {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if config.trace {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(std::io::stderr)
            .init();
    }

    let mut parser = ParserConfig::default();
    if config.verbatim {
        parser = parser.with_lexer(LexerConfig::verbatim());
    }
    if let Some(max_depth) = config.max_depth {
        parser = parser.with_max_depth(max_depth);
    }

    let mut repl = Repl::new()?.with_config(ReplConfig {
        parser,
        output: if config.show_tokens {
            OutputMode::Tokens
        } else {
            OutputMode::Tree
        },
        ..ReplConfig::default()
    });

    for file in &config.files {
        repl.eval_file(file)?;
    }

    if config.batch_mode {
        return Ok(());
    }

    // Context is already on screen after loading files.
    if !config.files.is_empty() {
        repl = repl.without_banner();
    }

    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mmushcode\x1b[0m - MUSH softcode tokenizer and recognizer

\x1b[1mUSAGE:\x1b[0m
    mushcode [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Files to recognize line by line before starting the REPL

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -b, --batch        Recognize files and exit (no REPL)
    --tokens           Print token streams instead of trees
    --verbatim         Keep the space after ',' and ';' as text
    --max-depth N      Limit evaluation-string nesting to N levels

\x1b[1mDEBUG OPTIONS:\x1b[0m
    --trace            Log recognizer decisions to stderr

\x1b[1mEXAMPLES:\x1b[0m
    mushcode                       Start interactive REPL
    mushcode attrs.txt             Recognize attrs.txt, then start REPL
    mushcode -b attrs.txt          Recognize attrs.txt and exit
    mushcode --tokens -b code.txt  Dump token streams

\x1b[1mREPL COMMANDS:\x1b[0m
    :tree <code>       Show the parse tree
    :tokens <code>     Show the token stream
    :commands <list>   Split a command list
    :help              List every command
    Ctrl+D             Exit REPL
    Ctrl+C             Cancel current input"
    );
}
