use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{error, LevelFilter};

use mylang::lexer::Keywords;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interpreter for the mylang scripting language.")]
struct Cli {
    /// Source file to run. Without it, starts an interactive session.
    file: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = LogLevel::Info)]
    verbosity: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    simple_logger::SimpleLogger::new()
        .with_level(cli.verbosity.into())
        .init()
        .expect("the logger is only ever initialized once, at startup");

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let result = match &cli.file {
        Some(path) => run_file(path, &mut handle),
        None => run_repl(&mut handle),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run_file(path: &PathBuf, output: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    mylang::run_source(&source, &path.to_string_lossy(), output)
}

/// Accumulate lines until the configured quit keyword appears on its own
/// line, then run the whole buffer as one program. EOF or an interrupted
/// read also ends the session with whatever was accumulated so far.
fn run_repl(output: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    let quit = Keywords::default().quit;

    let stdin = io::stdin();
    let mut buffer = String::new();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim() == quit {
            break;
        }
        buffer.push_str(&line);
        buffer.push('\n');
    }

    if buffer.trim().is_empty() {
        return Ok(());
    }

    mylang::run_source(&buffer, "<repl>", output)
}
