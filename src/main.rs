use std::{fs, io, path::PathBuf, process::ExitCode};

use clap::Parser;
use plotscript::interpreter::Interpreter;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// plotscript evaluates Scheme-like programs and prints the resulting
/// expression.
///
/// Without a file or an expression, the program is read from standard input.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// A file holding the program to evaluate.
    file: Option<PathBuf>,

    /// Evaluates the given program text instead of a file.
    #[arg(short, long, conflicts_with = "file")]
    expression: Option<String>,

    /// Prints interpreter debug logs to standard error.
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.debug
       && let Err(e) = TermLogger::init(LevelFilter::Debug,
                                        Config::default(),
                                        TerminalMode::Stderr,
                                        ColorChoice::Auto)
    {
        eprintln!("Warning: could not install the debug logger: {e}");
    }

    let mut interp = Interpreter::new();

    let parsed = match (&args.file, &args.expression) {
        (Some(path), _) => match fs::File::open(path) {
            Ok(file) => interp.parse_stream(file),
            Err(_) => {
                eprintln!("Error: Could not open file {} for reading.", path.display());
                return ExitCode::FAILURE;
            },
        },
        (None, Some(source)) => interp.parse_stream(source.as_bytes()),
        (None, None) => interp.parse_stream(io::stdin().lock()),
    };

    if !parsed {
        eprintln!("Error: Invalid Program. Could not parse.");
        return ExitCode::FAILURE;
    }

    match interp.evaluate() {
        Ok(result) => {
            println!("{result}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
