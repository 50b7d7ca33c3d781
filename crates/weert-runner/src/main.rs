//! `run_examples`: run the shell examples embedded in the WeeRT API
//! markdown documentation, plugging captured output back into the text.
//!
//! Usage:
//!
//! ```text
//! $ run_examples README.md > test.md
//! ```
//!
//! Review test.md; if it looks good, substitute it for README.md.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit code for an unreadable or missing input file.
const EXIT_INPUT_ERROR: u8 = 10;

/// Exit code for a malformed document (extraction error).
const EXIT_EXTRACT_ERROR: u8 = 20;

#[derive(Parser, Debug)]
#[command(
    name = "run_examples",
    version,
    about = "Run the examples in the WeeRT API markdown documentation"
)]
struct Cli {
    /// Markdown file containing the embedded examples
    input: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let file = match File::open(&cli.input) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("run_examples: cannot open {}: {err}", cli.input.display());
            return ExitCode::from(EXIT_INPUT_ERROR);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match weert_runner::run(BufReader::new(file), &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("run_examples: {err}");
            ExitCode::from(EXIT_EXTRACT_ERROR)
        }
    }
}
