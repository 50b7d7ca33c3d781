//! `weert-upload`: post loop packets read from stdin to a WeeRT server.
//!
//! Stands in for the weather-station engine's event loop: one JSON loop
//! packet per line (`{"dateTime": <epoch secs>, "<obs>": <num|null>, ...}`).
//! Malformed lines are logged and skipped. On EOF the backlog is drained
//! before exit.

use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use weert_common::LoopPacket;
use weert_uploader::{Uploader, UploaderConfig};

/// Exit code for configuration errors.
const EXIT_CONFIG_ERROR: u8 = 10;

#[derive(Parser, Debug)]
#[command(
    name = "weert-upload",
    version,
    about = "Post weather-station loop packets to a WeeRT measurement endpoint"
)]
struct Cli {
    /// TOML configuration file (defaults apply for omitted keys)
    #[arg(long, short)]
    config: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match UploaderConfig::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("weert-upload: {err}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let uploader = match Uploader::start(&config) {
        Ok(uploader) => uploader,
        Err(err) => {
            eprintln!("weert-upload: {err}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("weert-upload: stdin: {err}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<LoopPacket>(&line) {
            Ok(packet) => uploader.publish(packet),
            Err(err) => warn!(%err, "skipping malformed packet line"),
        }
    }

    uploader.shutdown();
    ExitCode::SUCCESS
}
