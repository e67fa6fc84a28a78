mod commands;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{error::ErrorKind, Parser};
use revstack_hg::HgError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::Commands;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "REVSTACK_LOG";

/// Exit status for usage and precondition errors.
const EXIT_USAGE: i32 = 2;
/// Exit status for every other failure.
const EXIT_FATAL: i32 = 128;

#[derive(Parser)]
#[command(
    name = "revstack",
    about = "Keep a stack of Mercurial commits consistent after amends",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Run as if started in <path>
    #[arg(short = 'C', global = true)]
    change_dir: Option<PathBuf>,

    /// Pin the username and force evolve on, whatever the local setup
    #[arg(long, global = true)]
    safe_mode: bool,

    /// Log every hg invocation
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Usage errors get their own exit status so wrappers can tell them apart.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<HgError>() {
        Some(e) if e.is_usage() => EXIT_USAGE,
        _ => EXIT_FATAL,
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(EXIT_USAGE),
            }
        }
    };

    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("fatal: {e}");
            process::exit(exit_code(&e));
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    commands::run(cli)
}
