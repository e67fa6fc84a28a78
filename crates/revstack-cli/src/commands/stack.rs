use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

use super::{open_stack, RangeArgs};
use crate::Cli;

#[derive(Args)]
pub struct StackCmdArgs {
    #[command(flatten)]
    pub(crate) range: RangeArgs,

    /// Print abbreviated node hashes
    #[arg(long)]
    short: bool,
}

pub fn run(args: &StackCmdArgs, cli: &Cli) -> Result<i32> {
    let hg = open_stack(&args.range, cli)?;
    let commits = hg.commit_stack()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for commit in &commits {
        if args.short {
            writeln!(out, "{}", commit.display_name())?;
        } else {
            writeln!(out, "{} {}", commit.rev, commit.node)?;
        }
    }
    Ok(0)
}
