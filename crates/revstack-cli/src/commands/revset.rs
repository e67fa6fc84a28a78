use anyhow::{Context, Result};
use clap::Args;

use super::{open_stack, RangeArgs};
use crate::Cli;

#[derive(Args)]
pub struct RevsetArgs {
    #[command(flatten)]
    pub(crate) range: RangeArgs,
}

pub fn run(args: &RevsetArgs, cli: &Cli) -> Result<i32> {
    let hg = open_stack(&args.range, cli)?;
    let revset = hg.revset().context("stack range was not computed")?;
    println!("{}", revset);
    Ok(0)
}
