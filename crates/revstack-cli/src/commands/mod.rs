pub mod finalize;
pub mod revset;
pub mod stack;

use anyhow::Result;
use clap::{Args, Subcommand};
use revstack_config::{env::EnvOverrides, ToolConfig};
use revstack_hg::{HgRunner, Mercurial, StackArgs, AUTO_START};

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the revision range bounding the stack
    Revset(revset::RevsetArgs),
    /// List the commits in the stack, oldest first
    Stack(stack::StackCmdArgs),
    /// Rebase the stack and its forks onto the latest successors
    Finalize(finalize::FinalizeArgs),
}

/// The START/END pair every command takes.
#[derive(Args, Debug, Clone)]
pub struct RangeArgs {
    /// First commit of the stack; "(auto)" picks the draft root below END
    #[arg(default_value = AUTO_START)]
    start: String,

    /// Last commit of the stack
    #[arg(default_value = ".")]
    end: String,
}

impl RangeArgs {
    fn stack_args(&self, cli: &Cli) -> StackArgs {
        StackArgs::new(&self.start, &self.end).safe_mode(cli.safe_mode)
    }
}

/// Load tool settings, honouring environment overrides.
pub fn load_config() -> Result<ToolConfig> {
    let env = EnvOverrides::from_env()?;
    Ok(ToolConfig::discover(&env)?)
}

/// Open the repository and compute the stack range.
pub fn open_stack(range: &RangeArgs, cli: &Cli) -> Result<Mercurial<HgRunner>> {
    let config = load_config()?;
    let mut runner = HgRunner::from_config(&config);
    if let Some(ref dir) = cli.change_dir {
        runner = runner.working_dir(dir);
    }

    let mut hg = Mercurial::new(runner);
    hg.set_args(&range.stack_args(cli), &config)?;
    Ok(hg)
}

pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Revset(args) => revset::run(args, &cli),
        Commands::Stack(args) => stack::run(args, &cli),
        Commands::Finalize(args) => finalize::run(args, &cli),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn range_defaults() {
        let cli = Cli::try_parse_from(["revstack", "revset"]).unwrap();
        let Commands::Revset(ref args) = cli.command else {
            panic!("expected revset");
        };
        let stack = args.range.stack_args(&cli);
        assert_eq!(stack, StackArgs::default());
    }

    #[test]
    fn explicit_range_and_safe_mode() {
        let cli =
            Cli::try_parse_from(["revstack", "--safe-mode", "finalize", "abc", "def"]).unwrap();
        let Commands::Finalize(ref args) = cli.command else {
            panic!("expected finalize");
        };
        let stack = args.range.stack_args(&cli);
        assert_eq!(stack.start_rev, "abc");
        assert_eq!(stack.end_rev, "def");
        assert!(stack.safe_mode);
    }
}
