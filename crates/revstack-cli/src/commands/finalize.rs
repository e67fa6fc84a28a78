use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use revstack_hg::{short_node, FinalizeReport, RebaseReason};

use super::{open_stack, RangeArgs};
use crate::Cli;

#[derive(Args)]
pub struct FinalizeArgs {
    #[command(flatten)]
    pub(crate) range: RangeArgs,
}

pub fn run(args: &FinalizeArgs, cli: &Cli) -> Result<i32> {
    let hg = open_stack(&args.range, cli)?;
    if !hg.use_evolve() {
        tracing::warn!("evolve is not enabled; nothing to reconcile");
    }

    let mut commits = hg.commit_stack()?;
    let report = hg.finalize(&mut commits)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &report)?;
    Ok(0)
}

fn write_report(out: &mut impl Write, report: &FinalizeReport) -> io::Result<()> {
    for successor in &report.successors {
        writeln!(
            out,
            "{}: {} superseded by {}",
            successor.rev,
            short_node(&successor.orig_node),
            short_node(&successor.node)
        )?;
    }
    for rebase in &report.rebases {
        let what = match rebase.reason {
            RebaseReason::ParentDrift => "rebased",
            RebaseReason::Fork => "rebased fork",
        };
        writeln!(
            out,
            "{} {} onto {}",
            what,
            short_node(&rebase.source),
            short_node(&rebase.dest)
        )?;
    }
    if report.is_noop() {
        writeln!(out, "stack is up to date")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use revstack_hg::{RebaseRecord, SuccessorRecord};

    use super::*;

    fn render(report: &FinalizeReport) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_report() {
        assert_eq!(render(&FinalizeReport::default()), "stack is up to date\n");
    }

    #[test]
    fn report_lists_successors_then_rebases() {
        let report = FinalizeReport {
            successors: vec![SuccessorRecord {
                rev: "3".into(),
                orig_node: "cccccccccccccccc".into(),
                node: "dddddddddddddddd".into(),
            }],
            rebases: vec![
                RebaseRecord {
                    source: "ffffffffffffffff".into(),
                    dest: "aaaaaaaaaaaaaaaa".into(),
                    reason: RebaseReason::Fork,
                },
                RebaseRecord {
                    source: "dddddddddddddddd".into(),
                    dest: "bbbbbbbbbbbbbbbb".into(),
                    reason: RebaseReason::ParentDrift,
                },
            ],
        };
        assert_eq!(
            render(&report),
            "3: cccccccccccc superseded by dddddddddddd\n\
             rebased fork ffffffffffff onto aaaaaaaaaaaa\n\
             rebased dddddddddddd onto bbbbbbbbbbbb\n"
        );
    }
}
