//! Capturing the stack described by the setup revset.

use std::sync::OnceLock;

use regex::Regex;

use crate::commit::Commit;
use crate::error::HgError;
use crate::mercurial::Mercurial;
use crate::query::REV_NODE_TEMPLATE;
use crate::runner::CommandRunner;
use crate::Result;

fn rev_node_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<rev>[0-9]+) (?P<node>[0-9a-f]{12,40})$").expect("valid regex")
    })
}

/// Parse one `<rev> <node>` line of `hg log` output.
pub fn parse_rev_node(line: &str) -> Option<Commit> {
    let caps = rev_node_pattern().captures(line.trim())?;
    Some(Commit::new(&caps["rev"], &caps["node"]))
}

impl<R: CommandRunner> Mercurial<R> {
    /// Commits in the setup revset, oldest first.
    pub fn commit_stack(&self) -> Result<Vec<Commit>> {
        let revset = self
            .revset()
            .ok_or_else(|| HgError::Usage("stack range has not been computed".into()))?
            .to_string();
        let commits = self
            .hg_log(REV_NODE_TEMPLATE, &revset, false)?
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                parse_rev_node(line).ok_or_else(|| HgError::MalformedOutput {
                    command: format!("hg log -r {}", revset),
                    line: line.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if commits.is_empty() {
            return Err(HgError::Usage(format!(
                "failed to find any commits in {}",
                revset
            )));
        }
        tracing::debug!(count = commits.len(), "captured stack");
        Ok(commits)
    }
}
