//! The Mercurial backend: global options plus the revision query layer.

use revstack_config::HgConfig;

use crate::commit::Commit;
use crate::error::HgError;
use crate::finalize::{finalize, FinalizeReport};
use crate::query::{
    children_revset, successor_revset, RevisionQuery, Successor, NODE_TEMPLATE, PARENT_TEMPLATE,
    REV_NODE_TEMPLATE,
};
use crate::runner::CommandRunner;
use crate::Result;

/// A Mercurial repository driven through a [`CommandRunner`].
///
/// Holds the `--config` overrides and feature flags computed by
/// [`Mercurial::set_args`]; every command is prefixed with those overrides.
#[derive(Debug)]
pub struct Mercurial<R> {
    runner: R,
    pub(crate) hg_args: Vec<String>,
    pub(crate) config: HgConfig,
    pub(crate) use_evolve: bool,
    pub(crate) has_shelve: bool,
    pub(crate) revset: Option<String>,
}

impl<R: CommandRunner> Mercurial<R> {
    /// Wrap a runner. Until setup runs no overrides are applied and evolve
    /// is treated as unavailable.
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            hg_args: Vec::new(),
            config: HgConfig::new(),
            use_evolve: false,
            has_shelve: false,
            revset: None,
        }
    }

    /// Run `hg` with the global overrides followed by `args`.
    pub fn hg_out<S: AsRef<str>>(&self, args: &[S]) -> Result<Vec<String>> {
        let full: Vec<String> = self
            .hg_args
            .iter()
            .cloned()
            .chain(args.iter().map(|a| a.as_ref().to_string()))
            .collect();
        Ok(self.runner.run_captured(&full)?)
    }

    /// `hg log -T <template> -r <revset>`, optionally including hidden
    /// changesets.
    pub fn hg_log(&self, template: &str, revset: &str, hidden: bool) -> Result<Vec<String>> {
        let mut args = vec!["log", "-T", template];
        if hidden {
            args.push("--hidden");
        }
        args.extend(["-r", revset]);
        self.hg_out(&args)
    }

    /// Finalize `commits` using the evolve availability detected by setup.
    pub fn finalize(&self, commits: &mut [Commit]) -> Result<FinalizeReport> {
        finalize(self, commits, self.use_evolve)
    }

    /// Global arguments prefixed to every command.
    pub fn hg_args(&self) -> &[String] {
        &self.hg_args
    }

    /// Repository configuration captured during setup.
    pub fn config(&self) -> &HgConfig {
        &self.config
    }

    /// Whether obsolescence-aware finalization is active.
    pub fn use_evolve(&self) -> bool {
        self.use_evolve
    }

    /// Whether shelving is available to stash working-copy changes.
    pub fn has_shelve(&self) -> bool {
        self.has_shelve
    }

    /// The `<start>::<end>` range computed during setup.
    pub fn revset(&self) -> Option<&str> {
        self.revset.as_deref()
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}

impl<R: CommandRunner> RevisionQuery for Mercurial<R> {
    fn parent_of(&self, node: &str) -> Result<String> {
        let lines = self.hg_log(PARENT_TEMPLATE, node, false)?;
        lines
            .into_iter()
            .next()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .ok_or_else(|| HgError::UnknownRevision(node.to_string()))
    }

    fn children_of(&self, node: &str) -> Result<Vec<String>> {
        let lines = self.hg_log(NODE_TEMPLATE, &children_revset(node), true)?;
        Ok(lines
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect())
    }

    fn successor_of(&self, node: &str) -> Result<Successor> {
        let lines = self.hg_log(REV_NODE_TEMPLATE, &successor_revset(node), true)?;
        Successor::parse(node, &lines)
    }

    fn rebase(&self, source: &str, dest: &str) -> Result<()> {
        tracing::info!(source, dest, "rebasing");
        self.hg_out(&["rebase", "--source", source, "--dest", dest])?;
        Ok(())
    }
}
