//! Per-invocation setup: `--config` overrides, evolve/shelve detection, and
//! the revision range bounding the stack.

use revstack_config::{HgConfig, ToolConfig};

use crate::commit::short_node;
use crate::error::HgError;
use crate::mercurial::Mercurial;
use crate::query::{branch_point_revset, NODE_TEMPLATE};
use crate::runner::CommandRunner;
use crate::Result;

/// Start revision placeholder meaning "the stack's branch point".
pub const AUTO_START: &str = "(auto)";

/// Revision arguments for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackArgs {
    /// First commit of the stack, or [`AUTO_START`].
    pub start_rev: String,
    /// Last commit of the stack.
    pub end_rev: String,
    /// Safe mode requested on the command line.
    pub safe_mode: bool,
}

impl Default for StackArgs {
    fn default() -> Self {
        Self {
            start_rev: AUTO_START.to_string(),
            end_rev: ".".to_string(),
            safe_mode: false,
        }
    }
}

impl StackArgs {
    pub fn new(start_rev: impl Into<String>, end_rev: impl Into<String>) -> Self {
        Self {
            start_rev: start_rev.into(),
            end_rev: end_rev.into(),
            safe_mode: false,
        }
    }

    pub fn safe_mode(mut self, enabled: bool) -> Self {
        self.safe_mode = enabled;
        self
    }
}

fn config_arg(value: impl Into<String>) -> [String; 2] {
    ["--config".to_string(), value.into()]
}

/// Feature flags and `--config` overrides derived from a config snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Features {
    pub hg_args: Vec<String>,
    pub use_evolve: bool,
    pub has_shelve: bool,
}

impl Features {
    /// Decide overrides and flags.
    ///
    /// Rebase's own config is always blanked so rebases can be driven
    /// programmatically. Safe mode pins the username and forces evolve on.
    /// Without evolve, obsolescence markers are still created (and strip
    /// disabled) so amends stay inspectable.
    pub fn detect(config: &HgConfig, safe_mode: bool) -> Self {
        let mut hg_args: Vec<String> = config_arg("extensions.rebase=").into();
        let use_evolve = safe_mode || config.extension_enabled("evolve");

        if safe_mode {
            if let Some(username) = config.username() {
                hg_args.extend(config_arg(format!("ui.username={}", username)));
            }
            hg_args.extend(config_arg("extensions.evolve="));
        } else if !use_evolve {
            hg_args.extend(config_arg("experimental.evolution.createmarkers=true"));
            hg_args.extend(config_arg("extensions.strip="));
        }

        let has_shelve = !use_evolve || config.extension_enabled("shelve");

        Self {
            hg_args,
            use_evolve,
            has_shelve,
        }
    }
}

impl<R: CommandRunner> Mercurial<R> {
    /// Establish overrides and flags, then compute the stack's revset.
    ///
    /// Safe mode is on when either the tool config or `args` asks for it.
    pub fn set_args(&mut self, args: &StackArgs, tool: &ToolConfig) -> Result<()> {
        if args.start_rev.trim().is_empty() || args.end_rev.trim().is_empty() {
            return Err(HgError::Usage(
                "start and end revisions must not be empty".into(),
            ));
        }

        self.hg_args = config_arg("extensions.rebase=").into();
        let lines = self.hg_out(&["config"])?;
        self.config = HgConfig::from_lines(lines.as_slice());

        let safe_mode = tool.safe_mode || args.safe_mode;
        let features = Features::detect(&self.config, safe_mode);
        tracing::debug!(
            safe_mode,
            use_evolve = features.use_evolve,
            has_shelve = features.has_shelve,
            "detected repository features"
        );
        self.hg_args = features.hg_args;
        self.use_evolve = features.use_evolve;
        self.has_shelve = features.has_shelve;

        let start = if args.start_rev == AUTO_START {
            self.branch_point(&args.end_rev)?
        } else {
            args.start_rev.clone()
        };
        let revset = self.compute_revset(&start, &args.end_rev)?;
        tracing::debug!(%revset, "stack range");
        self.revset = Some(revset);
        Ok(())
    }

    /// The single draft root below `end`.
    pub fn branch_point(&self, end: &str) -> Result<String> {
        let roots: Vec<String> = self
            .hg_log(NODE_TEMPLATE, &branch_point_revset(end), false)?
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        match roots.as_slice() {
            [] => Err(HgError::Usage(format!(
                "failed to find any draft commits below {}",
                end
            ))),
            [root] => Ok(root.clone()),
            _ => Err(HgError::Usage(format!(
                "the draft commits below {} have {} roots ({}); specify a start revision",
                end,
                roots.len(),
                roots.iter().map(|r| short_node(r)).collect::<Vec<_>>().join(", ")
            ))),
        }
    }

    /// Short hash of the first changeset matched by `rev`; None when the
    /// expression matches nothing.
    pub fn short_hash(&self, rev: &str) -> Result<Option<String>> {
        let lines = self.hg_log(NODE_TEMPLATE, rev, false)?;
        Ok(lines
            .iter()
            .map(|l| l.trim())
            .find(|l| !l.is_empty())
            .map(|node| short_node(node).to_string()))
    }

    /// `<start>::<end>` over short hashes of both endpoints.
    pub fn compute_revset(&self, start: &str, end: &str) -> Result<String> {
        let start_hash = self
            .short_hash(start)?
            .ok_or_else(|| HgError::Usage(format!("invalid start revision: {}", start)))?;
        let end_hash = self
            .short_hash(end)?
            .ok_or_else(|| HgError::Usage(format!("invalid end revision: {}", end)))?;
        Ok(format!("{}::{}", start_hash, end_hash))
    }
}
