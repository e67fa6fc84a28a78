//! Revision queries the finalizer needs from the repository.

use crate::error::HgError;
use crate::Result;

/// Template printing one node per line.
pub(crate) const NODE_TEMPLATE: &str = "{node}\\n";
/// Template printing `<rev> <node>` per line.
pub(crate) const REV_NODE_TEMPLATE: &str = "{rev} {node}\\n";
/// Template printing the first parent's node.
pub(crate) const PARENT_TEMPLATE: &str = "{p1node}";

/// Read and rewrite access to the commit graph.
///
/// Every call blocks until the underlying command finishes. The finalizer
/// issues them strictly in order and never overlaps two rebases.
pub trait RevisionQuery {
    /// First parent of `node`.
    fn parent_of(&self, node: &str) -> Result<String>;

    /// Live direct children of `node`, in the order the repository reports
    /// them. `node` itself may be hidden.
    fn children_of(&self, node: &str) -> Result<Vec<String>>;

    /// Live successor of `node` according to obsolescence markers.
    fn successor_of(&self, node: &str) -> Result<Successor>;

    /// Move `source` (and its descendants) onto `dest`.
    fn rebase(&self, source: &str, dest: &str) -> Result<()>;
}

impl<Q: RevisionQuery + ?Sized> RevisionQuery for &Q {
    fn parent_of(&self, node: &str) -> Result<String> {
        (**self).parent_of(node)
    }

    fn children_of(&self, node: &str) -> Result<Vec<String>> {
        (**self).children_of(node)
    }

    fn successor_of(&self, node: &str) -> Result<Successor> {
        (**self).successor_of(node)
    }

    fn rebase(&self, source: &str, dest: &str) -> Result<()> {
        (**self).rebase(source, dest)
    }
}

/// Outcome of looking up a revision's successor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Successor {
    /// No obsolescence marker points away from the revision.
    None,
    /// Exactly one live successor.
    Found { rev: String, node: String },
    /// The revision evolved divergently; holds the raw marker lines.
    Ambiguous(Vec<String>),
}

impl Successor {
    /// Interpret successor query output for `node`.
    ///
    /// Blank lines are ignored. A single line must be `<rev> <node>`; a line
    /// naming `node` itself counts as no successor.
    pub fn parse<S: AsRef<str>>(node: &str, lines: &[S]) -> Result<Self> {
        let lines: Vec<&str> = lines
            .iter()
            .map(|l| l.as_ref().trim())
            .filter(|l| !l.is_empty())
            .collect();

        match lines.as_slice() {
            [] => Ok(Successor::None),
            [line] => {
                let (rev, succ) = line
                    .split_once(' ')
                    .filter(|(rev, succ)| {
                        !rev.is_empty() && !succ.is_empty() && !succ.contains(' ')
                    })
                    .ok_or_else(|| HgError::MalformedOutput {
                        command: format!("successor query for {}", node),
                        line: line.to_string(),
                    })?;
                if succ == node {
                    return Ok(Successor::None);
                }
                Ok(Successor::Found {
                    rev: rev.to_string(),
                    node: succ.to_string(),
                })
            }
            many => Ok(Successor::Ambiguous(many.iter().map(|l| l.to_string()).collect())),
        }
    }

    /// Collapse to `(rev, node)`, treating divergence as fatal.
    pub fn into_found(self, node: &str) -> Result<Option<(String, String)>> {
        match self {
            Successor::None => Ok(None),
            Successor::Found { rev, node } => Ok(Some((rev, node))),
            Successor::Ambiguous(successors) => Err(HgError::DivergentSuccessors {
                node: node.to_string(),
                successors,
            }),
        }
    }
}

/// Revset selecting the live successors of `node`, excluding `node` itself.
pub fn successor_revset(node: &str) -> String {
    format!("(successors({node}) - {node}) and not obsolete()")
}

/// Revset selecting the live direct children of `node`. Obsolete children
/// are predecessors of something else and are never rebased.
pub fn children_revset(node: &str) -> String {
    format!("children({node}) and not obsolete()")
}

/// Revset selecting the draft roots below `end`, i.e. the stack's branch point.
pub fn branch_point_revset(end: &str) -> String {
    format!("roots(draft() and ancestors({end}))")
}
