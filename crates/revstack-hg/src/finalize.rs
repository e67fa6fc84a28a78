//! Reconciling the captured stack with the repository after history edits.
//!
//! Between capturing a stack and submitting it, the user (or revstack
//! itself) may amend commits. With evolve, the amended commits leave
//! obsolescence markers behind and their descendants are left sitting on the
//! obsolete predecessors. Finalizing walks the stack oldest to newest and,
//! for each adjacent pair:
//!
//! 1. rebases forks: children of an amended commit's old node that are not
//!    part of the stack get moved onto the new node;
//! 2. swaps in the successor of the newer commit, if one exists;
//! 3. rebases the newer commit onto the older one when its parent drifted.
//!
//! No retries and no rollback: the first failing command aborts the walk
//! and leaves whatever was already rebased in place.

use std::collections::HashSet;

use crate::commit::{short_node, Commit};
use crate::query::RevisionQuery;
use crate::Result;

/// Why a rebase was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebaseReason {
    /// The commit's parent was not the previous stack commit.
    ParentDrift,
    /// A child of an amended commit, created outside the stack.
    Fork,
}

/// One rebase issued during finalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseRecord {
    pub source: String,
    pub dest: String,
    pub reason: RebaseReason,
}

/// One successor substitution applied to the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessorRecord {
    pub rev: String,
    pub orig_node: String,
    pub node: String,
}

/// What finalization did, in the order it happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalizeReport {
    pub rebases: Vec<RebaseRecord>,
    pub successors: Vec<SuccessorRecord>,
}

impl FinalizeReport {
    /// True when the repository was left untouched.
    pub fn is_noop(&self) -> bool {
        self.rebases.is_empty()
    }

    pub fn fork_count(&self) -> usize {
        self.rebases
            .iter()
            .filter(|r| r.reason == RebaseReason::Fork)
            .count()
    }
}

/// Children of `commit` that are not part of the original stack.
///
/// Uses `commit.children` as already queried; returns nothing when the
/// commit was never amended or no children were recorded. Order follows
/// `children`.
pub fn find_forks_to_rebase(commit: &Commit, original_nodes: &[String]) -> Vec<String> {
    if !commit.is_amended() {
        return Vec::new();
    }
    let Some(ref children) = commit.children else {
        return Vec::new();
    };
    let tracked: HashSet<&str> = original_nodes.iter().map(String::as_str).collect();
    children
        .iter()
        .filter(|child| !tracked.contains(child.as_str()))
        .cloned()
        .collect()
}

/// Bring `commits` into agreement with the repository.
///
/// Without evolve there are no markers to follow, so nothing is queried
/// and nothing is rebased. Divergent successors and command failures abort
/// immediately.
pub fn finalize<Q: RevisionQuery + ?Sized>(
    repo: &Q,
    commits: &mut [Commit],
    use_evolve: bool,
) -> Result<FinalizeReport> {
    let mut report = FinalizeReport::default();
    if !use_evolve {
        tracing::debug!("evolve unavailable, skipping finalization");
        return Ok(report);
    }

    let original_nodes: Vec<String> = commits.iter().map(|c| c.orig_node.clone()).collect();

    for idx in 1..commits.len() {
        let (finalized, pending) = commits.split_at_mut(idx);
        let previous = &mut finalized[idx - 1];
        let current = &mut pending[0];

        if previous.is_amended() {
            previous.children = Some(repo.children_of(&previous.orig_node)?);
            for fork in find_forks_to_rebase(previous, &original_nodes) {
                tracing::warn!(
                    fork = short_node(&fork),
                    onto = short_node(&previous.node),
                    "rebasing commit built on an amended stack commit"
                );
                repo.rebase(&fork, &previous.node)?;
                report.rebases.push(RebaseRecord {
                    source: fork,
                    dest: previous.node.clone(),
                    reason: RebaseReason::Fork,
                });
            }
        }

        if let Some((rev, node)) = repo
            .successor_of(&current.orig_node)?
            .into_found(&current.orig_node)?
        {
            let name = format!("{}:{}", rev, short_node(&node));
            tracing::info!(
                orig = short_node(&current.orig_node),
                successor = %name,
                "commit was superseded"
            );
            report.successors.push(SuccessorRecord {
                rev: current.rev.clone(),
                orig_node: current.orig_node.clone(),
                node: node.clone(),
            });
            current.node = node;
            current.name = Some(name);
        }

        if repo.parent_of(&current.node)? != previous.node {
            repo.rebase(&current.node, &previous.node)?;
            report.rebases.push(RebaseRecord {
                source: current.node.clone(),
                dest: previous.node.clone(),
                reason: RebaseReason::ParentDrift,
            });
        }
    }

    Ok(report)
}
