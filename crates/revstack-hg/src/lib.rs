//! Reconciling a captured Mercurial commit stack with the repository after
//! amends, evolve rewrites, and rebases.

pub mod commit;
pub mod error;
pub mod finalize;
pub mod mercurial;
pub mod query;
pub mod runner;
pub mod setup;
pub mod stack;

pub use commit::{short_node, Commit, SHORT_NODE_LEN};
pub use error::HgError;
pub use finalize::{
    find_forks_to_rebase, finalize, FinalizeReport, RebaseReason, RebaseRecord, SuccessorRecord,
};
pub use mercurial::Mercurial;
pub use query::{RevisionQuery, Successor};
pub use runner::{CommandRunner, HgRunner};
pub use setup::{Features, StackArgs, AUTO_START};

pub type Result<T> = std::result::Result<T, HgError>;
