use revstack_utils::UtilError;

/// Errors from stack setup, revision queries, and finalization.
#[derive(Debug, thiserror::Error)]
pub enum HgError {
    /// The invocation cannot be satisfied as given (bad range, no draft
    /// commits, unresolved start revision).
    #[error("{0}")]
    Usage(String),

    /// A revision evolved into more than one live successor.
    #[error(
        "multiple successors found for {node}, unable to continue: {}",
        successors.join(", ")
    )]
    DivergentSuccessors {
        node: String,
        successors: Vec<String>,
    },

    #[error("unexpected output from {command}: '{line}'")]
    MalformedOutput { command: String, line: String },

    #[error("unknown revision: {0}")]
    UnknownRevision(String),

    #[error(transparent)]
    Command(#[from] UtilError),
}

impl HgError {
    /// True for errors caused by how the tool was invoked rather than by
    /// repository state or a failing command.
    pub fn is_usage(&self) -> bool {
        matches!(self, HgError::Usage(_))
    }
}
