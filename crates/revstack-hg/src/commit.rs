/// Length of the abbreviated node hash used in labels and revsets.
pub const SHORT_NODE_LEN: usize = 12;

/// Abbreviate a node hash to [`SHORT_NODE_LEN`] characters.
pub fn short_node(node: &str) -> &str {
    match node.char_indices().nth(SHORT_NODE_LEN) {
        Some((idx, _)) => &node[..idx],
        None => node,
    }
}

/// One entry in the tracked stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Local sequence number when the stack was captured.
    pub rev: String,
    /// Current node; replaced when a successor is found.
    pub node: String,
    /// Node at capture time. Never changes during a finalize pass.
    pub orig_node: String,
    /// `"<rev>:<short node>"` of the successor, once one replaced `node`.
    pub name: Option<String>,
    /// Children of `orig_node`, filled in during fork discovery.
    pub children: Option<Vec<String>>,
}

impl Commit {
    /// A freshly captured commit: `orig_node` equals `node`.
    pub fn new(rev: impl Into<String>, node: impl Into<String>) -> Self {
        let node = node.into();
        Self {
            rev: rev.into(),
            orig_node: node.clone(),
            node,
            name: None,
            children: None,
        }
    }

    /// True once the commit's node no longer matches what was captured.
    pub fn is_amended(&self) -> bool {
        self.node != self.orig_node
    }

    /// Label shown to the user: the successor name if any, else `rev:short`.
    pub fn display_name(&self) -> String {
        match self.name {
            Some(ref name) => name.clone(),
            None => format!("{}:{}", self.rev, short_node(&self.node)),
        }
    }
}
