use std::fmt;

/// Stable key of a logical tree node.
///
/// Assigned the first time a node is reconciled and never handed to another
/// node for the lifetime of the diagram that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Identity(u64);

impl Identity {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Monotonic source of [`Identity`] values owned by one diagram.
///
/// Identities of removed subtrees are not reclaimed.
#[derive(Debug, Default)]
pub struct IdentitySequence {
    last: u64,
}

impl IdentitySequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_identity(&mut self) -> Identity {
        self.last += 1;
        Identity(self.last)
    }

    /// Number of identities issued so far.
    pub fn issued(&self) -> u64 {
        self.last
    }
}
