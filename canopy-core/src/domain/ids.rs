//! Node identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a strategy tree node. Unique within one document.
///
/// The editor that authors strategies assigns these; the engine only
/// checks uniqueness and carries them through for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic node-id source for programmatic tree construction.
///
/// A monotonic counter rather than anything random, so two builds of
/// the same tree produce the same ids and fixtures stay reproducible.
#[derive(Debug, Default)]
pub struct IdGen {
    next: u64,
}

impl IdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> NodeId {
        self.next += 1;
        NodeId(format!("n{}", self.next))
    }
}
