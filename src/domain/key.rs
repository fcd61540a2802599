//! Path keys for allocation nodes.
//!
//! A key is the chain of sibling indices from a root down to the node,
//! rendered as `"2-0-1"`. The depth of a node is the number of segments,
//! so it can never drift from the node's position in the tree.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::domain::DomainError;

/// Separator between key segments.
pub const KEY_DELIMITER: char = '-';

/// Fixed depth of the hierarchy: portfolio, asset class, fund, holding.
pub const MAX_DEPTH: usize = 4;

/// Position of a node in the allocation tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(Vec<usize>);

impl NodeKey {
    /// Key of the root at `index` among roots.
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Key of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(index);
        Self(segments)
    }

    /// Segment count; a key without segments counts as root level.
    pub fn depth(&self) -> usize {
        self.0.len().max(1)
    }

    pub fn segments(&self) -> &[usize] {
        &self.0
    }

    /// Index among siblings (last segment).
    pub fn index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn parent(&self) -> Option<NodeKey> {
        match self.0.len() {
            0 | 1 => None,
            n => Some(Self(self.0[..n - 1].to_vec())),
        }
    }

    pub fn is_leaf_level(&self) -> bool {
        self.depth() >= MAX_DEPTH
    }
}

/// Depth of an optional key; an absent key is the root level.
pub fn depth_of(key: Option<&NodeKey>) -> usize {
    key.map_or(1, NodeKey::depth)
}

/// Key of the `index`-th child of `parent`, or of the `index`-th root when
/// there is no parent.
pub fn child_key(parent: Option<&NodeKey>, index: usize) -> NodeKey {
    match parent {
        Some(parent) => parent.child(index),
        None => NodeKey::root(index),
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(&KEY_DELIMITER.to_string()))
    }
}

impl FromStr for NodeKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidKey(s.to_string()));
        }
        trimmed
            .split(KEY_DELIMITER)
            .map(|segment| segment.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map(NodeKey)
            .map_err(|_| DomainError::InvalidKey(s.to_string()))
    }
}
