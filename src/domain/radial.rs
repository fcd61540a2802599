//! Radial (nested ring) projection of the allocation tree.
//!
//! This is the shape that gets charted and persisted. Depth is implied by
//! nesting; keys and labels only exist on the edit-tree side.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::key::{child_key, depth_of};
use crate::domain::{AllocationNode, NodeKey, MAX_DEPTH};

/// One ring segment. `price` holds a holding's entered currency amount once
/// derivation has rewritten `value` into a percentage of the implied total.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RadialNode {
    pub name: String,
    /// A cleared input is stored as `null` or left out; both read as 0.
    #[serde(default, deserialize_with = "number_or_zero")]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RadialNode>,
}

fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

impl RadialNode {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            price: None,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<RadialNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

/// Structural projection of one edit-tree node and its subtree.
pub fn tree_to_radial(node: &AllocationNode) -> RadialNode {
    RadialNode {
        name: node.name.clone(),
        value: node.value,
        price: None,
        children: node.children.iter().map(tree_to_radial).collect(),
    }
}

pub fn to_radial(tree: &[AllocationNode]) -> Vec<RadialNode> {
    tree.iter().map(tree_to_radial).collect()
}

/// Rebuild an edit-tree node at position `index` below `parent`.
///
/// At the holding level a previously derived `price` wins over the stored
/// percentage, so a reloaded tree shows the currency amounts the user entered.
pub fn radial_to_tree(node: &RadialNode, parent: Option<&NodeKey>, index: usize) -> AllocationNode {
    let key = child_key(parent, index);
    let value = match node.price {
        Some(price) if depth_of(Some(&key)) == MAX_DEPTH => price,
        _ => node.value,
    };
    let children = node
        .children
        .iter()
        .enumerate()
        .map(|(i, child)| radial_to_tree(child, Some(&key), i))
        .collect();

    AllocationNode {
        key,
        name: node.name.clone(),
        value,
        children,
    }
}

pub fn from_radial(snapshot: &[RadialNode]) -> Vec<AllocationNode> {
    snapshot
        .iter()
        .enumerate()
        .map(|(i, node)| radial_to_tree(node, None, i))
        .collect()
}
