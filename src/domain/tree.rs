//! Edit-tree of allocation nodes and its value-returning mutations.
//!
//! Every operation takes the current forest of roots by reference and returns
//! a fresh forest; the previous value is never mutated. Lookups are plain
//! depth-first searches by key, which is fine for trees of a few hundred nodes.

use termtree::Tree;
use tracing::{instrument, trace};

use crate::domain::key::child_key;
use crate::domain::{NodeKey, Presenter};

/// Node of the edit-tree.
///
/// `value` is a percentage of the parent for levels 1-3 and a currency amount
/// for level 4. The display label is not stored; see [`AllocationNode::label`].
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationNode {
    pub key: NodeKey,
    pub name: String,
    pub value: f64,
    pub children: Vec<AllocationNode>,
}

impl AllocationNode {
    pub fn new(key: NodeKey, name: impl Into<String>, value: f64) -> Self {
        Self {
            key,
            name: name.into(),
            value,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<AllocationNode>) -> Self {
        self.children = children;
        self
    }

    pub fn depth(&self) -> usize {
        self.key.depth()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn label(&self, presenter: &Presenter) -> String {
        presenter.label(&self.name, self.value, self.depth())
    }

    pub fn to_termtree(&self, presenter: &Presenter) -> Tree<String> {
        Tree::new(format!("[{}] {}", self.key, self.label(presenter))).with_leaves(
            self.children
                .iter()
                .map(|c| c.to_termtree(presenter))
                .collect::<Vec<_>>(),
        )
    }
}

/// Partial update applied by [`update_node`]; `None` keeps the current field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub name: Option<String>,
    pub value: Option<f64>,
}

impl NodePatch {
    fn apply(&self, node: &AllocationNode) -> AllocationNode {
        AllocationNode {
            key: node.key.clone(),
            name: self.name.clone().unwrap_or_else(|| node.name.clone()),
            value: self.value.unwrap_or(node.value),
            children: node.children.clone(),
        }
    }
}

/// Factory producing a fresh node named `name` with value 0 at the next free
/// position below `parent` (or among the roots).
pub fn new_child(
    name: impl Into<String>,
) -> impl FnOnce(&[AllocationNode], Option<&NodeKey>) -> AllocationNode {
    let name = name.into();
    move |siblings, parent| AllocationNode::new(child_key(parent, siblings.len()), name, 0.0)
}

/// Depth-first lookup by key.
pub fn find<'a>(tree: &'a [AllocationNode], key: &NodeKey) -> Option<&'a AllocationNode> {
    for node in tree {
        if &node.key == key {
            return Some(node);
        }
        if let Some(found) = find(&node.children, key) {
            return Some(found);
        }
    }
    None
}

/// Every key in pre-order; the tree view expands all of them.
pub fn all_keys(tree: &[AllocationNode]) -> Vec<NodeKey> {
    let mut keys = Vec::new();
    collect_keys(tree, &mut keys);
    keys
}

fn collect_keys(tree: &[AllocationNode], keys: &mut Vec<NodeKey>) {
    for node in tree {
        keys.push(node.key.clone());
        collect_keys(&node.children, keys);
    }
}

/// Append a child built by `factory` below `target`, or a new root when
/// `target` is `None`.
///
/// The factory receives the existing children (or roots) and the target key
/// and must key the new node at `child_key(target, existing.len())`.
/// Unknown targets and level-4 targets leave the tree unchanged.
#[instrument(level = "debug", skip(tree, factory))]
pub fn insert_child<F>(
    tree: &[AllocationNode],
    target: Option<&NodeKey>,
    factory: F,
) -> Vec<AllocationNode>
where
    F: FnOnce(&[AllocationNode], Option<&NodeKey>) -> AllocationNode,
{
    let Some(target) = target else {
        let mut roots = tree.to_vec();
        let root = factory(tree, None);
        roots.push(root);
        return roots;
    };

    if target.is_leaf_level() {
        trace!("insert below leaf level ignored");
        return tree.to_vec();
    }

    let mut factory = Some(factory);
    insert_rec(tree, target, &mut factory)
}

fn insert_rec<F>(tree: &[AllocationNode], target: &NodeKey, factory: &mut Option<F>) -> Vec<AllocationNode>
where
    F: FnOnce(&[AllocationNode], Option<&NodeKey>) -> AllocationNode,
{
    tree.iter()
        .map(|node| {
            if &node.key == target {
                if let Some(make) = factory.take() {
                    let mut children = node.children.clone();
                    children.push(make(&node.children, Some(target)));
                    return AllocationNode {
                        children,
                        ..node.clone()
                    };
                }
                return node.clone();
            }
            if node.children.is_empty() || factory.is_none() {
                return node.clone();
            }
            AllocationNode {
                children: insert_rec(&node.children, target, factory),
                ..node.clone()
            }
        })
        .collect()
}

/// Merge `patch` into the node at `target`; unknown keys leave the tree unchanged.
#[instrument(level = "debug", skip(tree, patch))]
pub fn update_node(
    tree: &[AllocationNode],
    target: &NodeKey,
    patch: &NodePatch,
) -> Vec<AllocationNode> {
    tree.iter()
        .map(|node| {
            if &node.key == target {
                patch.apply(node)
            } else if node.children.is_empty() {
                node.clone()
            } else {
                AllocationNode {
                    children: update_node(&node.children, target, patch),
                    ..node.clone()
                }
            }
        })
        .collect()
}

/// Drop the node at `target` together with its subtree, then re-key the
/// whole forest.
///
/// Re-keying is a full from-scratch pass: every node gets the key implied by
/// its current position, so siblings stay contiguous from 0 and every
/// descendant carries its new ancestor chain. Unknown keys leave the tree
/// unchanged.
#[instrument(level = "debug", skip(tree))]
pub fn remove_node(tree: &[AllocationNode], target: &NodeKey) -> Vec<AllocationNode> {
    if find(tree, target).is_none() {
        trace!("remove of unknown key ignored");
        return tree.to_vec();
    }
    let pruned = prune(tree, target);
    rekey(pruned, None)
}

fn prune(tree: &[AllocationNode], target: &NodeKey) -> Vec<AllocationNode> {
    tree.iter()
        .filter(|node| &node.key != target)
        .map(|node| AllocationNode {
            children: prune(&node.children, target),
            ..node.clone()
        })
        .collect()
}

fn rekey(nodes: Vec<AllocationNode>, parent: Option<&NodeKey>) -> Vec<AllocationNode> {
    nodes
        .into_iter()
        .enumerate()
        .map(|(index, node)| {
            let key = child_key(parent, index);
            let children = rekey(node.children, Some(&key));
            AllocationNode {
                key,
                name: node.name,
                value: node.value,
                children,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> NodeKey {
        s.parse().unwrap()
    }

    #[test]
    fn given_forest_when_collecting_keys_then_preorder() {
        let tree = vec![
            AllocationNode::new(key("0"), "a", 50.0).with_children(vec![AllocationNode::new(
                key("0-0"),
                "b",
                100.0,
            )]),
            AllocationNode::new(key("1"), "c", 50.0),
        ];
        let keys: Vec<String> = all_keys(&tree).iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["0", "0-0", "1"]);
    }

    #[test]
    fn given_empty_patch_when_updating_then_node_unchanged() {
        let tree = vec![AllocationNode::new(key("0"), "a", 50.0)];
        let updated = update_node(&tree, &key("0"), &NodePatch::default());
        assert_eq!(updated, tree);
    }
}
