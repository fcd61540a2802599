//! Portfolio allocation service
//!
//! Owns the edit-tree and the latest derived snapshot. Every mutation runs
//! the same fixed pipeline before returning:
//! mutate tree → project to radial → derive → persist → replace state.
//! `&mut self` serializes mutations, so a derivation always sees the
//! projection of the most recent tree.

use tracing::{debug, info, instrument};

use crate::application::services::{compute_chart_model, ChartModel, PersistenceGateway};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    all_keys, child_key, derive, find, from_radial, insert_child, new_child, remove_node, to_radial,
    update_node, AllocationNode, Derivation, NodeKey, NodePatch, Presenter, Summary,
};

pub struct PortfolioService {
    gateway: PersistenceGateway,
    presenter: Presenter,
    new_node_name: String,
    tree: Vec<AllocationNode>,
    derived: Derivation,
}

impl PortfolioService {
    /// Load the live snapshot and run the pipeline once, which also rewrites
    /// the stored snapshot with freshly derived values.
    #[instrument(level = "debug", skip_all)]
    pub fn open(
        gateway: PersistenceGateway,
        presenter: Presenter,
        new_node_name: impl Into<String>,
    ) -> ApplicationResult<Self> {
        let snapshot = gateway.load()?;
        debug!("open: loaded {} roots", snapshot.len());
        let tree = from_radial(&snapshot);

        let mut service = Self {
            gateway,
            presenter,
            new_node_name: new_node_name.into(),
            tree: Vec::new(),
            derived: Derivation::default(),
        };
        service.replace(tree)?;
        Ok(service)
    }

    pub fn tree(&self) -> &[AllocationNode] {
        &self.tree
    }

    pub fn derivation(&self) -> &Derivation {
        &self.derived
    }

    pub fn summary(&self) -> Summary {
        self.derived.summary
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    /// Keys the tree view keeps expanded: all of them.
    pub fn expanded_keys(&self) -> Vec<NodeKey> {
        all_keys(&self.tree)
    }

    pub fn node(&self, key: &NodeKey) -> ApplicationResult<&AllocationNode> {
        find(&self.tree, key).ok_or_else(|| ApplicationError::NodeNotFound(key.to_string()))
    }

    /// Append a new node below `parent` (or a new root) and return its key.
    pub fn insert(&mut self, parent: Option<&NodeKey>, name: Option<&str>) -> ApplicationResult<NodeKey> {
        self.add(parent, name, None)
    }

    /// Like [`PortfolioService::insert`], with an optional raw form value for
    /// the new node. The value is parsed before anything changes, so invalid
    /// input leaves tree and store untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn add(
        &mut self,
        parent: Option<&NodeKey>,
        name: Option<&str>,
        value: Option<&str>,
    ) -> ApplicationResult<NodeKey> {
        let position = match parent {
            Some(key) => {
                let node = self.node(key)?;
                if key.is_leaf_level() {
                    return Err(ApplicationError::LeafLevel(key.to_string()));
                }
                node.children.len()
            }
            None => self.tree.len(),
        };
        let new_key = child_key(parent, position);
        let value = value
            .map(|raw| self.presenter.parse_input(raw, new_key.depth()))
            .transpose()?;

        let name = name.unwrap_or(self.new_node_name.as_str()).to_string();
        let mut tree = insert_child(&self.tree, parent, new_child(name));
        if value.is_some() {
            tree = update_node(&tree, &new_key, &NodePatch { name: None, value });
        }
        self.replace(tree)?;
        info!("inserted node {}", new_key);
        Ok(new_key)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn update(&mut self, key: &NodeKey, patch: &NodePatch) -> ApplicationResult<()> {
        self.node(key)?;
        let tree = update_node(&self.tree, key, patch);
        self.replace(tree)
    }

    /// Update from raw form input; `value` is parsed according to the
    /// node's level (`¥ 1,234` for holdings, `12%` above).
    pub fn edit(&mut self, key: &NodeKey, name: Option<String>, value: Option<&str>) -> ApplicationResult<()> {
        let value = value
            .map(|raw| self.presenter.parse_input(raw, key.depth()))
            .transpose()?;
        self.update(key, &NodePatch { name, value })
    }

    /// Remove a node with its subtree; remaining keys are recomputed.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, key: &NodeKey) -> ApplicationResult<()> {
        self.node(key)?;
        let tree = remove_node(&self.tree, key);
        self.replace(tree)?;
        info!("removed node {}", key);
        Ok(())
    }

    /// Write the current derived snapshot to the backup key.
    pub fn backup(&self) -> ApplicationResult<()> {
        self.gateway.backup(&self.derived.snapshot)
    }

    /// Replace the tree with the last backup; returns the number of roots.
    ///
    /// Without a backup nothing changes, neither the tree nor the live key.
    #[instrument(level = "debug", skip(self))]
    pub fn restore(&mut self) -> ApplicationResult<usize> {
        let snapshot = self
            .gateway
            .load_backup()?
            .ok_or_else(|| ApplicationError::NoBackup(self.gateway.backup_key().to_string()))?;
        let tree = from_radial(&snapshot);
        let roots = tree.len();
        self.replace(tree)?;
        info!("restored {} roots from backup", roots);
        Ok(roots)
    }

    pub fn chart_model(&self, title: &str) -> ChartModel {
        compute_chart_model(&self.derived, &self.presenter, title)
    }

    fn replace(&mut self, tree: Vec<AllocationNode>) -> ApplicationResult<()> {
        let derived = derive(to_radial(&tree));
        self.gateway.store(&derived.snapshot)?;
        debug!(
            "pipeline: implied={} current={}",
            derived.summary.implied_total, derived.summary.current_total
        );
        self.tree = tree;
        self.derived = derived;
        Ok(())
    }
}
