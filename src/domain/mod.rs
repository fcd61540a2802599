//! Domain layer: allocation tree, radial projection and derivation
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod derivation;
pub mod error;
pub mod key;
pub mod label;
pub mod radial;
pub mod tree;

pub use derivation::{current_total, derive, fund_implied_total, implied_total, Derivation, Summary};
pub use error::DomainError;
pub use key::{child_key, depth_of, NodeKey, KEY_DELIMITER, MAX_DEPTH};
pub use label::Presenter;
pub use radial::{from_radial, radial_to_tree, to_radial, tree_to_radial, RadialNode};
pub use tree::{
    all_keys, find, insert_child, new_child, remove_node, update_node, AllocationNode, NodePatch,
};
