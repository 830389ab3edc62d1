//! Trait interfaces between the checkpoint subsystem and the node.
//!
//! The checkpoint code never owns chain state. It reads it through:
//! - [`ChainNode`] - a block-index entry with height, hash, and parent link
//! - [`BlockIndex`] - hash lookup over the locally stored block index
//!
//! Both are read-only. Callers hold whatever lock protects tip and index
//! mutation for the duration of a call.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::types::Hash256;

/// A node of the block index tree.
///
/// Implemented by the node's block-index entries. The genesis node has no
/// parent; every other node's parent has height `self.height() - 1`.
pub trait ChainNode {
    /// Height of this block (genesis is 0).
    fn height(&self) -> u64;

    /// Hash of this block.
    fn hash(&self) -> Hash256;

    /// Parent node, or `None` at genesis.
    fn parent(&self) -> Option<&Self>;

    /// Whether this node is the root of its chain.
    ///
    /// Default implementation: `parent().is_none()`.
    fn is_genesis(&self) -> bool {
        self.parent().is_none()
    }
}

/// Hash-keyed lookup over locally stored block-index nodes.
pub trait BlockIndex {
    /// Node type stored in the index.
    type Node;

    /// Look up a node by block hash. Returns `None` if not indexed.
    fn lookup(&self, hash: &Hash256) -> Option<&Self::Node>;
}

impl<N, S: BuildHasher> BlockIndex for HashMap<Hash256, N, S> {
    type Node = N;

    fn lookup(&self, hash: &Hash256) -> Option<&N> {
        self.get(hash)
    }
}

impl<N> BlockIndex for BTreeMap<Hash256, N> {
    type Node = N;

    fn lookup(&self, hash: &Hash256) -> Option<&N> {
        self.get(hash)
    }
}

impl<I: BlockIndex + ?Sized> BlockIndex for &I {
    type Node = I::Node;

    fn lookup(&self, hash: &Hash256) -> Option<&I::Node> {
        (**self).lookup(hash)
    }
}
