//! In-memory block index.
//!
//! Provides [`MemoryBlockIndex`], a hash-keyed tree of [`IndexedBlock`]
//! nodes with best-tip tracking. Suitable for tests, benches, and tooling;
//! the production node keeps its own index and implements
//! [`BlockIndex`]/[`ChainNode`] over it.
//!
//! Blocks passed to [`MemoryBlockIndex::insert`] must already be validated.
//! The index only checks linkage (known parent, no duplicates).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ChainIndexError;
use crate::traits::{BlockIndex, ChainNode};
use crate::types::Hash256;

/// A block-index entry linked to its parent.
pub struct IndexedBlock {
    hash: Hash256,
    height: u64,
    parent: Option<Arc<IndexedBlock>>,
}

impl IndexedBlock {
    /// Create a genesis entry (height 0, no parent).
    pub fn genesis(hash: Hash256) -> Self {
        Self {
            hash,
            height: 0,
            parent: None,
        }
    }

    /// Create a child of `parent` at `parent.height + 1`.
    pub fn child(hash: Hash256, parent: Arc<IndexedBlock>) -> Self {
        Self {
            hash,
            height: parent.height + 1,
            parent: Some(parent),
        }
    }
}

impl fmt::Debug for IndexedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedBlock")
            .field("hash", &self.hash)
            .field("height", &self.height)
            .field("parent", &self.parent.as_ref().map(|p| p.hash))
            .finish()
    }
}

impl ChainNode for IndexedBlock {
    fn height(&self) -> u64 {
        self.height
    }

    fn hash(&self) -> Hash256 {
        self.hash
    }

    fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }
}

// Unlink iteratively so dropping the last handle to a long chain does not
// recurse once per ancestor.
impl Drop for IndexedBlock {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut inner) => next = inner.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Hash-keyed block tree with best-tip tracking.
///
/// The tip is the highest block seen; on equal height the first one wins.
///
/// Not thread-safe for mutation - wrap in a `RwLock` if the index is
/// shared with a writer.
#[derive(Debug, Default)]
pub struct MemoryBlockIndex {
    blocks: HashMap<Hash256, Arc<IndexedBlock>>,
    tip: Option<Arc<IndexedBlock>>,
}

impl MemoryBlockIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the genesis block.
    ///
    /// # Errors
    ///
    /// Returns [`ChainIndexError::GenesisExists`] if the index is not empty.
    pub fn insert_genesis(&mut self, hash: Hash256) -> Result<Arc<IndexedBlock>, ChainIndexError> {
        if !self.blocks.is_empty() {
            return Err(ChainIndexError::GenesisExists);
        }
        let node = Arc::new(IndexedBlock::genesis(hash));
        self.blocks.insert(hash, Arc::clone(&node));
        self.tip = Some(Arc::clone(&node));
        Ok(node)
    }

    /// Index a block on top of an already indexed parent.
    ///
    /// # Errors
    ///
    /// Returns [`ChainIndexError::DuplicateBlock`] if `hash` is already
    /// indexed, or [`ChainIndexError::UnknownParent`] if `prev_hash` is not.
    pub fn insert(
        &mut self,
        hash: Hash256,
        prev_hash: &Hash256,
    ) -> Result<Arc<IndexedBlock>, ChainIndexError> {
        if self.blocks.contains_key(&hash) {
            return Err(ChainIndexError::DuplicateBlock(hash));
        }
        let parent = self
            .blocks
            .get(prev_hash)
            .cloned()
            .ok_or(ChainIndexError::UnknownParent(*prev_hash))?;

        let node = Arc::new(IndexedBlock::child(hash, parent));
        self.blocks.insert(hash, Arc::clone(&node));

        let better = self
            .tip
            .as_ref()
            .is_none_or(|tip| node.height > tip.height);
        if better {
            self.tip = Some(Arc::clone(&node));
        }
        Ok(node)
    }

    /// Current best tip, or `None` when empty.
    pub fn tip(&self) -> Option<&IndexedBlock> {
        self.tip.as_deref()
    }

    /// Height of the best tip, or `None` when empty.
    pub fn tip_height(&self) -> Option<u64> {
        self.tip.as_ref().map(|t| t.height)
    }

    /// Shared handle to an indexed block.
    pub fn get(&self, hash: &Hash256) -> Option<Arc<IndexedBlock>> {
        self.blocks.get(hash).cloned()
    }
}

impl BlockIndex for MemoryBlockIndex {
    type Node = IndexedBlock;

    fn lookup(&self, hash: &Hash256) -> Option<&IndexedBlock> {
        self.blocks.get(hash).map(Arc::as_ref)
    }
}
