//! Shared chain builders for integration tests.

use radium_core::block_index::MemoryBlockIndex;
use radium_core::types::Hash256;
use radium_consensus::checkpoint::{Checkpoint, CheckpointTable};

/// Deterministic block hash for `(branch, height)`.
///
/// Branch 0 is the honest chain; any other branch is an attacker fork.
pub fn block_hash(branch: u8, height: u64) -> Hash256 {
    let mut bytes = [0u8; 32];
    bytes[0] = branch;
    bytes[24..].copy_from_slice(&height.to_be_bytes());
    Hash256(bytes)
}

/// Honest linear chain with heights `0..len` on branch 0.
pub fn honest_chain(len: u64) -> MemoryBlockIndex {
    let mut index = MemoryBlockIndex::new();
    index
        .insert_genesis(block_hash(0, 0))
        .expect("empty index accepts genesis");
    for height in 1..len {
        index
            .insert(block_hash(0, height), &block_hash(0, height - 1))
            .expect("parent indexed");
    }
    index
}

/// Extend `index` with a fork on `branch` that leaves the honest chain
/// after `fork_height` and reaches `tip_height`.
///
/// Returns the hash of the fork tip.
pub fn add_fork(index: &mut MemoryBlockIndex, branch: u8, fork_height: u64, tip_height: u64) -> Hash256 {
    let mut prev = block_hash(0, fork_height);
    for height in fork_height + 1..=tip_height {
        let hash = block_hash(branch, height);
        index.insert(hash, &prev).expect("fork parent indexed");
        prev = hash;
    }
    prev
}

/// Checkpoint table pinning the honest chain at the given heights.
pub fn honest_checkpoints(heights: &[u64]) -> CheckpointTable {
    let entries = heights
        .iter()
        .map(|&height| Checkpoint {
            height,
            hash: block_hash(0, height),
        })
        .collect();
    CheckpointTable::new(entries).expect("heights are strictly increasing")
}
