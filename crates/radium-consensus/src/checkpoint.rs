//! Hardened checkpoint verification.
//!
//! Anchors block acceptance to compiled-in `(height, hash)` pairs, one
//! table per network, and resolves those pairs against the node's local
//! block index.
//!
//! # Attack vectors
//!
//! - **Long-range rewrite:** An alternate chain that diverges below a
//!   checkpoint must produce a different hash at the checkpoint height, and
//!   is rejected there by [`CheckpointTable::check_hardened`].
//!
//! - **Checkpoint spoofing:** Tables are compiled into the binary. An
//!   attacker would need to distribute a modified binary to exploit this,
//!   which is outside our threat model.
//!
//! # Sparse checkpointing
//!
//! Heights without an entry are unconstrained here and pass the hardened
//! check unconditionally. They rely on other consensus rules for protection.
//!
//! # Usage
//!
//! Build a [`CheckpointRegistry`] once at startup and share it. The block
//! acceptance path calls [`CheckpointRegistry::verify_hardened`] (or the
//! boolean [`CheckpointRegistry::check_hardened`]) for each candidate block.
//! Status reporting calls [`CheckpointRegistry::total_blocks_estimate`] and
//! [`CheckpointRegistry::last_checkpoint`].

use radium_core::constants::NetworkType;
use radium_core::error::CheckpointError;
use radium_core::traits::BlockIndex;
use radium_core::types::Hash256;
use tracing::{debug, info, warn};

/// A trusted `(height, hash)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checkpoint {
    /// Block height.
    pub height: u64,
    /// Hash the reference chain produced at `height`.
    pub hash: Hash256,
}

/// Immutable checkpoint table, sorted by strictly increasing height.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckpointTable {
    entries: Vec<Checkpoint>,
}

impl CheckpointTable {
    /// Build a table from entries already in ascending height order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckpointError::UnorderedHeight`] if any height is not
    /// strictly greater than the one before it.
    pub fn new(entries: Vec<Checkpoint>) -> Result<Self, CheckpointError> {
        for pair in entries.windows(2) {
            if pair[1].height <= pair[0].height {
                return Err(CheckpointError::UnorderedHeight {
                    prev: pair[0].height,
                    height: pair[1].height,
                });
            }
        }
        Ok(Self { entries })
    }

    /// Table with no checkpoints.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from `(height, hex hash)` constants.
    ///
    /// # Errors
    ///
    /// Returns [`CheckpointError::InvalidHash`] for a malformed hash and
    /// [`CheckpointError::UnorderedHeight`] for out-of-order heights.
    pub fn from_hex_entries(entries: &[(u64, &str)]) -> Result<Self, CheckpointError> {
        let parsed = entries
            .iter()
            .map(|&(height, hex)| {
                Hash256::from_hex(hex)
                    .map(|hash| Checkpoint { height, hash })
                    .map_err(|source| CheckpointError::InvalidHash { height, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    /// The compiled-in table for `network`.
    pub fn for_network(network: NetworkType) -> Result<Self, CheckpointError> {
        Self::from_hex_entries(network.checkpoints())
    }

    /// Hash recorded at `height`, if any.
    pub fn get(&self, height: u64) -> Option<&Hash256> {
        self.entries
            .binary_search_by_key(&height, |cp| cp.height)
            .ok()
            .map(|i| &self.entries[i].hash)
    }

    /// Entries in ascending height order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Checkpoint> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Entries in descending height order.
    pub fn iter_descending(&self) -> impl Iterator<Item = &Checkpoint> + ExactSizeIterator {
        self.entries.iter().rev()
    }

    /// Highest checkpoint, or `None` if the table is empty.
    pub fn last(&self) -> Option<&Checkpoint> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hardened-checkpoint test.
    ///
    /// If `height` matches a checkpoint height, `hash` must match exactly.
    /// If there is no checkpoint at `height`, the check passes.
    pub fn check_hardened(&self, height: u64, hash: &Hash256) -> bool {
        match self.get(height) {
            None => true,
            Some(expected) if expected == hash => true,
            Some(expected) => {
                warn!(
                    height,
                    expected = %expected,
                    got = %hash,
                    "block contradicts hardened checkpoint"
                );
                false
            }
        }
    }

    /// Like [`check_hardened`](Self::check_hardened) but reports the
    /// mismatch as an error.
    ///
    /// # Errors
    ///
    /// Returns [`CheckpointError::Mismatch`] when the hash does not match
    /// the checkpoint at `height`.
    pub fn verify_hardened(&self, height: u64, hash: &Hash256) -> Result<(), CheckpointError> {
        match self.get(height) {
            Some(expected) if expected != hash => Err(CheckpointError::Mismatch {
                height,
                expected: *expected,
                got: *hash,
            }),
            _ => Ok(()),
        }
    }

    /// Height of the most recent checkpoint, or 0 if there are none.
    ///
    /// Informational only (sync progress); carries no correctness guarantee.
    pub fn total_blocks_estimate(&self) -> u64 {
        self.last().map_or(0, |cp| cp.height)
    }

    /// Newest checkpoint present in the local block index.
    ///
    /// Scans from the highest checkpoint downward and returns the node for
    /// the first hash the index knows. During initial sync the newest
    /// checkpoints may be missing, so older ones are used instead. Returns
    /// `None` if no checkpoint hash is indexed.
    pub fn last_checkpoint<'a, I>(&self, index: &'a I) -> Option<&'a I::Node>
    where
        I: BlockIndex + ?Sized,
    {
        let found = self
            .iter_descending()
            .find_map(|cp| index.lookup(&cp.hash).map(|node| (cp.height, node)));
        match found {
            Some((height, node)) => {
                debug!(height, "resolved last checkpoint in local index");
                Some(node)
            }
            None => {
                debug!(checkpoints = self.len(), "no checkpoint present in local index");
                None
            }
        }
    }
}

/// Per-network checkpoint tables, built once at startup.
///
/// Immutable after construction and safe to share across threads. There is
/// no `Default`: an empty mainnet table would accept every block, so the
/// production registry only comes from [`CheckpointRegistry::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointRegistry {
    mainnet: CheckpointTable,
    testnet: CheckpointTable,
}

impl CheckpointRegistry {
    /// Build the registry from the compiled-in tables.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckpointError`] if a compiled-in table is malformed.
    pub fn new() -> Result<Self, CheckpointError> {
        let registry = Self::with_tables(
            CheckpointTable::for_network(NetworkType::Mainnet)?,
            CheckpointTable::for_network(NetworkType::Testnet)?,
        );
        info!(
            mainnet = registry.mainnet.len(),
            testnet = registry.testnet.len(),
            "checkpoint registry loaded"
        );
        Ok(registry)
    }

    /// Build a registry from explicit tables.
    pub fn with_tables(mainnet: CheckpointTable, testnet: CheckpointTable) -> Self {
        Self { mainnet, testnet }
    }

    /// The table consulted for `network`.
    pub fn table_for(&self, network: NetworkType) -> &CheckpointTable {
        match network {
            NetworkType::Mainnet => &self.mainnet,
            NetworkType::Testnet => &self.testnet,
        }
    }

    /// See [`CheckpointTable::check_hardened`].
    pub fn check_hardened(&self, network: NetworkType, height: u64, hash: &Hash256) -> bool {
        self.table_for(network).check_hardened(height, hash)
    }

    /// See [`CheckpointTable::verify_hardened`].
    pub fn verify_hardened(
        &self,
        network: NetworkType,
        height: u64,
        hash: &Hash256,
    ) -> Result<(), CheckpointError> {
        self.table_for(network).verify_hardened(height, hash)
    }

    /// See [`CheckpointTable::total_blocks_estimate`].
    pub fn total_blocks_estimate(&self, network: NetworkType) -> u64 {
        self.table_for(network).total_blocks_estimate()
    }

    /// See [`CheckpointTable::last_checkpoint`].
    pub fn last_checkpoint<'a, I>(&self, network: NetworkType, index: &'a I) -> Option<&'a I::Node>
    where
        I: BlockIndex + ?Sized,
    {
        self.table_for(network).last_checkpoint(index)
    }
}
