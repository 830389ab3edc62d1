//! Error types for the Radium checkpoint subsystem.
use thiserror::Error;

use crate::types::Hash256;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("invalid hex: {0}")] InvalidHex(String),
    #[error("invalid length: {0} bytes, expected 32")] InvalidLength(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckpointError {
    #[error("invalid checkpoint hash at height {height}: {source}")] InvalidHash { height: u64, source: HashError },
    #[error("checkpoint heights not strictly increasing: {height} after {prev}")] UnorderedHeight { prev: u64, height: u64 },
    #[error("hardened checkpoint mismatch at height {height}: expected {expected}, got {got}")] Mismatch { height: u64, expected: Hash256, got: Hash256 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainIndexError {
    #[error("duplicate block: {0}")] DuplicateBlock(Hash256),
    #[error("unknown parent: {0}")] UnknownParent(Hash256),
    #[error("genesis already indexed")] GenesisExists,
}
