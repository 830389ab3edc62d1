//! # radium-consensus - Checkpoint enforcement.
//!
//! Anchors accepted blocks against compiled-in hardened checkpoints and
//! maintains the moving sync-checkpoint boundary near the chain tip.
//!
//! - [`checkpoint`]: per-network checkpoint tables, hardened-checkpoint
//!   checks, total-height estimate, and local-index resolution.
//! - [`sync`]: automatic sync-checkpoint selection and the reorg boundary
//!   test.

pub mod checkpoint;
pub mod sync;

pub use checkpoint::{Checkpoint, CheckpointRegistry, CheckpointTable};
pub use sync::{auto_select_sync_checkpoint, check_sync, sync_boundary_height};
