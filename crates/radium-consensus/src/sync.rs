//! Automatic sync-checkpoint selection.
//!
//! The sync checkpoint is the ancestor exactly [`CHECKPOINT_SPAN`] blocks
//! behind the current tip, or genesis when the chain is shorter. Blocks at
//! or below it are treated as settled: the reorg path calls [`check_sync`]
//! and refuses any reorganization that would disconnect them.
//!
//! The tip is always passed in explicitly. These functions read the
//! caller's chain state without locking; callers hold the chain-state lock
//! across the call so the parent links cannot change underneath the walk.

use radium_core::constants::CHECKPOINT_SPAN;
use radium_core::traits::ChainNode;
use tracing::debug;

/// Select the sync checkpoint for `tip` using [`CHECKPOINT_SPAN`].
pub fn auto_select_sync_checkpoint<N: ChainNode>(tip: &N) -> &N {
    auto_select_sync_checkpoint_with(tip, CHECKPOINT_SPAN)
}

/// Like [`auto_select_sync_checkpoint`] but with an explicit span.
///
/// Walks parent links from `tip` while a parent exists and the candidate is
/// still inside the maturity window (`candidate.height + span > tip.height`).
pub fn auto_select_sync_checkpoint_with<N: ChainNode>(tip: &N, span: u64) -> &N {
    let tip_height = tip.height();
    let mut candidate = tip;
    while let Some(parent) = candidate.parent() {
        if candidate.height().saturating_add(span) <= tip_height {
            break;
        }
        candidate = parent;
    }
    debug!(
        tip_height,
        sync_height = candidate.height(),
        "selected sync checkpoint"
    );
    candidate
}

/// Returns `true` if `height` lies strictly above the sync checkpoint for
/// `tip`.
///
/// Heights at or below the sync checkpoint are rejected: the node will not
/// reorganize past it.
pub fn check_sync<N: ChainNode>(height: u64, tip: &N) -> bool {
    check_sync_with(height, tip, CHECKPOINT_SPAN)
}

/// Like [`check_sync`] but with an explicit span.
pub fn check_sync_with<N: ChainNode>(height: u64, tip: &N, span: u64) -> bool {
    height > auto_select_sync_checkpoint_with(tip, span).height()
}

/// Sync-checkpoint height for a contiguous chain whose tip is at
/// `tip_height`, using [`CHECKPOINT_SPAN`].
///
/// Equals `auto_select_sync_checkpoint(tip).height()` whenever every
/// ancestor down to genesis is indexed. Useful where only the tip height is
/// known.
pub fn sync_boundary_height(tip_height: u64) -> u64 {
    sync_boundary_height_with(tip_height, CHECKPOINT_SPAN)
}

/// Like [`sync_boundary_height`] but with an explicit span.
pub fn sync_boundary_height_with(tip_height: u64, span: u64) -> u64 {
    tip_height.saturating_sub(span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use radium_core::block_index::MemoryBlockIndex;
    use radium_core::types::Hash256;

    fn h(n: u64) -> Hash256 {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&n.to_be_bytes());
        Hash256(bytes)
    }

    /// Linear chain with heights `0..len`.
    fn chain(len: u64) -> MemoryBlockIndex {
        let mut index = MemoryBlockIndex::new();
        index.insert_genesis(h(0)).unwrap();
        for height in 1..len {
            index.insert(h(height), &h(height - 1)).unwrap();
        }
        index
    }

    // ------------------------------------------------------------------
    // auto_select_sync_checkpoint
    // ------------------------------------------------------------------

    #[test]
    fn selects_span_behind_tip() {
        let index = chain(1001);
        let tip = index.tip().unwrap();
        assert_eq!(tip.height(), 1000);

        let sync = auto_select_sync_checkpoint(tip);
        assert_eq!(sync.height(), 500);
        assert_eq!(sync.hash(), h(500));
    }

    /// Run `f` under a plain-text subscriber capped at `level` and return
    /// what it logged.
    fn captured_logs(level: tracing::Level, f: impl FnOnce()) -> String {
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Buffer(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Buffer {
            fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(bytes);
                Ok(bytes.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn selection_is_logged_at_debug() {
        let index = chain(1001);
        let tip = index.tip().unwrap();

        let logs = captured_logs(tracing::Level::DEBUG, || {
            auto_select_sync_checkpoint(tip);
        });
        assert!(logs.contains("selected sync checkpoint"));
        assert!(logs.contains("DEBUG"));
        assert!(logs.contains("sync_height=500"));

        let logs = captured_logs(tracing::Level::INFO, || {
            auto_select_sync_checkpoint(tip);
        });
        assert!(!logs.contains("selected sync checkpoint"));
    }

    #[test]
    fn short_chain_selects_genesis() {
        let index = chain(300);
        let sync = auto_select_sync_checkpoint(index.tip().unwrap());
        assert_eq!(sync.height(), 0);
        assert!(sync.is_genesis());
    }

    #[test]
    fn chain_of_exactly_span_selects_genesis() {
        // Tip at height 500: genesis is exactly span blocks behind.
        let index = chain(501);
        let sync = auto_select_sync_checkpoint(index.tip().unwrap());
        assert_eq!(sync.height(), 0);
    }

    #[test]
    fn genesis_tip_selects_itself() {
        let index = chain(1);
        let tip = index.tip().unwrap();
        assert_eq!(auto_select_sync_checkpoint(tip).height(), 0);
        assert!(!check_sync(0, tip));
        assert!(check_sync(1, tip));
    }

    #[test]
    fn zero_span_selects_tip() {
        let index = chain(20);
        let tip = index.tip().unwrap();
        assert_eq!(auto_select_sync_checkpoint_with(tip, 0).height(), 19);
    }

    #[test]
    fn walk_follows_fork_not_best_chain() {
        let mut index = chain(600);
        // Fork off height 200 and build a branch up to height 260.
        let mut prev = h(199);
        for height in 200..=260 {
            let fork_hash = h(10_000 + height);
            index.insert(fork_hash, &prev).unwrap();
            prev = fork_hash;
        }
        let fork_tip = index.get(&prev).unwrap();
        let sync = auto_select_sync_checkpoint_with(fork_tip.as_ref(), 50);
        assert_eq!(sync.height(), 210);
        assert_eq!(sync.hash(), h(10_210));
    }

    // ------------------------------------------------------------------
    // check_sync
    // ------------------------------------------------------------------

    #[test]
    fn check_sync_boundary() {
        let index = chain(1001);
        let tip = index.tip().unwrap();
        assert!(!check_sync(0, tip));
        assert!(!check_sync(499, tip));
        assert!(!check_sync(500, tip));
        assert!(check_sync(501, tip));
        assert!(check_sync(1000, tip));
        assert!(check_sync(u64::MAX, tip));
    }

    #[test]
    fn check_sync_short_chain_rejects_only_genesis() {
        let index = chain(100);
        let tip = index.tip().unwrap();
        assert!(!check_sync(0, tip));
        assert!(check_sync(1, tip));
    }

    // ------------------------------------------------------------------
    // sync_boundary_height
    // ------------------------------------------------------------------

    #[test]
    fn boundary_height_saturates() {
        assert_eq!(sync_boundary_height(0), 0);
        assert_eq!(sync_boundary_height(499), 0);
        assert_eq!(sync_boundary_height(500), 0);
        assert_eq!(sync_boundary_height(501), 1);
        assert_eq!(sync_boundary_height(1000), 500);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn walk_agrees_with_boundary_height(len in 1u64..1_200, span in 0u64..700) {
            let index = chain(len);
            let tip = index.tip().unwrap();
            let sync = auto_select_sync_checkpoint_with(tip, span);
            prop_assert_eq!(sync.height(), sync_boundary_height_with(tip.height(), span));
        }

        #[test]
        fn check_sync_is_strictly_above_selection(len in 1u64..800, query in 0u64..1_000) {
            let index = chain(len);
            let tip = index.tip().unwrap();
            let sync_height = auto_select_sync_checkpoint(tip).height();
            prop_assert_eq!(check_sync(query, tip), query > sync_height);
        }
    }
}
