//! Criterion benchmarks for radium-consensus hot paths.
//!
//! Covers: hardened-checkpoint lookup, last-checkpoint resolution, and the
//! sync-checkpoint walk.

use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use radium_core::block_index::MemoryBlockIndex;
use radium_core::constants::NetworkType;
use radium_core::types::Hash256;
use radium_consensus::checkpoint::CheckpointRegistry;
use radium_consensus::sync::auto_select_sync_checkpoint;

fn h(n: u64) -> Hash256 {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&n.to_be_bytes());
    Hash256(bytes)
}

fn bench_check_hardened(c: &mut Criterion) {
    let registry = CheckpointRegistry::new().expect("compiled-in tables are valid");
    let table = registry.table_for(NetworkType::Mainnet);
    let hit = table.last().expect("mainnet has checkpoints");
    let (hit_height, hit_hash) = (hit.height, hit.hash);

    c.bench_function("check_hardened_hit", |b| {
        b.iter(|| registry.check_hardened(NetworkType::Mainnet, black_box(hit_height), black_box(&hit_hash)))
    });
    c.bench_function("check_hardened_miss", |b| {
        b.iter(|| registry.check_hardened(NetworkType::Mainnet, black_box(123_456), black_box(&Hash256::ZERO)))
    });
}

fn bench_last_checkpoint(c: &mut Criterion) {
    let registry = CheckpointRegistry::new().expect("compiled-in tables are valid");
    let table = registry.table_for(NetworkType::Mainnet);

    // Only genesis is indexed: worst case, every entry is looked up.
    let mut index: HashMap<Hash256, u64> = HashMap::new();
    if let Some(genesis) = table.iter().next() {
        index.insert(genesis.hash, 0);
    }

    c.bench_function("last_checkpoint_genesis_only", |b| {
        b.iter(|| registry.last_checkpoint(NetworkType::Mainnet, black_box(&index)))
    });
}

fn bench_sync_walk(c: &mut Criterion) {
    let mut index = MemoryBlockIndex::new();
    index.insert_genesis(h(0)).expect("empty index");
    for height in 1..2_000 {
        index.insert(h(height), &h(height - 1)).expect("linear chain");
    }
    let tip = index.tip().expect("non-empty index");

    c.bench_function("auto_select_sync_checkpoint_2000", |b| {
        b.iter(|| auto_select_sync_checkpoint(black_box(tip)))
    });
}

criterion_group!(
    benches,
    bench_check_hardened,
    bench_last_checkpoint,
    bench_sync_walk
);
criterion_main!(benches);
