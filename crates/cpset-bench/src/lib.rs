//! Benchmark fixtures for cpset.
//!
//! - [`probe_points`]: deterministic query mix weighted toward the BMP
//! - [`scattered_table`]: many short runs over many blocks
//! - [`built_subsets`]: the same table built in every encoding

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use cpset_builder::{
    BlockSubsetBuilder, HashSubsetBuilder, OptimalHashSubsetBuilder, RangedSubsetBuilder,
};
use cpset_core::{Subset, MAX_CODE_POINT};

/// `count` code points from a fixed multiplicative sequence.
///
/// Three in four fall below `0x10000`, where real text lives.
pub fn probe_points(count: usize, seed: u64) -> Vec<u32> {
    (0..count as u64)
        .map(|i| {
            let x = (i ^ seed).wrapping_mul(6364136223846793007);
            let x = (x >> 33) as u32;
            if i % 4 == 3 {
                x % (MAX_CODE_POINT + 1)
            } else {
                x % 0x1_0000
            }
        })
        .collect()
}

/// `runs` ranges of 1 to 16 code points, spread over the code space.
pub fn scattered_table(runs: u32) -> Vec<(u32, u32)> {
    let stride = (MAX_CODE_POINT + 1) / runs.max(1);
    (0..runs)
        .map(|i| {
            let from = i * stride;
            let len = (u64::from(i).wrapping_mul(1442695040888963407) >> 60) as u32;
            (from, (from + len).min(MAX_CODE_POINT))
        })
        .collect()
}

/// `table` built by every builder, in flat, block, hash, optimal order.
pub fn built_subsets(table: &[(u32, u32)]) -> Vec<Arc<dyn Subset>> {
    vec![
        RangedSubsetBuilder::new().include_code_point_ranges(table).build(),
        BlockSubsetBuilder::new().include_code_point_ranges(table).build(),
        HashSubsetBuilder::new().include_code_point_ranges(table).build(),
        OptimalHashSubsetBuilder::new().include_code_point_ranges(table).build(),
    ]
}
