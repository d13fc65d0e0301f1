//! List-partitioning heuristics: chunk an ascending doc-id list into
//! pieces before per-block codec selection runs. Both partitioners
//! consume a plain `&[u32]` and return chunk sizes summing to
//! `list.len()` — callers feed those sizes into the writer.

pub mod greedy;
pub mod mc_optimal;

pub use greedy::greedy_partition;
pub use mc_optimal::{default_cost_fn, mc_optimal_partition};
