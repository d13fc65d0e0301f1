//! Self-describing block container for compressed ascending-integer
//! posting lists: a [`writer`] that lays out blocks and picks a codec per
//! block, a [`cursor`] for lazy forward/skipping traversal, list
//! [`partition`]ing heuristics to run ahead of the writer, and
//! [`stats`] to summarize a written list's block makeup.

pub mod cursor;
pub mod error;
pub mod partition;
pub mod stats;
pub mod writer;

pub use cursor::{BlockInfo, Cursor};
pub use error::{PostingError, Result};
pub use partition::{default_cost_fn, greedy_partition, mc_optimal_partition};
pub use stats::{BlockStats, SequenceKind};
pub use writer::{write_posting_list, write_posting_list_with_stats, ByteSink, BLOCK_SIZE};
