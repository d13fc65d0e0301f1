//! Per-block diagnostic records, for offline tuning only — nothing here
//! is read back by the cursor at query time (spec §4.7). One [`BlockStats`]
//! is produced per encoded sequence (the doc-gap buffer and the
//! freq-minus-1 buffer are each their own row, tagged by [`SequenceKind`],
//! since they're encoded with independently chosen codecs).

use blockpost_codecs::tag::CodecTag;

/// Which half of a block a [`BlockStats`] row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    Docs,
    Freqs,
}

/// Diagnostic record for one encoded sequence (doc-gaps or freq-minus-1
/// values) within one block. Fields mirror spec §4.7 exactly: gap/number
/// extrema, the two average-distance metrics, a zero count and a
/// less-than-8 count (both cheap proxies for "how compressible is this
/// run" that a tuning pass can bucket blocks by).
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStats {
    pub block_index: usize,
    pub kind: SequenceKind,
    pub codec: CodecTag,
    pub chunk_size: usize,
    pub compressed_size: usize,
    pub min_gap: u32,
    pub max_gap: u32,
    pub min_num: u32,
    pub max_num: u32,
    pub avg_gap_distance: f64,
    pub avg_num_distance: f64,
    pub zero_count: usize,
    pub less_than_8_count: usize,
}

impl BlockStats {
    /// Computes a record from the raw values handed to the codec selector
    /// (gaps, for either sequence) plus the winning codec and its
    /// compressed byte length. `values` is never empty — the writer never
    /// calls this for a zero-size block.
    pub fn compute(
        block_index: usize,
        kind: SequenceKind,
        codec: CodecTag,
        values: &[u32],
        compressed_size: usize,
    ) -> Self {
        debug_assert!(!values.is_empty(), "stats computed over an empty block");
        let chunk_size = values.len();
        let min_gap = *values.iter().min().unwrap();
        let max_gap = *values.iter().max().unwrap();

        let mut running = 0u32;
        let mut min_num = u32::MAX;
        let mut max_num = 0u32;
        let mut nums = Vec::with_capacity(chunk_size);
        for &g in values {
            running += g;
            min_num = min_num.min(running);
            max_num = max_num.max(running);
            nums.push(running);
        }

        let avg_gap_distance = if chunk_size > 1 {
            let total: u64 = values
                .windows(2)
                .map(|w| (w[1] as i64 - w[0] as i64).unsigned_abs())
                .sum();
            total as f64 / (chunk_size - 1) as f64
        } else {
            0.0
        };
        let avg_num_distance = max_num as f64 / chunk_size as f64;

        let zero_count = values.iter().filter(|&&v| v == 0).count();
        let less_than_8_count = values.iter().filter(|&&v| v < 8).count();

        BlockStats {
            block_index,
            kind,
            codec,
            chunk_size,
            compressed_size,
            min_gap,
            max_gap,
            min_num,
            max_num,
            avg_gap_distance,
            avg_num_distance,
            zero_count,
            less_than_8_count,
        }
    }

    pub fn csv_header() -> &'static str {
        "block_index,kind,codec,chunk_size,compressed_size,min_gap,max_gap,min_num,max_num,avg_gap_distance,avg_num_distance,zero_count,less_than_8_count"
    }

    /// Renders one CSV row, matching [`BlockStats::csv_header`]'s column
    /// order. No quoting needed — every field is numeric or one of the two
    /// fixed identifiers below.
    pub fn to_csv_row(&self) -> String {
        let kind = match self.kind {
            SequenceKind::Docs => "docs",
            SequenceKind::Freqs => "freqs",
        };
        format!(
            "{},{},{:?},{},{},{},{},{},{},{:.3},{:.3},{},{}",
            self.block_index,
            kind,
            self.codec,
            self.chunk_size,
            self.compressed_size,
            self.min_gap,
            self.max_gap,
            self.min_num,
            self.max_num,
            self.avg_gap_distance,
            self.avg_num_distance,
            self.zero_count,
            self.less_than_8_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_extrema_and_zero_count_over_a_gap_run() {
        let gaps = vec![0u32, 0, 3, 0, 5];
        let stats = BlockStats::compute(0, SequenceKind::Docs, CodecTag::ManyOnes, &gaps, 4);
        assert_eq!(stats.min_gap, 0);
        assert_eq!(stats.max_gap, 5);
        assert_eq!(stats.zero_count, 3);
        assert_eq!(stats.less_than_8_count, 5);
    }

    #[test]
    fn avg_num_distance_matches_max_prefix_sum_over_chunk_size() {
        let gaps = vec![1u32, 1, 1, 1];
        let stats = BlockStats::compute(0, SequenceKind::Freqs, CodecTag::Simple16, &gaps, 2);
        // prefix sums are 1,2,3,4 -> max_num = 4, chunk_size = 4
        assert_eq!(stats.max_num, 4);
        assert!((stats.avg_num_distance - 1.0).abs() < 1e-9);
    }

    #[test]
    fn csv_row_has_one_field_per_header_column() {
        let gaps = vec![2u32, 4];
        let stats = BlockStats::compute(1, SequenceKind::Docs, CodecTag::StreamVbyte, &gaps, 3);
        let header_cols = BlockStats::csv_header().split(',').count();
        let row_cols = stats.to_csv_row().split(',').count();
        assert_eq!(header_cols, row_cols);
    }
}
