//! Writes a posting list into the self-describing container laid out in
//! the crate root docs: `TVB(n)` · block-maxima table · block-endpoints
//! table · payload. Payload must follow the two tables, so the writer
//! stages the per-block bytes in a scratch buffer before appending
//! anything to the caller's sink — the table entries aren't known until
//! every block has been sized.

use blockpost_codecs::codecs::UNKNOWN_SUM;
use blockpost_codecs::registry::select_best;
use blockpost_codecs::tvb;
use log::debug;

use crate::stats::{BlockStats, SequenceKind};

/// Fixed block length for the container layout (spec §3). A handful of
/// codecs use a different natural lane width internally, but every block
/// the container writes and reads is this size except a shorter final one.
pub const BLOCK_SIZE: usize = 128;

/// Append-only output. Implemented for `Vec<u8>`; this crate touches no
/// file handle or mmap directly, so callers own how the bytes ultimately
/// land on disk.
pub trait ByteSink {
    fn append(&mut self, bytes: &[u8]);
}

impl ByteSink for Vec<u8> {
    fn append(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Writes a complete posting list to `sink`.
///
/// Preconditions (caller-enforced, no recovery path — the writer must be
/// correct by construction): `docids` strictly ascending in
/// `[0, universe)`; `freqs` the same length as `docids`, every entry ≥ 1.
pub fn write_posting_list(
    sink: &mut impl ByteSink,
    docids: &[u32],
    freqs: &[u32],
    universe: u32,
) {
    write_impl(sink, docids, freqs, universe, None);
}

/// Identical to [`write_posting_list`], but also returns one [`BlockStats`]
/// row per encoded sequence (two per block: doc-gaps and freq-minus-1) for
/// offline tuning. Never read back by the cursor.
pub fn write_posting_list_with_stats(
    sink: &mut impl ByteSink,
    docids: &[u32],
    freqs: &[u32],
    universe: u32,
) -> Vec<BlockStats> {
    let mut stats = Vec::new();
    write_impl(sink, docids, freqs, universe, Some(&mut stats));
    stats
}

fn write_impl(
    sink: &mut impl ByteSink,
    docids: &[u32],
    freqs: &[u32],
    universe: u32,
    mut stats: Option<&mut Vec<BlockStats>>,
) {
    debug_assert_eq!(docids.len(), freqs.len(), "docids/freqs length mismatch");
    debug_assert!(
        docids.windows(2).all(|w| w[0] < w[1]),
        "doc-ids must be strictly ascending"
    );
    debug_assert!(
        docids.last().map(|&d| d < universe).unwrap_or(true),
        "doc-ids must stay below the universe"
    );
    debug_assert!(freqs.iter().all(|&f| f >= 1), "frequencies must be >= 1");

    let n = docids.len();
    let mut header = Vec::new();
    tvb::encode_single(n as u32, &mut header);
    sink.append(&header);

    if n == 0 {
        return;
    }

    let num_blocks = n.div_ceil(BLOCK_SIZE);
    let mut maxima = Vec::with_capacity(num_blocks);
    let mut endpoints = Vec::with_capacity(num_blocks.saturating_sub(1));
    let mut payload = Vec::new();

    let mut block_base: u32 = 0;
    for b in 0..num_blocks {
        let start = b * BLOCK_SIZE;
        let end = (start + BLOCK_SIZE).min(n);
        let cur_block_size = end - start;
        let block_docids = &docids[start..end];
        let block_freqs = &freqs[start..end];
        let block_max = block_docids[cur_block_size - 1];
        maxima.push(block_max);

        tvb::encode_single(cur_block_size as u32, &mut payload);

        let mut doc_gaps = vec![0u32; cur_block_size];
        doc_gaps[0] = block_docids[0] - block_base;
        for i in 1..cur_block_size {
            doc_gaps[i] = block_docids[i] - block_docids[i - 1] - 1;
        }
        let mut freq_gaps = vec![0u32; cur_block_size];
        for (g, &f) in freq_gaps.iter_mut().zip(block_freqs) {
            *g = f - 1;
        }

        let doc_sum_of_values = block_max - block_base - (cur_block_size as u32 - 1);
        let (doc_tag, doc_bytes) = select_best(&doc_gaps, doc_sum_of_values);
        let (freq_tag, freq_bytes) = select_best(&freq_gaps, UNKNOWN_SUM);

        if cur_block_size > 1 {
            payload.push(doc_tag.tag() | (freq_tag.tag() << 4));
        }
        debug!(
            "block {b}: size={cur_block_size} doc={doc_tag:?} ({}B) freq={freq_tag:?} ({}B)",
            doc_bytes.len(),
            freq_bytes.len()
        );
        if let Some(stats) = stats.as_deref_mut() {
            stats.push(BlockStats::compute(
                b,
                SequenceKind::Docs,
                doc_tag,
                &doc_gaps,
                doc_bytes.len(),
            ));
            stats.push(BlockStats::compute(
                b,
                SequenceKind::Freqs,
                freq_tag,
                &freq_gaps,
                freq_bytes.len(),
            ));
        }
        payload.extend_from_slice(&doc_bytes);
        payload.extend_from_slice(&freq_bytes);

        if b < num_blocks - 1 {
            endpoints.push(payload.len() as u32);
        }

        block_base = block_max + 1;
    }

    for m in &maxima {
        sink.append(&m.to_le_bytes());
    }
    for e in &endpoints {
        sink.append(&e.to_le_bytes());
    }
    sink.append(&payload);
}
