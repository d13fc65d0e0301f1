//! The document enumerator: a lazy, block-at-a-time cursor over one
//! posting list's bytes. Doc-ids decode eagerly per block (cheap — a
//! ≤128-element memcpy-scale operation); frequencies decode on first
//! access per block, since many query operators never need them for
//! every candidate they scan past.

use blockpost_codecs::codecs::UNKNOWN_SUM;
use blockpost_codecs::error::{PostingError, Result};
use blockpost_codecs::registry::decode_block;
use blockpost_codecs::tag::CodecTag;
use blockpost_codecs::tvb;

use crate::writer::BLOCK_SIZE;

fn read_u32_le(data: &[u8], offset: usize) -> Result<u32> {
    let bytes = data
        .get(offset..offset + 4)
        .ok_or_else(|| PostingError::MalformedInput(format!("table read past end at {offset}")))?;
    Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
}

/// Per-block metadata exposed without fully decoding the block — useful
/// for statistics and tests that want to inspect the container's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    pub index: usize,
    pub max_docid: u32,
    pub size: usize,
    /// Byte range of this block within the payload region.
    pub payload_range: (usize, usize),
}

pub struct Cursor<'a> {
    data: &'a [u8],
    universe: u32,
    n: usize,
    num_blocks: usize,
    maxima_start: usize,
    endpoints_start: usize,
    payload_start: usize,

    cur_block: usize,
    pos_in_block: usize,
    cur_block_base: u32,
    cur_block_max: u32,
    cur_block_size: usize,
    cur_doc_codec: CodecTag,
    cur_freq_codec: CodecTag,
    docs_buf: [u32; BLOCK_SIZE],
    freqs_buf: [u32; BLOCK_SIZE],
    freqs_decoded: bool,
    freqs_payload_start: usize,
    block_payload_end: usize,

    cur_docid: u32,
}

impl<'a> Cursor<'a> {
    /// Opens a cursor over `data`, the first byte of the list, with the
    /// given `universe`. Equivalent to constructing and calling `reset()`.
    pub fn open(data: &'a [u8], universe: u32) -> Result<Self> {
        let (n, after_header) = tvb::next(data, 0)?;
        let n = n as usize;
        let num_blocks = n.div_ceil(BLOCK_SIZE);
        let maxima_start = after_header;
        let endpoints_start = maxima_start + 4 * num_blocks;
        let payload_start = endpoints_start + 4 * num_blocks.saturating_sub(1);

        let mut cur = Cursor {
            data,
            universe,
            n,
            num_blocks,
            maxima_start,
            endpoints_start,
            payload_start,
            cur_block: 0,
            pos_in_block: 0,
            cur_block_base: 0,
            cur_block_max: 0,
            cur_block_size: 0,
            cur_doc_codec: CodecTag::SingleDummy,
            cur_freq_codec: CodecTag::SingleVbyte,
            docs_buf: [0; BLOCK_SIZE],
            freqs_buf: [0; BLOCK_SIZE],
            freqs_decoded: false,
            freqs_payload_start: 0,
            block_payload_end: 0,
            cur_docid: universe,
        };
        cur.reset()?;
        Ok(cur)
    }

    /// Repositions at the very first posting (or `universe` if the list is
    /// empty).
    pub fn reset(&mut self) -> Result<()> {
        self.cur_block = 0;
        self.pos_in_block = 0;
        if self.n == 0 {
            self.cur_docid = self.universe;
            return Ok(());
        }
        self.decode_docs_block(0)
    }

    pub fn docid(&self) -> u32 {
        self.cur_docid
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn position(&self) -> usize {
        self.cur_block * BLOCK_SIZE + self.pos_in_block
    }

    /// Decodes the current block's frequency payload on first call per
    /// block, then returns the frequency at the current position.
    pub fn freq(&mut self) -> Result<u32> {
        if !self.freqs_decoded {
            self.decode_freqs_block()?;
        }
        Ok(self.freqs_buf[self.pos_in_block] + 1)
    }

    /// Advances one posting. Past the last posting, sets `docid()` to
    /// `universe` and becomes a no-op.
    pub fn next(&mut self) -> Result<()> {
        if self.cur_docid == self.universe {
            return Ok(());
        }
        self.pos_in_block += 1;
        if self.pos_in_block < self.cur_block_size {
            let gap = self.docs_buf[self.pos_in_block];
            self.cur_docid += gap + 1;
            self.validate_docid()?;
            return Ok(());
        }
        if self.cur_block + 1 >= self.num_blocks {
            self.cur_docid = self.universe;
            return Ok(());
        }
        self.decode_docs_block(self.cur_block + 1)
    }

    /// Positions at the smallest doc-id ≥ `lb`. Precondition: `lb >=
    /// docid()` or `position() == 0`. Forward-scans the block-maxima
    /// table to find the first block that might contain `lb` — never a
    /// binary search, per the container's documented cursor contract.
    pub fn next_geq(&mut self, lb: u32) -> Result<()> {
        if self.position() != 0 && lb < self.cur_docid {
            return Err(PostingError::PreconditionViolation(format!(
                "next_geq({lb}) called below current doc-id {}",
                self.cur_docid
            )));
        }
        if self.cur_docid >= lb {
            return Ok(());
        }
        if lb > self.cur_block_max {
            let mut b = self.cur_block + 1;
            while b < self.num_blocks && self.read_maxima(b)? < lb {
                b += 1;
            }
            if b >= self.num_blocks {
                self.cur_docid = self.universe;
                return Ok(());
            }
            self.decode_docs_block(b)?;
        }
        while self.cur_docid < lb && self.cur_docid != self.universe {
            self.next()?;
        }
        Ok(())
    }

    /// Positions at logical index `pos`, decoding the containing block if
    /// it differs from the current one. Precondition: `pos >=
    /// position()`.
    pub fn move_to(&mut self, pos: usize) -> Result<()> {
        if pos < self.position() {
            return Err(PostingError::PreconditionViolation(format!(
                "move_to({pos}) called before current position {}",
                self.position()
            )));
        }
        let target_block = pos / BLOCK_SIZE;
        let target_pos_in_block = pos % BLOCK_SIZE;
        if target_block != self.cur_block {
            self.decode_docs_block(target_block)?;
        }
        while self.pos_in_block < target_pos_in_block {
            self.pos_in_block += 1;
            let gap = self.docs_buf[self.pos_in_block];
            self.cur_docid += gap + 1;
        }
        self.validate_docid()
    }

    /// Per-block metadata without decoding any codec payload — only the
    /// block-maxima/endpoint tables and each block's TVB size prefix are
    /// read.
    pub fn blocks(&self) -> Result<Vec<BlockInfo>> {
        let mut out = Vec::with_capacity(self.num_blocks);
        let mut start = 0usize;
        for b in 0..self.num_blocks {
            let end = if b + 1 < self.num_blocks {
                self.read_endpoint(b)? as usize
            } else {
                self.data.len() - self.payload_start
            };
            let (_, size) = tvb::next(self.data, self.payload_start + start)?;
            out.push(BlockInfo {
                index: b,
                max_docid: self.read_maxima(b)?,
                size: size as usize,
                payload_range: (start, end),
            });
            start = end;
        }
        Ok(out)
    }

    fn validate_docid(&self) -> Result<()> {
        if self.cur_docid != self.universe && self.cur_docid >= self.universe {
            return Err(PostingError::UniverseViolation {
                doc_id: self.cur_docid,
                universe: self.universe,
            });
        }
        Ok(())
    }

    fn read_maxima(&self, b: usize) -> Result<u32> {
        read_u32_le(self.data, self.maxima_start + 4 * b)
    }

    fn read_endpoint(&self, b: usize) -> Result<u32> {
        read_u32_le(self.data, self.endpoints_start + 4 * b)
    }

    fn decode_docs_block(&mut self, b: usize) -> Result<()> {
        let block_start = if b == 0 {
            0
        } else {
            self.read_endpoint(b - 1)? as usize
        };
        let block_end = if b + 1 < self.num_blocks {
            self.read_endpoint(b)? as usize
        } else {
            self.data.len() - self.payload_start
        };
        let mut ptr = self.payload_start + block_start;

        let (new_ptr, cur_block_size) = tvb::next(self.data, ptr)?;
        ptr = new_ptr;
        let cur_block_size = cur_block_size as usize;
        if cur_block_size == 0 || cur_block_size > BLOCK_SIZE {
            return Err(PostingError::MalformedInput(format!(
                "block {b} claims size {cur_block_size}"
            )));
        }

        let cur_base = if b == 0 {
            0
        } else {
            self.read_maxima(b - 1)? + 1
        };
        let cur_block_max = self.read_maxima(b)?;

        let (doc_tag, freq_tag) = if cur_block_size > 1 {
            let byte = *self
                .data
                .get(ptr)
                .ok_or_else(|| PostingError::MalformedInput(format!("block {b} missing codec byte")))?;
            ptr += 1;
            (
                CodecTag::from_tag(byte & 0xF)?,
                CodecTag::from_tag(byte >> 4)?,
            )
        } else {
            (CodecTag::SingleDummy, CodecTag::SingleVbyte)
        };

        let doc_universe = cur_block_max
            .wrapping_sub(cur_base)
            .wrapping_sub(cur_block_size as u32 - 1);
        let consumed = decode_block(
            doc_tag,
            &self.data[ptr..],
            &mut self.docs_buf[..cur_block_size],
            doc_universe,
            cur_block_size,
        )?;
        self.docs_buf[0] += cur_base;

        self.cur_block = b;
        self.pos_in_block = 0;
        self.cur_block_base = cur_base;
        self.cur_block_max = cur_block_max;
        self.cur_block_size = cur_block_size;
        self.cur_doc_codec = doc_tag;
        self.cur_freq_codec = freq_tag;
        self.freqs_payload_start = ptr + consumed;
        self.block_payload_end = self.payload_start + block_end;
        self.freqs_decoded = false;
        self.cur_docid = self.docs_buf[0];
        self.validate_docid()
    }

    fn decode_freqs_block(&mut self) -> Result<()> {
        let consumed = decode_block(
            self.cur_freq_codec,
            &self.data[self.freqs_payload_start..],
            &mut self.freqs_buf[..self.cur_block_size],
            UNKNOWN_SUM,
            self.cur_block_size,
        )?;
        let actual_end = self.freqs_payload_start + consumed;
        if actual_end != self.block_payload_end {
            return Err(PostingError::SizeMismatch {
                consumed: actual_end - self.payload_start,
                expected: self.block_payload_end - self.payload_start,
            });
        }
        self.freqs_decoded = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::write_posting_list;

    fn build(docids: &[u32], freqs: &[u32], universe: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        write_posting_list(&mut bytes, docids, freqs, universe);
        bytes
    }

    #[test]
    fn skips_to_first_doc_geq_lower_bound() {
        let docids = vec![5u32, 10, 200, 2000, 20000];
        let freqs = vec![1u32, 1, 3, 2, 1];
        let universe = 30000;
        let bytes = build(&docids, &freqs, universe);
        let mut cur = Cursor::open(&bytes, universe).unwrap();

        cur.next_geq(150).unwrap();
        assert_eq!(cur.docid(), 200);
        assert_eq!(cur.freq().unwrap(), 3);

        cur.next_geq(2500).unwrap();
        assert_eq!(cur.docid(), 20000);
    }

    #[test]
    fn next_geq_past_last_doc_exhausts() {
        let docids = vec![1u32, 2, 3];
        let freqs = vec![1u32, 1, 1];
        let universe = 100;
        let bytes = build(&docids, &freqs, universe);
        let mut cur = Cursor::open(&bytes, universe).unwrap();
        cur.next_geq(50).unwrap();
        assert_eq!(cur.docid(), universe);
    }

    #[test]
    fn repeated_next_geq_same_bound_is_a_no_op() {
        let docids = vec![1u32, 5, 9];
        let freqs = vec![1u32, 1, 1];
        let universe = 20;
        let bytes = build(&docids, &freqs, universe);
        let mut cur = Cursor::open(&bytes, universe).unwrap();
        cur.next_geq(5).unwrap();
        assert_eq!(cur.docid(), 5);
        cur.next_geq(5).unwrap();
        assert_eq!(cur.docid(), 5);
    }

    #[test]
    fn move_to_lands_on_exact_logical_position() {
        let docids: Vec<u32> = (0..260u32).map(|i| i * 2).collect();
        let freqs = vec![1u32; 260];
        let universe = docids.last().unwrap() + 1;
        let bytes = build(&docids, &freqs, universe);
        let mut cur = Cursor::open(&bytes, universe).unwrap();

        cur.move_to(140).unwrap();
        assert_eq!(cur.position(), 140);
        assert_eq!(cur.docid(), docids[140]);
    }

    #[test]
    fn move_to_backwards_is_a_precondition_violation() {
        let docids = vec![1u32, 2, 3, 4];
        let freqs = vec![1u32; 4];
        let universe = 10;
        let bytes = build(&docids, &freqs, universe);
        let mut cur = Cursor::open(&bytes, universe).unwrap();
        cur.move_to(3).unwrap();
        assert!(matches!(
            cur.move_to(1),
            Err(PostingError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn blocks_reports_metadata_without_decoding_codecs() {
        let docids: Vec<u32> = (0..300u32).collect();
        let freqs = vec![1u32; 300];
        let universe = 300;
        let bytes = build(&docids, &freqs, universe);
        let cur = Cursor::open(&bytes, universe).unwrap();
        let blocks = cur.blocks().unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].size, 128);
        assert_eq!(blocks[2].size, 44);
        assert_eq!(blocks[0].max_docid, 127);
        assert_eq!(blocks[2].max_docid, 299);
    }

    #[test]
    fn empty_list_cursor_starts_exhausted() {
        let bytes = build(&[], &[], 10);
        let cur = Cursor::open(&bytes, 10).unwrap();
        assert_eq!(cur.size(), 0);
        assert_eq!(cur.docid(), 10);
    }
}
