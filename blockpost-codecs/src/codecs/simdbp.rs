//! SIMD-BP128 (simplified): every value in a full 128-value block is
//! packed at the single bit width the largest of them needs, one byte
//! header followed by the packed payload. Real SIMD-BP128 packs 32 values
//! at a time across four interleaved SSE lanes to keep the unpack loop
//! branch-free; the single `BitReader`/`BitWriter` stream here preserves
//! the "one width for the whole block, no exceptions" shape without the
//! lane interleaving.
//!
//! Only a candidate for full-size blocks (`n == 128`); unlike
//! [`super::optpfor`] it has no exception mechanism, so a single outlier
//! forces the whole block to its width.

use crate::bitio::{BitReader, BitWriter};

use super::max_bit_width;

pub const BLOCK_LEN: usize = 128;

pub fn encode(in_: &[u32], _sum_of_values: u32, out: &mut Vec<u8>) {
    let bits = max_bit_width(in_);
    out.push(bits as u8);
    let mut writer = BitWriter::new();
    for &v in in_ {
        writer.write_bits(v, bits);
    }
    out.extend_from_slice(&writer.into_bytes());
}

pub fn decode(in_: &[u8], out: &mut [u32], _sum_of_values: u32, n: usize) -> usize {
    let bits = in_[0] as u32;
    let packed_bytes = (n as u32 * bits).div_ceil(8) as usize;
    let mut reader = BitReader::new(&in_[1..1 + packed_bytes]);
    for slot in out.iter_mut().take(n) {
        *slot = reader.read_bits(bits);
    }
    1 + packed_bytes
}
