//! Binary interpolative coding (Moffat & Stuiver): recursively encodes an
//! ascending sequence bounded by `[lo, hi]` by writing the middle element
//! with the fewest bits its position allows, then recursing on the two
//! halves with tightened bounds. Good when gaps are fairly uniform; the
//! one codec here whose input must already be ascending rather than a
//! gap array, so the block writer feeds it cumulative sums.
//!
//! When `sum_of_values` is unknown (freq blocks) a TVB-encoded header
//! carries the block's total so the decoder can rebuild the same bound.

use crate::bitio::{read_minimal, write_minimal, BitReader, BitWriter};
use crate::tvb;

use super::UNKNOWN_SUM;

fn encode_range(writer: &mut BitWriter, vals: &[u32], lo: u32, hi: u32) {
    let m = vals.len();
    if m == 0 {
        return;
    }
    let mid = m / 2;
    let lo_bound = lo + mid as u32;
    let hi_bound = hi - (m - 1 - mid) as u32;
    let range_size = hi_bound - lo_bound + 1;
    write_minimal(writer, vals[mid] - lo_bound, range_size);
    encode_range(writer, &vals[..mid], lo, vals[mid] - 1);
    if mid + 1 < m {
        encode_range(writer, &vals[mid + 1..], vals[mid] + 1, hi);
    }
}

fn decode_range(reader: &mut BitReader, out: &mut [u32], lo: u32, hi: u32) {
    let m = out.len();
    if m == 0 {
        return;
    }
    let mid = m / 2;
    let lo_bound = lo + mid as u32;
    let hi_bound = hi - (m - 1 - mid) as u32;
    let range_size = hi_bound - lo_bound + 1;
    let v = lo_bound + read_minimal(reader, range_size);
    out[mid] = v;
    decode_range(reader, &mut out[..mid], lo, v - 1);
    if mid + 1 < m {
        decode_range(reader, &mut out[mid + 1..], v + 1, hi);
    }
}

/// `in_` holds dgaps (as the rest of the codecs see them); `sum_of_values`
/// is the universe of their sum, or [`UNKNOWN_SUM`] for freq blocks.
pub fn encode(in_: &[u32], sum_of_values: u32, out: &mut Vec<u8>) {
    let n = in_.len();
    if n == 0 {
        return;
    }
    let mut cumulative = vec![0u32; n];
    cumulative[0] = in_[0];
    for i in 1..n {
        cumulative[i] = cumulative[i - 1] + in_[i];
    }

    let sum = if sum_of_values == UNKNOWN_SUM {
        let total = cumulative[n - 1];
        tvb::encode_single(total, out);
        total
    } else {
        sum_of_values
    };

    let mut writer = BitWriter::new();
    encode_range(&mut writer, &cumulative[..n - 1], 0, sum);
    let bytes = writer.into_bytes();
    out.extend_from_slice(&bytes);
}

pub fn decode(in_: &[u8], out: &mut [u32], sum_of_values: u32, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut header_len = 0usize;
    let sum = if sum_of_values == UNKNOWN_SUM {
        let (new_pos, v) = tvb::next(in_, 0).expect("interpolative header TVB is self-describing");
        header_len = new_pos;
        v
    } else {
        sum_of_values
    };

    out[n - 1] = sum;
    let mut reader = BitReader::new(&in_[header_len..]);
    decode_range(&mut reader, &mut out[..n - 1], 0, sum);
    let body_bytes = reader.position().div_ceil(8);

    // Undo the cumulative-sum transform to recover dgaps.
    for i in (1..n).rev() {
        out[i] -= out[i - 1];
    }
    header_len + body_bytes
}
