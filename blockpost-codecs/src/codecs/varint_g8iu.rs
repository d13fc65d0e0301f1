//! VarIntG8IU: packs as many values as fit into an 8-byte lane, one
//! descriptor byte per lane marking which of the 8 data bytes is the last
//! byte of some integer (so the lane holds anywhere from 2 values, if all
//! are 4 bytes, to 8, if all are 1 byte). Real implementations decode a
//! lane with a SIMD shuffle driven by a 256-entry mask table keyed on the
//! descriptor; here the same boundary information is just walked byte by
//! byte.
//!
//! Only a sensible candidate once a block has at least 8 postings.

use super::bit_width;

fn byte_len(v: u32) -> usize {
    match bit_width(v) {
        0..=8 => 1,
        9..=16 => 2,
        17..=24 => 3,
        _ => 4,
    }
}

pub fn encode(in_: &[u32], _sum_of_values: u32, out: &mut Vec<u8>) {
    let mut pos = 0;
    while pos < in_.len() {
        let mut data = [0u8; 8];
        let mut used = 0usize;
        let mut descriptor = 0u8;
        while pos < in_.len() {
            let v = in_[pos];
            let len = byte_len(v);
            if used + len > 8 {
                break;
            }
            data[used..used + len].copy_from_slice(&v.to_le_bytes()[..len]);
            used += len;
            descriptor |= 1 << (used - 1);
            pos += 1;
        }
        out.push(descriptor);
        out.extend_from_slice(&data);
    }
}

pub fn decode(in_: &[u8], out: &mut [u32], _sum_of_values: u32, n: usize) -> usize {
    let mut pos = 0usize;
    let mut produced = 0usize;
    while produced < n {
        let descriptor = in_[pos];
        let data = &in_[pos + 1..pos + 9];
        pos += 9;
        let mut start = 0usize;
        for byte_idx in 0..8 {
            if descriptor & (1 << byte_idx) != 0 {
                let len = byte_idx - start + 1;
                let mut buf = [0u8; 4];
                buf[..len].copy_from_slice(&data[start..start + len]);
                if produced < n {
                    out[produced] = u32::from_le_bytes(buf);
                    produced += 1;
                }
                start = byte_idx + 1;
            }
        }
    }
    pos
}
