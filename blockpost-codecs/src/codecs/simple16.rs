//! Simple16: packs values into 32-bit words, each word a 4-bit selector
//! plus up to 28 payload bits split evenly among the values it holds. 16
//! selectors trade off how many values fit against how wide each one can
//! be; like the rest of the Simple family, it can't code a value needing
//! more than 28 bits (the optpfor selector deliberately stops before
//! trying a width Simple16 can't carry).
//!
//! Unconstrained on `n` and ignores `sum_of_values` — it has no notion of
//! a universe, it just packs whatever integers it's given.

use super::{bit_width, UNKNOWN_SUM};

/// (values_per_word, bits_per_value), selectors in increasing bit width.
const TABLE: [(u32, u32); 16] = [
    (28, 1),
    (14, 2),
    (9, 3),
    (7, 4),
    (5, 5),
    (4, 6),
    (4, 7),
    (3, 8),
    (3, 9),
    (2, 10),
    (2, 12),
    (2, 14),
    (1, 16),
    (1, 18),
    (1, 21),
    (1, 28),
];

/// Largest value Simple16 can carry.
pub const MAX_VALUE: u32 = (1 << 28) - 1;

fn selector_for(values: &[u32]) -> usize {
    for (sel, &(num, bits)) in TABLE.iter().enumerate() {
        if values.len() >= num as usize {
            let chunk = &values[..num as usize];
            if chunk.iter().copied().map(bit_width).max().unwrap_or(0) <= bits {
                return sel;
            }
        }
    }
    // Fall back to packing a single value at maximum width — always valid
    // since callers must keep values within MAX_VALUE.
    15
}

pub fn encode(in_: &[u32], _sum_of_values: u32, out: &mut Vec<u8>) {
    let mut pos = 0;
    while pos < in_.len() {
        let sel = selector_for(&in_[pos..]);
        let (num, bits) = TABLE[sel];
        let num = (num as usize).min(in_.len() - pos);
        let mut word: u32 = sel as u32;
        let mask = (1u32 << bits) - 1;
        for (i, &v) in in_[pos..pos + num].iter().enumerate() {
            debug_assert!(v <= MAX_VALUE, "simple16 value {v} exceeds 28-bit ceiling");
            word |= (v & mask) << (4 + i as u32 * bits);
        }
        out.extend_from_slice(&word.to_le_bytes());
        pos += num;
    }
    let _ = UNKNOWN_SUM;
}

pub fn decode(in_: &[u8], out: &mut [u32], _sum_of_values: u32, n: usize) -> usize {
    let mut pos = 0usize;
    let mut produced = 0usize;
    while produced < n {
        let word = u32::from_le_bytes(in_[pos..pos + 4].try_into().unwrap());
        pos += 4;
        let sel = (word & 0xF) as usize;
        let (num, bits) = TABLE[sel];
        let num = (num as usize).min(n - produced);
        let mask = (1u32 << bits) - 1;
        for i in 0..num {
            out[produced + i] = (word >> (4 + i as u32 * bits)) & mask;
        }
        produced += num;
    }
    pos
}
