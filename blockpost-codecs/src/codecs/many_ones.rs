//! A block that's mostly ones (dgaps mostly zero, after the all-ones
//! transform) with a minority of "exceptions". Exceptions are stored as
//! `(position-gap, value - 1)` pairs packed with Simple16; the rest of the
//! block is implicitly all-ones, exactly like [`super::all_ones`].
//!
//! Only a candidate when exceptions stay under 75% of the block — past
//! that point packing every value with a general codec wins.

use super::{simple16, UNKNOWN_SUM};

fn compute_exceptions(in_: &[u32], sum_of_values: u32) -> Vec<u32> {
    let n = in_.len();
    let decoding_docs = sum_of_values != UNKNOWN_SUM;
    let mut pos = if decoding_docs { 1usize } else { 0 };
    let mut last_exception_pos: i64 = if decoding_docs { 0 } else { -1 };

    let mut gaps = Vec::new();
    let mut values = Vec::new();
    while pos < n {
        let value = in_[pos];
        if value != 0 {
            let gap = (pos as i64 - last_exception_pos - 1) as u32;
            gaps.push(gap);
            values.push(value - 1);
            last_exception_pos = pos as i64;
        }
        pos += 1;
    }
    gaps.extend(values);
    gaps
}

/// Returns `false` (appending nothing) when there are no exceptions at all
/// (that block is `all_ones`' job, not this codec's) or when exceptions
/// cover more than 75% of the block.
pub fn encode(in_: &[u32], sum_of_values: u32, out: &mut Vec<u8>) -> bool {
    let exceptions = compute_exceptions(in_, sum_of_values);
    let exception_count = exceptions.len() / 2;
    if exception_count == 0 || exception_count as f64 > in_.len() as f64 * 0.75 {
        return false;
    }
    out.push((exception_count - 1) as u8);
    simple16::encode(&exceptions, sum_of_values, out);
    true
}

pub fn decode(in_: &[u8], out: &mut [u32], sum_of_values: u32, n: usize) -> usize {
    super::all_ones::decode(&[], out, sum_of_values, n);

    let exception_count = in_[0] as usize + 1;
    let to_decode = exception_count * 2;
    let mut exceptions = vec![0u32; to_decode];
    let consumed = simple16::decode(&in_[1..], &mut exceptions, sum_of_values, to_decode);

    let decoding_docs = sum_of_values != UNKNOWN_SUM;
    let mut exception_pos = exceptions[0] as usize + decoding_docs as usize;
    let mut exception_value_pos = exception_count;
    out[exception_pos] += exceptions[exception_value_pos] + 1;
    let mut sum_of_exceptions = out[exception_pos];

    for i in 1..exception_count {
        exception_pos += exceptions[i] as usize + 1;
        exception_value_pos += 1;
        let exception_value = exceptions[exception_value_pos] + 1;
        out[exception_pos] += exception_value;
        sum_of_exceptions += exception_value;
    }
    if decoding_docs {
        out[0] -= sum_of_exceptions;
    }
    1 + consumed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_single_exception_gap_and_value_from_spec() {
        let mut xs = vec![0u32; 128];
        xs[1] = 3;
        let exceptions = compute_exceptions(&xs, UNKNOWN_SUM);
        // one (gap, value) pair: gap = 1, value = 3 - 1 = 2
        assert_eq!(exceptions, vec![1, 2]);

        let mut buf = Vec::new();
        assert!(encode(&xs, UNKNOWN_SUM, &mut buf));
        let mut out = vec![0u32; 128];
        let consumed = decode(&buf, &mut out, UNKNOWN_SUM, 128);
        assert_eq!(out, xs);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn one_exception_in_freq_block() {
        let mut xs = vec![0u32; 128];
        xs[3] = 3; // raw value already minus-1 encoded upstream; here freq-1 == 3
        let mut buf = Vec::new();
        let ok = encode(&xs, UNKNOWN_SUM, &mut buf);
        assert!(ok);
        let mut out = vec![0u32; 128];
        let consumed = decode(&buf, &mut out, UNKNOWN_SUM, 128);
        assert_eq!(out, xs);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn several_exceptions_in_docs_block() {
        // For docs blocks sum_of_values is, by writer contract, the sum of
        // the whole gap array — index 0 is never itself treated as an
        // exception, it's recovered as sum_of_values minus the exceptions.
        let mut xs = vec![0u32; 64];
        xs[10] = 2;
        xs[40] = 1;
        xs[0] = 5;
        let sum_of_values: u32 = xs.iter().sum();
        let mut buf = Vec::new();
        assert!(encode(&xs, sum_of_values, &mut buf));
        let mut out = vec![0u32; 64];
        decode(&buf, &mut out, sum_of_values, 64);
        assert_eq!(out, xs);
    }

    #[test]
    fn too_many_exceptions_rejected() {
        // 13 of 16 nonzero is 81%, over the 75% threshold.
        let mut xs = vec![0u32; 16];
        for (i, v) in xs.iter_mut().enumerate() {
            if i < 13 {
                *v = 1;
            }
        }
        let mut buf = Vec::new();
        assert!(!encode(&xs, UNKNOWN_SUM, &mut buf));
        assert!(buf.is_empty());
    }

    #[test]
    fn all_zero_block_is_rejected_in_favor_of_all_ones() {
        let xs = vec![0u32; 32];
        let mut buf = Vec::new();
        assert!(!encode(&xs, UNKNOWN_SUM, &mut buf));
        assert!(buf.is_empty());
    }
}
