//! QMX (simplified): splits a run of values into variable-length runs that
//! share a bit width, each run prefixed with a TVB-encoded `(run_len, bits)`
//! pair followed by the fixed-width packed payload. The real QMX also folds
//! a run-length byte into SSE-friendly shuffle tables and special-cases
//! runs of 1s; this keeps the run-length framing without the SIMD layout.

use crate::bitio::{BitReader, BitWriter};
use crate::tvb;

use super::bit_width;

/// Longest a single run is allowed to be, so `run_len` always fits in one
/// TVB byte and a single pathological run can't dominate the block.
const MAX_RUN: usize = 127;

pub fn encode(in_: &[u32], _sum_of_values: u32, out: &mut Vec<u8>) {
    let mut pos = 0;
    while pos < in_.len() {
        let bits = bit_width(in_[pos]);
        let mut run_len = 1;
        while run_len < MAX_RUN
            && pos + run_len < in_.len()
            && bit_width(in_[pos + run_len]) <= bits
        {
            run_len += 1;
        }
        tvb::encode_single(run_len as u32, out);
        tvb::encode_single(bits, out);
        let mut writer = BitWriter::new();
        for &v in &in_[pos..pos + run_len] {
            writer.write_bits(v, bits);
        }
        out.extend_from_slice(&writer.into_bytes());
        pos += run_len;
    }
}

pub fn decode(in_: &[u8], out: &mut [u32], _sum_of_values: u32, n: usize) -> usize {
    let mut pos = 0usize;
    let mut produced = 0usize;
    while produced < n {
        let (p1, run_len) = tvb::next(in_, pos).expect("qmx run header is well-formed TVB");
        let (p2, bits) = tvb::next(in_, p1).expect("qmx run header is well-formed TVB");
        let run_len = run_len as usize;
        let packed_bytes = (run_len as u32 * bits).div_ceil(8) as usize;
        let mut reader = BitReader::new(&in_[p2..p2 + packed_bytes]);
        for slot in out[produced..produced + run_len].iter_mut() {
            *slot = reader.read_bits(bits);
        }
        produced += run_len;
        pos = p2 + packed_bytes;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::UNKNOWN_SUM;

    #[test]
    fn round_trips_runs_of_varying_width() {
        let mut xs = vec![1u32; 10];
        xs.extend(vec![500u32; 5]);
        xs.extend(vec![0u32; 20]);
        xs.push(70_000);
        let mut buf = Vec::new();
        encode(&xs, UNKNOWN_SUM, &mut buf);
        let mut out = vec![0u32; xs.len()];
        let consumed = decode(&buf, &mut out, UNKNOWN_SUM, xs.len());
        assert_eq!(out, xs);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn single_value_run() {
        let xs = vec![42u32];
        let mut buf = Vec::new();
        encode(&xs, UNKNOWN_SUM, &mut buf);
        let mut out = vec![0u32; 1];
        decode(&buf, &mut out, UNKNOWN_SUM, 1);
        assert_eq!(out, xs);
    }

    #[test]
    fn run_longer_than_cap_splits_into_multiple_runs() {
        let xs = vec![3u32; 300];
        let mut buf = Vec::new();
        encode(&xs, UNKNOWN_SUM, &mut buf);
        let mut out = vec![0u32; xs.len()];
        let consumed = decode(&buf, &mut out, UNKNOWN_SUM, xs.len());
        assert_eq!(out, xs);
        assert_eq!(consumed, buf.len());
    }
}
