//! Tag-indexed dispatch: decoding a block is a `match` on its stored
//! [`CodecTag`], and encoding a block is exhaustive search over every
//! eligible candidate, keeping whichever produces the fewest bytes.
//!
//! A `match`-dispatched enum rather than a `dyn Codec` trait object, per
//! the design note in the container format: the fixed, closed set of
//! codecs makes a vtable indirection pure overhead, and an exhaustive
//! `match` gives the compiler a chance to flag a codec the dispatch table
//! forgot.

use crate::codecs::{
    all_ones, interpolative, many_ones, maskedvbyte, optpfor, qmx, simdbp, simple16, simple8b,
    streamvbyte, varint_g8iu, varintgb, UNKNOWN_SUM,
};
use crate::error::PostingError;
use crate::tag::{CodecTag, ENUMERATED_CANDIDATES};
use crate::tvb;

/// Whether `tag` may even be tried for a block of `n` values. `Simdbp` and
/// `OptPfor` only make sense at the fixed SIMD-lane block length; below
/// that they're simply not attempted, same as the original.
fn is_eligible(tag: CodecTag, n: usize) -> bool {
    match tag {
        CodecTag::VarintG8iu => n >= 8,
        CodecTag::OptPfor | CodecTag::Simdbp => n == simdbp::BLOCK_LEN,
        _ => true,
    }
}

fn fits_simple16(in_: &[u32]) -> bool {
    in_.iter().all(|&v| v <= simple16::MAX_VALUE)
}

/// Picks the smallest encoding of `in_` over every eligible codec. `n == 1`
/// short-circuits to one of the two degenerate single-posting codecs, which
/// are otherwise never reachable through [`ENUMERATED_CANDIDATES`]: a docs
/// block (`sum_of_values` known) always uses `single_dummy`, since the
/// value is fully recoverable from `sum_of_values` regardless of what
/// `in_[0]` happens to be; a freq block (`sum_of_values == UNKNOWN_SUM`)
/// has no such substitute and always uses `single_vbyte`.
/// Ties in byte length favor the earlier tag in enumeration order.
pub fn select_best(in_: &[u32], sum_of_values: u32) -> (CodecTag, Vec<u8>) {
    let n = in_.len();

    if n == 1 {
        return if sum_of_values != UNKNOWN_SUM {
            (CodecTag::SingleDummy, Vec::new())
        } else {
            let mut buf = Vec::new();
            tvb::encode_single(in_[0], &mut buf);
            (CodecTag::SingleVbyte, buf)
        };
    }

    let mut best: Option<(CodecTag, Vec<u8>)> = None;

    if all_ones::is_encodable(in_, sum_of_values) {
        best = Some((CodecTag::AllOnes, Vec::new()));
    }

    for &tag in ENUMERATED_CANDIDATES.iter() {
        if !is_eligible(tag, n) {
            continue;
        }
        let mut buf = Vec::new();
        let encoded = match tag {
            CodecTag::ManyOnes => many_ones::encode(in_, sum_of_values, &mut buf),
            CodecTag::Simdbp => {
                simdbp::encode(in_, sum_of_values, &mut buf);
                true
            }
            CodecTag::VarintG8iu => {
                varint_g8iu::encode(in_, sum_of_values, &mut buf);
                true
            }
            CodecTag::VarintGb => {
                varintgb::encode(in_, sum_of_values, &mut buf);
                true
            }
            CodecTag::MaskedVbyte => {
                maskedvbyte::encode(in_, sum_of_values, &mut buf);
                true
            }
            CodecTag::Simple8b => {
                simple8b::encode(in_, sum_of_values, &mut buf);
                true
            }
            CodecTag::Simple16 => {
                if fits_simple16(in_) {
                    simple16::encode(in_, sum_of_values, &mut buf);
                    true
                } else {
                    false
                }
            }
            CodecTag::StreamVbyte => {
                streamvbyte::encode(in_, sum_of_values, &mut buf);
                true
            }
            CodecTag::Qmx => {
                qmx::encode(in_, sum_of_values, &mut buf);
                true
            }
            CodecTag::OptPfor => {
                optpfor::encode(in_, sum_of_values, &mut buf);
                true
            }
            CodecTag::Interpolative => {
                interpolative::encode(in_, sum_of_values, &mut buf);
                true
            }
            CodecTag::AllOnes | CodecTag::SingleDummy | CodecTag::SingleVbyte => {
                unreachable!("not in ENUMERATED_CANDIDATES")
            }
        };
        if !encoded {
            continue;
        }
        let better = match &best {
            Some((_, best_buf)) => buf.len() < best_buf.len(),
            None => true,
        };
        if better {
            best = Some((tag, buf));
        }
    }

    best.expect("masked_vbyte (among others) always succeeds for any n > 1")
}

/// Decodes a block tagged `tag` holding `n` values into `out`, returning
/// the number of input bytes consumed.
pub fn decode_block(
    tag: CodecTag,
    in_: &[u8],
    out: &mut [u32],
    sum_of_values: u32,
    n: usize,
) -> Result<usize, PostingError> {
    let consumed = match tag {
        CodecTag::SingleDummy => all_ones::decode(in_, out, sum_of_values, n),
        CodecTag::SingleVbyte => {
            let (new_pos, v) = tvb::next(in_, 0)?;
            out[0] = v;
            new_pos
        }
        CodecTag::AllOnes => all_ones::decode(in_, out, sum_of_values, n),
        CodecTag::ManyOnes => many_ones::decode(in_, out, sum_of_values, n),
        CodecTag::Simdbp => simdbp::decode(in_, out, sum_of_values, n),
        CodecTag::VarintG8iu => varint_g8iu::decode(in_, out, sum_of_values, n),
        CodecTag::VarintGb => varintgb::decode(in_, out, sum_of_values, n),
        CodecTag::MaskedVbyte => maskedvbyte::decode(in_, out, sum_of_values, n),
        CodecTag::Simple8b => simple8b::decode(in_, out, sum_of_values, n),
        CodecTag::Simple16 => simple16::decode(in_, out, sum_of_values, n),
        CodecTag::StreamVbyte => streamvbyte::decode(in_, out, sum_of_values, n),
        CodecTag::Qmx => qmx::decode(in_, out, sum_of_values, n),
        CodecTag::OptPfor => optpfor::decode(in_, out, sum_of_values, n),
        CodecTag::Interpolative => interpolative::decode(in_, out, sum_of_values, n),
    };
    Ok(consumed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(values: &[u32], sum_of_values: u32) {
        let (tag, buf) = select_best(values, sum_of_values);
        let mut out = vec![0u32; values.len()];
        let consumed = decode_block(tag, &buf, &mut out, sum_of_values, values.len()).unwrap();
        assert_eq!(out, values, "tag {tag:?} round-trip mismatch");
        assert_eq!(consumed, buf.len(), "tag {tag:?} left unconsumed bytes");
    }

    #[test]
    fn single_posting_dummy_for_docs() {
        // For a single-posting docs block the stored value carries no
        // information of its own — the decoded doc-id comes entirely from
        // `sum_of_values` — so a self-consistent round-trip needs `in_[0]`
        // to already equal it.
        let (tag, buf) = select_best(&[42], 42);
        assert_eq!(tag, CodecTag::SingleDummy);
        assert!(buf.is_empty());
        round_trip(&[42], 42);
    }

    #[test]
    fn single_posting_freq_block_always_uses_vbyte() {
        // Unlike docs, a freq block has no sum to recover a value from, so
        // single_dummy is never a candidate — even when the lone value is 0.
        for &v in &[0u32, 5] {
            let (tag, buf) = select_best(&[v], UNKNOWN_SUM);
            assert_eq!(tag, CodecTag::SingleVbyte);
            assert!(!buf.is_empty());
            round_trip(&[v], UNKNOWN_SUM);
        }
    }

    #[test]
    fn all_zero_block_selects_all_ones() {
        // Same convention as the single-posting case: `gaps[0]` must equal
        // `sum_of_values` for a genuinely consecutive run, since decode
        // rebuilds it from `sum_of_values` alone.
        let sum_of_values = 1000 - 63;
        let mut gaps = vec![0u32; 64];
        gaps[0] = sum_of_values;
        let (tag, buf) = select_best(&gaps, sum_of_values);
        assert_eq!(tag, CodecTag::AllOnes);
        assert!(buf.is_empty());
        round_trip(&gaps, sum_of_values);
    }

    #[test]
    fn sparse_block_beats_naive_one_byte_per_value() {
        let mut gaps = vec![0u32; 128];
        for i in (0..128).step_by(10) {
            gaps[i] = 3;
        }
        let (_, buf) = select_best(&gaps, UNKNOWN_SUM);
        // masked_vbyte alone would cost 128 bytes, one per value; whichever
        // codec wins the selection must always beat that naive baseline.
        assert!(buf.len() < 128, "winner used {} bytes", buf.len());
        round_trip(&gaps, UNKNOWN_SUM);
    }

    #[test]
    fn values_too_large_for_simple16_skip_it_without_panicking() {
        let gaps = vec![1u32, simple16::MAX_VALUE + 1, 2, 3];
        round_trip(&gaps, UNKNOWN_SUM);
    }

    #[test]
    fn mostly_ones_block_prefers_many_ones_over_all_ones() {
        let mut gaps = vec![0u32; 20];
        gaps[5] = 3;
        let (tag, _) = select_best(&gaps, UNKNOWN_SUM);
        assert_eq!(tag, CodecTag::ManyOnes);
        round_trip(&gaps, UNKNOWN_SUM);
    }
}
