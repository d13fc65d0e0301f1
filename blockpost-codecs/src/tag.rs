use crate::error::PostingError;

/// The closed set of per-block codecs, tag values fixed so decode dispatch
/// is a table lookup rather than a chain of comparisons.
///
/// `SingleDummy` and `SingleVbyte` are degenerate: they are never chosen by
/// the general enumeration in [`crate::registry::select_best`], only by the
/// `cur_block_size == 1` short-circuit in the posting-list writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CodecTag {
    Simdbp = 0,
    VarintG8iu = 1,
    VarintGb = 2,
    MaskedVbyte = 3,
    Simple8b = 4,
    Simple16 = 5,
    StreamVbyte = 6,
    Qmx = 7,
    OptPfor = 8,
    ManyOnes = 9,
    Interpolative = 10,
    AllOnes = 11,
    SingleDummy = 12,
    SingleVbyte = 13,
}

/// Codecs the general selector enumerates over, in tag order — ties in
/// byte length are broken by this order (see spec §4.2's selection policy).
pub const ENUMERATED_CANDIDATES: [CodecTag; 11] = [
    CodecTag::Simdbp,
    CodecTag::VarintG8iu,
    CodecTag::VarintGb,
    CodecTag::MaskedVbyte,
    CodecTag::Simple8b,
    CodecTag::Simple16,
    CodecTag::StreamVbyte,
    CodecTag::Qmx,
    CodecTag::OptPfor,
    CodecTag::ManyOnes,
    CodecTag::Interpolative,
];

impl CodecTag {
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Result<Self, PostingError> {
        Ok(match tag {
            0 => CodecTag::Simdbp,
            1 => CodecTag::VarintG8iu,
            2 => CodecTag::VarintGb,
            3 => CodecTag::MaskedVbyte,
            4 => CodecTag::Simple8b,
            5 => CodecTag::Simple16,
            6 => CodecTag::StreamVbyte,
            7 => CodecTag::Qmx,
            8 => CodecTag::OptPfor,
            9 => CodecTag::ManyOnes,
            10 => CodecTag::Interpolative,
            11 => CodecTag::AllOnes,
            12 => CodecTag::SingleDummy,
            13 => CodecTag::SingleVbyte,
            other => {
                return Err(PostingError::MalformedInput(format!(
                    "codec tag {other} outside the 14-entry enumeration"
                )))
            }
        })
    }
}
