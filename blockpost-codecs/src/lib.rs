//! Bit/byte primitives and per-block integer codecs for the compressed
//! posting-list container. Nothing here knows about doc-ids, frequencies,
//! or the list-level container format — that's `blockpost-core`; this
//! crate only knows how to turn a `[u32]` into bytes and back, one block
//! at a time.

pub mod bitio;
pub mod codecs;
pub mod error;
pub mod registry;
pub mod tag;
pub mod tvb;

pub use error::PostingError;
pub use tag::CodecTag;
