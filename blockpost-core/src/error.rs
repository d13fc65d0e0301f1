//! This crate signals exactly the same failures as `blockpost-codecs`
//! (a malformed block is a malformed block whether the container or the
//! codec layer notices it first), so it reuses that enum rather than
//! wrapping it in a second one.

pub use blockpost_codecs::error::{PostingError, Result};
