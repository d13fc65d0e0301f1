use thiserror::Error;

/// Error taxonomy for the block container: what can go wrong decoding a
/// block or a codec tag. Writer-side code has no recovery path and is
/// expected to be correct by construction, so these only ever flow from
/// decode paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostingError {
    /// Bytes don't parse as a valid block: a TVB continuation bit never
    /// terminated, a block header claims an out-of-range size, or a codec
    /// tag fell outside the enumeration.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A decoded doc-id was not below the claimed universe, or doc-ids
    /// were not strictly ascending.
    #[error("doc-id {doc_id} violates universe {universe}")]
    UniverseViolation { doc_id: u32, universe: u32 },

    /// After decoding a block, the number of bytes actually consumed did
    /// not match the byte offset the endpoint table promised.
    #[error("block decode consumed {consumed} bytes but endpoint expects {expected}")]
    SizeMismatch { consumed: usize, expected: usize },

    /// A cursor operation was called out of the order its contract allows
    /// (`next_geq` with a lower bound below the current doc-id, `move_to`
    /// going backwards).
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),
}

pub type Result<T> = std::result::Result<T, PostingError>;
