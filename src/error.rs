//! Error types for the object writer.
//!
//! Every failure in this crate is surfaced synchronously to the caller; nothing is
//! retried or silently clamped.

/// Result type alias for object writer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while serializing values or writing objects.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Number outside the open interval (-1e21, 1e21), or not a number at all
    #[error("Number out of range: {0}")]
    NumberOutOfRange(f64),

    /// Byte buffer could not be re-ordered as 16-bit units
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// A content chunk carried a value that has no byte form
    #[error("Unsupported chunk type: {0}")]
    UnsupportedChunkType(&'static str),

    /// Object was already finalized
    #[error("Object {id} {generation} R is already finalized")]
    AlreadyFinalized {
        /// Object number
        id: u32,
        /// Generation number
        generation: u16,
    },

    /// IO error raised by the output sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
