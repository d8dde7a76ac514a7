//! Error taxonomy for the Forculus cryptographic core.
//!
//! Every fallible operation in this crate returns one of the variants below.
//! Construction-time misuse and I/O failures abort the caller; errors raised
//! while processing a single share group (see `forculus-service`) are local
//! to that group and never abort the overall computation.

/// Errors raised by the field arithmetic, random oracle, and deterministic
/// encryption primitives.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Construction-time misuse, e.g. a threshold smaller than 2 or an
    /// attempt to invert zero.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Lagrange reconstruction was called with fewer than `threshold` points.
    #[error("insufficient shares: need {need}, have {have}")]
    InsufficientShares {
        /// Number of points required for reconstruction.
        need: usize,
        /// Number of points actually supplied.
        have: usize,
    },

    /// Two of the selected evaluation points share an x-coordinate, making
    /// Lagrange interpolation undefined (division by zero).
    #[error("duplicate evaluation point among the selected shares")]
    DuplicatePoint,

    /// Decryption under the reconstructed key produced padding that cannot
    /// be valid, meaning the wrong key was reconstructed.
    #[error("invalid ciphertext padding: {0}")]
    InvalidCiphertext(String),

    /// A share or result sink/source failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;
