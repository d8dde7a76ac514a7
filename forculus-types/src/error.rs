//! Errors raised while parsing or rendering wire-format rows.

/// Errors raised when a row does not conform to the share-record or
/// result-record wire format (§6).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A base64 field could not be decoded.
    #[error("invalid base64 in field {field}: {source}")]
    InvalidBase64 {
        /// Name of the offending field.
        field: &'static str,
        /// Underlying decode error.
        #[source]
        source: base64::DecodeError,
    },

    /// A decimal-ASCII integer field could not be parsed.
    #[error("invalid decimal integer in field {field}: {value}")]
    InvalidInteger {
        /// Name of the offending field.
        field: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },

    /// The decoded IV was not exactly 16 bytes.
    #[error("IV must be exactly 16 bytes, got {0}")]
    InvalidIvLength(usize),

    /// The decoded ciphertext was empty or not a multiple of the AES block
    /// size.
    #[error("ciphertext length {0} is not a positive multiple of 16")]
    InvalidCiphertextLength(usize),
}

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;
