//! Errors raised by the Evaluator (server) role.

/// Errors raised while constructing a [`crate::ForculusEvaluator`] or
/// driving its `compute_and_emit` operation.
///
/// Per §7's propagation policy, only this crate's variants ever abort
/// `compute_and_emit`; per-group reconstruction failures (duplicate points,
/// invalid padding) are handled internally as silent group skips and never
/// surface as an `Error`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Construction-time misuse surfaced from the core crate (e.g. a
    /// threshold below 2).
    #[error(transparent)]
    Core(#[from] forculus_core::Error),

    /// The share source or result sink failed.
    #[error("failed to read share records or emit results")]
    Io(#[from] std::io::Error),

    /// The CSV share source or result sink failed.
    #[error("csv error while reading share records or emitting results")]
    Csv(#[from] csv::Error),

    /// A row other than the first failed to parse as a share record. Unlike
    /// row 0 (which may be a header and is skipped, see
    /// [`crate::source::CsvShareSource`]), a malformed row later in the
    /// stream indicates corrupted input and aborts the run.
    #[error("malformed share record at row {row}: {source}")]
    MalformedRecord {
        /// Zero-based row index within the source.
        row: usize,
        /// The underlying parse error.
        #[source]
        source: forculus_types::Error,
    },
}

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;
