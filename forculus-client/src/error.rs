//! Errors raised by the Inserter (client) role.

/// Errors raised while constructing a [`crate::ForculusInserter`] or driving
/// its `insert` operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Construction-time or arithmetic misuse surfaced from the core crate
    /// (e.g. a threshold below 2).
    #[error(transparent)]
    Core(#[from] forculus_core::Error),

    /// The share sink failed while emitting a record.
    #[error("failed to emit share record")]
    Io(#[from] std::io::Error),

    /// The CSV share sink failed while writing a record.
    #[error("csv error while emitting share record")]
    Csv(#[from] csv::Error),
}

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;
