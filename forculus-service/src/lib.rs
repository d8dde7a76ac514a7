#![deny(missing_docs)]
//! The Evaluator (server) role of the Forculus threshold encryption scheme.
//!
//! A [`ForculusEvaluator`] consumes the set of share records produced by one
//! or more [`forculus_client::ForculusInserter`]s, groups them by ciphertext
//! identity `(iv, ct)`, and for every group meeting the configured
//! threshold reconstructs the per-plaintext master key via Lagrange
//! interpolation and recovers the plaintext. Groups below threshold are
//! silently skipped — that silence is the scheme's privacy guarantee, not
//! an error condition.

pub mod error;
pub mod evaluator;
pub mod sink;
pub mod source;

pub use error::{Error, Result};
pub use evaluator::ForculusEvaluator;
pub use sink::{CsvResultSink, ResultSink, VecResultSink};
pub use source::{CsvShareSource, ShareSource, VecShareSource};
