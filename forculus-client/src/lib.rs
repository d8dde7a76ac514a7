#![deny(missing_docs)]
//! The Inserter (client) role of the Forculus threshold encryption scheme.
//!
//! A [`ForculusInserter`] turns a stream of plaintext reports into a stream
//! of [`forculus_types::ShareRecord`]s: for each distinct plaintext it
//! derives the per-plaintext master key and polynomial coefficients once
//! (memoized for the lifetime of the Inserter), and on every `insert` it
//! samples a fresh evaluation point and emits one share. See the core
//! crate (`forculus-core`) for the underlying field arithmetic, random
//! oracle, and deterministic-encryption primitives this role composes.

pub mod error;
pub mod inserter;
pub mod sink;

pub use error::{Error, Result};
pub use inserter::ForculusInserter;
pub use sink::{CsvShareSink, ShareSink, VecShareSink};
