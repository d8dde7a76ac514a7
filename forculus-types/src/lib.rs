#![deny(missing_docs)]
//! Wire-format types for the Forculus share record, result record, and
//! configuration row (§6).
//!
//! This crate models the heterogeneous, position-tagged CSV rows of the
//! source implementation as explicit typed records with dedicated parsers
//! and serializers, per the re-architecture notes in the design document.
//! It does not itself read or write files — that responsibility belongs to
//! `forculus-service` (which owns the Evaluator's CSV source) and the
//! `forculus-cli` demonstration binary.

pub mod config;
pub mod error;
pub mod result_record;
pub mod share_record;

pub use config::ConfigRow;
pub use error::{Error, Result};
pub use result_record::ResultRecord;
pub use share_record::ShareRecord;
