#![deny(missing_docs)]
//! Core cryptographic primitives for the Forculus threshold encryption
//! scheme.
//!
//! Forculus guarantees that a plaintext reported by clients is recoverable
//! by a server if and only if at least `k` (the threshold) distinct clients
//! report that same plaintext. This crate implements the algorithmically
//! dense substrate that property rests on:
//!
//! * [`field`] — modular arithmetic in the prime field F_q (q = 2^160 + 7),
//!   including multiplicative inverse and Lagrange interpolation of a
//!   polynomial's constant term.
//! * [`oracle`] — the keyless random oracle H (HMAC-SHA256 with a 160-byte
//!   all-zero key) and its per-plaintext keyed instance H_s.
//! * [`de`] — deterministic AES-128-CBC encryption with an idiosyncratic,
//!   non-PKCS#7 padding scheme.
//! * [`derive`] — the per-plaintext coefficient/key/ciphertext derivation
//!   and polynomial evaluation shared by the Inserter and Evaluator roles.
//! * [`params`] — the immutable `(threshold, epoch)` configuration record.
//!
//! This crate does not itself implement the Inserter (client) or Evaluator
//! (server) roles, nor any wire format — see the `forculus-client`,
//! `forculus-service`, and `forculus-types` crates.

pub mod de;
pub mod derive;
pub mod error;
pub mod field;
pub mod oracle;
pub mod params;

pub use error::{Error, Result};
pub use field::Scalar;
pub use params::Params;
