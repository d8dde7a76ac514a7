//! The Inserter (client) role (§4.4): for each plaintext, derive key
//! material, pick a random evaluation point, evaluate the per-plaintext
//! polynomial, and emit one share record.

use std::collections::HashMap;

use forculus_core::derive::{self, DerivedKeyMaterial};
use forculus_core::{Params, Scalar};
use forculus_types::ShareRecord;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::error::Result;
use crate::sink::ShareSink;

/// `ForculusInserter(threshold = k, sink)` (§4.4).
///
/// Holds an in-process, per-plaintext memoization cache (§3, §9) that is
/// exclusively owned by this instance and never shared with another
/// Inserter or persisted beyond the instance's lifetime.
pub struct ForculusInserter<S: ShareSink> {
    params: Params,
    cache: HashMap<Vec<u8>, DerivedKeyMaterial>,
    rng: ChaCha20Rng,
    sink: S,
}

impl<S: ShareSink> ForculusInserter<S> {
    /// Constructs a new Inserter with the given `(threshold, epoch)` and
    /// output `sink`.
    ///
    /// The internal sampler is seeded from the system entropy source, once,
    /// at construction (§5, §9) — never from a fixed seed or wall-clock
    /// time.
    ///
    /// # Errors
    /// Returns [`forculus_core::Error::InvalidArgument`] (wrapped) if
    /// `threshold < 2`.
    pub fn new(threshold: usize, epoch: u128, sink: S) -> Result<Self> {
        let params = Params::new(threshold, epoch)?;
        Ok(Self {
            params,
            cache: HashMap::new(),
            rng: ChaCha20Rng::from_entropy(),
            sink,
        })
    }

    /// The configured `(threshold, epoch)`.
    pub fn params(&self) -> Params {
        self.params
    }

    /// Number of distinct plaintexts memoized so far.
    pub fn cached_plaintexts(&self) -> usize {
        self.cache.len()
    }

    /// Reports one occurrence of `plaintext`, emitting exactly one share
    /// record to the sink (§4.4).
    ///
    /// Coefficients, IV, and ciphertext are derived once per distinct
    /// plaintext and cached; the evaluation point `x` (and therefore `y`) is
    /// freshly sampled on every call, including repeated calls for the same
    /// plaintext.
    #[tracing::instrument(level = "trace", skip(self, plaintext), fields(plaintext_len = plaintext.len()))]
    pub fn insert(&mut self, plaintext: &[u8]) -> Result<()> {
        let params = self.params;
        let material = self
            .cache
            .entry(plaintext.to_vec())
            .or_insert_with(|| derive::derive_key_material(&params, plaintext));

        let r = sample_r(&mut self.rng, params.threshold());
        let x = derive::derive_evaluation_point(&material.h_s, r);
        let y = derive::evaluate_polynomial(&material.coefficients, &x);

        tracing::trace!(cached_plaintexts = self.cache.len(), "derived share");

        let record = {
            let material = self
                .cache
                .get(plaintext)
                .expect("entry was just inserted or already present");
            ShareRecord::new(material.iv, material.ciphertext.clone(), x, y)
        };
        self.sink.emit(record)
    }

    /// Consumes the Inserter, returning the underlying sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Samples `r` uniformly (up to negligible modular bias) from
/// `[0, threshold^2 * 2^80)` (§4.4 step 2, §5).
///
/// The range is derived from the threshold so that the x-collision
/// probability across a plaintext's reports stays negligible regardless of
/// how many clients report it (§5, §8).
fn sample_r(rng: &mut ChaCha20Rng, threshold: usize) -> u128 {
    let range: u128 = (threshold as u128)
        .checked_pow(2)
        .and_then(|t2| t2.checked_mul(1u128 << 80))
        .expect("threshold is small enough that k^2 * 2^80 fits in a u128");
    let mut buf = [0u8; 16];
    rng.fill_bytes(&mut buf);
    u128::from_be_bytes(buf) % range
}
