//! Immutable configuration shared by the Inserter and Evaluator roles.
//!
//! Modeled as a plain data record rather than a shared base class: both
//! roles hold their own `Params` and operate on it through the free
//! functions in [`crate::derive`], [`crate::field`], and [`crate::de`].

use crate::error::{Error, Result};

/// Threshold `k`, epoch `e`, bound together. The prime `q` is a global
/// build-time constant (see [`crate::field::Q`]) and is therefore not part
/// of this record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    threshold: usize,
    epoch: u128,
}

impl Params {
    /// Creates a new parameter set.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `threshold < 2`.
    pub fn new(threshold: usize, epoch: u128) -> Result<Self> {
        if threshold < 2 {
            return Err(Error::InvalidArgument(format!(
                "threshold must be >= 2, got {threshold}"
            )));
        }
        Ok(Self { threshold, epoch })
    }

    /// The threshold `k`.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// The epoch parameter `e`.
    pub fn epoch(&self) -> u128 {
        self.epoch
    }
}
