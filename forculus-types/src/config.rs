//! The tabular configuration record (§4.6, §6): at minimum a `threshold`
//! field. The epoch and prime are implementation constants of the deployed
//! build and are not carried on the wire.

use serde::{Deserialize, Serialize};

/// A parsed configuration row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRow {
    /// Threshold k, a positive integer >= 2.
    pub threshold: usize,
}
