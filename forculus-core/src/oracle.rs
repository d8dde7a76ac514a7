//! The Forculus random oracle H: HMAC-SHA256 keyed with a 160-byte all-zero
//! key, used both to derive per-plaintext key material and, re-keyed with
//! that material, as the per-plaintext PRF H_s.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of H's fixed all-zero key.
const RO_KEY_LEN: usize = 160;

/// The keyless random oracle H(m) = HMAC-SHA256(0^160, m).
///
/// A fresh, stack-allocated HMAC context is used per call; none of the
/// workspace-wide "reusable module-level HMAC instance" pattern from the
/// source implementation survives here (see design notes on global mutable
/// module state).
pub fn h(input: &[u8]) -> [u8; 32] {
    let key = [0u8; RO_KEY_LEN];
    let mut mac = HmacSha256::new_from_slice(&key).expect("HMAC accepts keys of any length");
    mac.update(input);
    mac.finalize().into_bytes().into()
}

/// A per-plaintext keyed instance of H, `H_s(m) = HMAC-SHA256(s, m)`.
///
/// The seed is held only as long as the owning Inserter's cache entry for
/// the corresponding plaintext lives, and is wiped on drop.
pub struct KeyedOracle {
    seed: Zeroizing<[u8; 32]>,
}

impl KeyedOracle {
    /// Instantiates `H_s` keyed by `seed`.
    pub fn new(seed: [u8; 32]) -> Self {
        Self {
            seed: Zeroizing::new(seed),
        }
    }

    /// Evaluates `H_s(input)`.
    pub fn call(&self, input: &[u8]) -> [u8; 32] {
        let mut mac =
            HmacSha256::new_from_slice(&*self.seed).expect("HMAC accepts keys of any length");
        mac.update(input);
        mac.finalize().into_bytes().into()
    }
}
