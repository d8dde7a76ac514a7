//! Per-plaintext key derivation: the coefficient-generation and
//! evaluation-point-derivation logic shared by the Inserter and Evaluator
//! roles, expressed as pure functions over [`Params`].

use zeroize::Zeroize;

use crate::de;
use crate::error::Result;
use crate::field::Scalar;
use crate::oracle::{self, KeyedOracle};
use crate::params::Params;

/// Renders a non-negative integer using the fixed `encode_i` textual rule:
/// decimal ASCII, no leading zeros, no sign, no whitespace.
fn encode_i(n: u128) -> Vec<u8> {
    n.to_string().into_bytes()
}

/// Computes the key-derivation seed `s = H("1" || e || plaintext)`.
fn key_derivation_seed(epoch: u128, plaintext: &[u8]) -> [u8; 32] {
    let mut input = Vec::with_capacity(1 + 20 + plaintext.len());
    input.push(b'1');
    input.extend_from_slice(&encode_i(epoch));
    input.extend_from_slice(plaintext);
    oracle::h(&input)
}

/// The coefficients, per-plaintext keyed oracle, and deterministic
/// ciphertext derived for a single plaintext; this is exactly what the
/// Inserter's memoization cache stores for each distinct plaintext (§4.4,
/// §9).
///
/// `h_s` is retained (rather than only `c_0..c_{k-1}`) because every
/// subsequent `insert` of the same plaintext needs to derive a fresh
/// evaluation point `x = H_s(encode_i(r))` using the same per-plaintext
/// oracle.
pub struct DerivedKeyMaterial {
    /// Coefficients c_0, ..., c_{k-1} of the per-plaintext polynomial.
    pub coefficients: Vec<Scalar>,
    /// The per-plaintext keyed oracle H_s.
    pub h_s: KeyedOracle,
    /// Deterministic IV for this plaintext.
    pub iv: [u8; 16],
    /// Deterministic ciphertext for this plaintext.
    pub ciphertext: Vec<u8>,
}

/// Derives `(coefficients, H_s, iv, ciphertext)` for `plaintext` under
/// `params` (§4.4 steps 1a-1e).
pub fn derive_key_material(params: &Params, plaintext: &[u8]) -> DerivedKeyMaterial {
    let mut seed = key_derivation_seed(params.epoch(), plaintext);
    let h_s = KeyedOracle::new(seed);
    seed.zeroize();

    let coefficients: Vec<Scalar> = (0..params.threshold())
        .map(|i| Scalar::from_bytes_be(&h_s.call(&encode_i(i as u128))))
        .collect();

    let key = aes_key_from_scalar(&coefficients[0]);
    let (iv, ciphertext) = de::encrypt(&key, plaintext);

    DerivedKeyMaterial {
        coefficients,
        h_s,
        iv,
        ciphertext,
    }
}

/// Derives the evaluation point `x = bytes_to_uint(H_s(encode_i(r))) mod q`
/// for a freshly sampled random sample `r` (§4.4 step 3).
pub fn derive_evaluation_point(h_s: &KeyedOracle, r: u128) -> Scalar {
    Scalar::from_bytes_be(&h_s.call(&encode_i(r)))
}

/// Evaluates `c_0 + c_1*x + ... + c_{k-1}*x^{k-1} (mod q)` using Horner's
/// method from the highest-degree term downward (§4.4 step 4).
pub fn evaluate_polynomial(coefficients: &[Scalar], x: &Scalar) -> Scalar {
    let mut acc = Scalar::zero();
    for c in coefficients.iter().rev() {
        acc = acc.mul(x).add(c);
    }
    acc
}

/// Implements `low_16_bytes_after_padding` (§6): the AES key for a given
/// field element.
///
/// The little-endian byte representation of `n` (with no high-order zero
/// bytes, and empty for `n == 0`) is right-padded with the ASCII character
/// `'0'` (0x30) up to 16 bytes, then truncated to 16 bytes. This is an
/// intentionally non-standard encoding that must be reproduced bit-exactly
/// for interoperability with existing ciphertexts (see design notes).
pub fn aes_key_from_scalar(c0: &Scalar) -> [u8; 16] {
    let mut bytes = if c0.is_zero() {
        Vec::new()
    } else {
        c0.as_biguint().to_bytes_le()
    };
    bytes.resize(16, b'0');
    let mut key = [0u8; 16];
    key.copy_from_slice(&bytes[..16]);
    key
}

/// Reconstructs the AES key from a recovered master key `c_0` (the
/// Evaluator-side counterpart of [`derive_key_material`]'s key step).
pub fn aes_key_from_c0(c0: &Scalar) -> [u8; 16] {
    aes_key_from_scalar(c0)
}

/// Decrypts `ciphertext` under the AES key derived from the reconstructed
/// master key `c_0`.
pub fn decrypt_with_c0(c0: &Scalar, iv: &[u8; 16], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let key = aes_key_from_c0(c0);
    de::decrypt(&key, iv, ciphertext)
}
