//! Deterministic symmetric encryption (DE): AES-128-CBC with an IV derived
//! deterministically from the plaintext and a non-PKCS#7 padding scheme that
//! must be reproduced bit-exactly for wire compatibility (see §6 of the
//! design document).

use aes::Aes128;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::NoPadding};

use crate::error::{Error, Result};
use crate::oracle;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

const BLOCK_SIZE: usize = 16;

/// Computes the deterministic IV for `plaintext`: the first 16 bytes of
/// `H(0x30 || plaintext)`, where `0x30` is the ASCII character `'0'`.
pub fn iv_for(plaintext: &[u8]) -> [u8; 16] {
    let mut input = Vec::with_capacity(1 + plaintext.len());
    input.push(b'0');
    input.extend_from_slice(plaintext);
    let digest = oracle::h(&input);
    let mut iv = [0u8; 16];
    iv.copy_from_slice(&digest[..16]);
    iv
}

/// Pads `plaintext` to a multiple of 16 bytes using Forculus's idiosyncratic
/// scheme: the last byte of the padded buffer is always the padding length,
/// and it is never PKCS#7 (zero bytes instead of repeating the pad length).
fn pad(plaintext: &[u8]) -> Vec<u8> {
    let l = plaintext.len() + 1;
    let mut buf = Vec::with_capacity(plaintext.len() + BLOCK_SIZE);
    buf.extend_from_slice(plaintext);
    if l % BLOCK_SIZE == 0 {
        buf.push(1);
    } else {
        let pad_len = BLOCK_SIZE - (l % BLOCK_SIZE) + 1;
        buf.extend(std::iter::repeat_n(0u8, pad_len - 1));
        buf.push(pad_len as u8);
    }
    buf
}

/// Encrypts `plaintext` under `key`, returning `(iv, ciphertext)`.
///
/// Deterministic: identical `(key, plaintext)` pairs always produce
/// identical output.
pub fn encrypt(key: &[u8; 16], plaintext: &[u8]) -> ([u8; 16], Vec<u8>) {
    let iv = iv_for(plaintext);
    let mut buf = pad(plaintext);
    let msg_len = buf.len();
    let encryptor = Aes128CbcEnc::new(key.into(), &iv.into());
    let ct = encryptor
        .encrypt_padded_mut::<NoPadding>(&mut buf, msg_len)
        .expect("buffer is already padded to a block multiple");
    (iv, ct.to_vec())
}

/// Decrypts `ciphertext` under `(key, iv)`, stripping and validating the
/// padding.
///
/// # Errors
/// Returns [`Error::InvalidCiphertext`] if the ciphertext length is not a
/// positive multiple of the block size, or if the recovered padding length
/// is out of range — which happens with overwhelming probability when `key`
/// was reconstructed from the wrong share group.
pub fn decrypt(key: &[u8; 16], iv: &[u8; 16], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidCiphertext(format!(
            "ciphertext length {} is not a positive multiple of {BLOCK_SIZE}",
            ciphertext.len()
        )));
    }
    let mut buf = ciphertext.to_vec();
    let decryptor = Aes128CbcDec::new(key.into(), iv.into());
    let padded = decryptor
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|_| Error::InvalidCiphertext("block decryption failed".to_string()))?;

    let pad_len = *padded
        .last()
        .ok_or_else(|| Error::InvalidCiphertext("empty plaintext block".to_string()))?
        as usize;
    if pad_len == 0 || pad_len > BLOCK_SIZE || pad_len > padded.len() {
        return Err(Error::InvalidCiphertext(format!(
            "padding length {pad_len} out of range"
        )));
    }
    Ok(padded[..padded.len() - pad_len].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 16] = *b"0123456789abcdef";

    #[test]
    fn encrypt_decrypt_roundtrip_various_lengths() {
        for len in [0usize, 1, 14, 15, 16, 17, 31, 32, 33, 100] {
            let plaintext = vec![b'x'; len];
            let (iv, ct) = encrypt(&KEY, &plaintext);
            assert_eq!(ct.len() % 16, 0);
            assert!(!ct.is_empty());
            let recovered = decrypt(&KEY, &iv, &ct).unwrap();
            assert_eq!(recovered, plaintext, "roundtrip failed for length {len}");
        }
    }

    #[test]
    fn encryption_is_deterministic() {
        let plaintext = b"hello, world";
        let (iv1, ct1) = encrypt(&KEY, plaintext);
        let (iv2, ct2) = encrypt(&KEY, plaintext);
        assert_eq!(iv1, iv2);
        assert_eq!(ct1, ct2);
    }

    #[test]
    fn length_15_has_single_padding_byte() {
        // L = 15 + 1 = 16 => single block, one padding byte of value 1.
        let plaintext = vec![b'a'; 15];
        let (_, ct) = encrypt(&KEY, &plaintext);
        assert_eq!(ct.len(), 16);
    }

    #[test]
    fn length_16_spans_two_blocks() {
        // L = 16 + 1 = 17 => pad_len = 16, two blocks.
        let plaintext = vec![b'a'; 16];
        let (_, ct) = encrypt(&KEY, &plaintext);
        assert_eq!(ct.len(), 32);
    }

    #[test]
    fn empty_plaintext_produces_one_block() {
        let (_, ct) = encrypt(&KEY, b"");
        assert_eq!(ct.len(), 16);
        assert_eq!(decrypt(&KEY, &iv_for(b""), &ct).unwrap(), b"");
    }

    #[test]
    fn corrupted_ciphertext_is_rejected_as_invalid() {
        let plaintext = b"some plaintext value";
        let (iv, mut ct) = encrypt(&KEY, plaintext);
        // flip the last byte of the ciphertext, which (with overwhelming
        // probability under a wrong key) corrupts the recovered padding
        // length byte in the final plaintext block.
        let other_key = [0xAAu8; 16];
        let result = decrypt(&other_key, &iv, &ct);
        // either outright rejected, or (rarely) "succeeds" with garbage -
        // the property under test is that a wrong key never panics.
        let _ = result;

        let last = ct.len() - 1;
        ct[last] ^= 0xFF;
        let _ = decrypt(&KEY, &iv, &ct);
    }
}
