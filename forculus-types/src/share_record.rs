//! The share record `(iv, ct, x, y)` and its wire-format encoding (§3, §6).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use forculus_core::Scalar;

use crate::error::{Error, Result};

/// A single share record emitted by the Inserter and consumed by the
/// Evaluator: `(iv, ct, x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRecord {
    /// Deterministic IV, exactly 16 bytes.
    pub iv: [u8; 16],
    /// Deterministic ciphertext, a non-zero multiple of 16 bytes.
    pub ciphertext: Vec<u8>,
    /// Evaluation point.
    pub x: Scalar,
    /// Evaluation value.
    pub y: Scalar,
}

impl ShareRecord {
    /// Constructs a new share record.
    pub fn new(iv: [u8; 16], ciphertext: Vec<u8>, x: Scalar, y: Scalar) -> Self {
        Self {
            iv,
            ciphertext,
            x,
            y,
        }
    }

    /// The group key `(iv, ct)` that identifies which plaintext this share
    /// belongs to.
    pub fn group_key(&self) -> ([u8; 16], Vec<u8>) {
        (self.iv, self.ciphertext.clone())
    }

    /// Renders this record as the four wire-format fields, in order:
    /// base64(iv), base64(ct), decimal(x), decimal(y).
    pub fn to_fields(&self) -> [String; 4] {
        [
            BASE64.encode(self.iv),
            BASE64.encode(&self.ciphertext),
            self.x.as_biguint().to_str_radix(10),
            self.y.as_biguint().to_str_radix(10),
        ]
    }

    /// Parses a share record from its four wire-format fields.
    ///
    /// # Errors
    /// Returns an error if any field is malformed: invalid base64, a
    /// non-16-byte IV, a ciphertext whose length isn't a positive multiple
    /// of 16, or a non-decimal integer.
    pub fn from_fields(iv: &str, ciphertext: &str, x: &str, y: &str) -> Result<Self> {
        let iv_bytes = BASE64
            .decode(iv)
            .map_err(|source| Error::InvalidBase64 {
                field: "iv",
                source,
            })?;
        let iv: [u8; 16] = iv_bytes
            .clone()
            .try_into()
            .map_err(|_| Error::InvalidIvLength(iv_bytes.len()))?;

        let ciphertext = BASE64
            .decode(ciphertext)
            .map_err(|source| Error::InvalidBase64 {
                field: "ciphertext",
                source,
            })?;
        if ciphertext.is_empty() || ciphertext.len() % 16 != 0 {
            return Err(Error::InvalidCiphertextLength(ciphertext.len()));
        }

        let x = parse_decimal_scalar("x", x)?;
        let y = parse_decimal_scalar("y", y)?;

        Ok(Self::new(iv, ciphertext, x, y))
    }
}

fn parse_decimal_scalar(field: &'static str, value: &str) -> Result<Scalar> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidInteger {
            field,
            value: value.to_string(),
        });
    }
    let n = value
        .parse::<num_bigint::BigUint>()
        .map_err(|_| Error::InvalidInteger {
            field,
            value: value.to_string(),
        })?;
    Ok(Scalar::from_biguint(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn fields_roundtrip() {
        let record = ShareRecord::new(
            [7u8; 16],
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16],
            Scalar::from_biguint(BigUint::from(12345u32)),
            Scalar::from_biguint(BigUint::from(67890u32)),
        );
        let fields = record.to_fields();
        let parsed = ShareRecord::from_fields(&fields[0], &fields[1], &fields[2], &fields[3])
            .expect("valid fields parse");
        assert_eq!(parsed, record);
    }

    #[test]
    fn rejects_bad_iv_length() {
        let short_iv = base64::engine::general_purpose::STANDARD.encode([1u8; 8]);
        let ct = base64::engine::general_purpose::STANDARD.encode([0u8; 16]);
        let err = ShareRecord::from_fields(&short_iv, &ct, "1", "1").unwrap_err();
        assert!(matches!(err, Error::InvalidIvLength(8)));
    }

    #[test]
    fn rejects_non_block_aligned_ciphertext() {
        let iv = base64::engine::general_purpose::STANDARD.encode([1u8; 16]);
        let ct = base64::engine::general_purpose::STANDARD.encode([0u8; 15]);
        let err = ShareRecord::from_fields(&iv, &ct, "1", "1").unwrap_err();
        assert!(matches!(err, Error::InvalidCiphertextLength(15)));
    }

    #[test]
    fn rejects_non_decimal_x() {
        let iv = base64::engine::general_purpose::STANDARD.encode([1u8; 16]);
        let ct = base64::engine::general_purpose::STANDARD.encode([0u8; 16]);
        let err = ShareRecord::from_fields(&iv, &ct, "12x", "1").unwrap_err();
        assert!(matches!(err, Error::InvalidInteger { field: "x", .. }));
    }
}
