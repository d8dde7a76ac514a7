//! The recovered-plaintext result record `(plaintext, count)` and its
//! wire-format encoding (§6).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::{Error, Result};

/// A plaintext recovered by the Evaluator, together with the number of
/// share records that contributed to its recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    /// The recovered plaintext.
    pub plaintext: Vec<u8>,
    /// Number of share records that were grouped under this plaintext's
    /// `(iv, ct)`.
    pub count: usize,
}

impl ResultRecord {
    /// Constructs a new result record.
    pub fn new(plaintext: Vec<u8>, count: usize) -> Self {
        Self { plaintext, count }
    }

    /// Renders this record as two wire-format fields: base64(plaintext),
    /// decimal(count). Base64 is used for the plaintext field because the
    /// core's plaintexts are arbitrary byte strings and CSV has no native
    /// escaping for non-printable bytes (§6).
    pub fn to_fields(&self) -> [String; 2] {
        [BASE64.encode(&self.plaintext), self.count.to_string()]
    }

    /// Parses a result record from its two wire-format fields.
    pub fn from_fields(plaintext: &str, count: &str) -> Result<Self> {
        let plaintext =
            BASE64
                .decode(plaintext)
                .map_err(|source| Error::InvalidBase64 {
                    field: "plaintext",
                    source,
                })?;
        let count = count.parse::<usize>().map_err(|_| Error::InvalidInteger {
            field: "count",
            value: count.to_string(),
        })?;
        Ok(Self::new(plaintext, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_roundtrip() {
        let record = ResultRecord::new(b"hello".to_vec(), 3);
        let fields = record.to_fields();
        let parsed = ResultRecord::from_fields(&fields[0], &fields[1]).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn roundtrips_non_printable_plaintext() {
        let record = ResultRecord::new(vec![0, 1, 2, 255, 254], 5);
        let fields = record.to_fields();
        let parsed = ResultRecord::from_fields(&fields[0], &fields[1]).unwrap();
        assert_eq!(parsed, record);
    }
}
