//! Share record sources: where an Evaluator's input comes from (§4.5, §6).

use std::io::Read;

use forculus_types::ShareRecord;

use crate::error::{Error, Result};

/// A source of share records, read in arbitrary order relative to other
/// groups but in a fixed order within a source instance (§5).
///
/// The Evaluator consumes a source front-to-back exactly once per
/// `compute_and_emit` call.
pub trait ShareSource {
    /// Returns the next share record, or `None` once the source is
    /// exhausted.
    fn next_record(&mut self) -> Result<Option<ShareRecord>>;
}

/// A [`ShareSource`] that reads rows of the CSV wire format (§6):
/// `base64(iv),base64(ct),x,y`.
///
/// Row 0 is header-detected rather than unconditionally skipped: if it
/// fails to parse as a share record it is treated as a header and dropped;
/// otherwise it is treated as the first data row. This is an explicit
/// choice among the two reference-compatible policies named in §6 (see
/// DESIGN.md).
pub struct CsvShareSource<R: Read> {
    reader: csv::Reader<R>,
    row: usize,
    header_checked: bool,
}

impl<R: Read> CsvShareSource<R> {
    /// Wraps `reader` as a share source.
    pub fn new(reader: R) -> Self {
        Self {
            reader: csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_reader(reader),
            row: 0,
            header_checked: false,
        }
    }

    fn parse_row(fields: &csv::StringRecord) -> std::result::Result<ShareRecord, forculus_types::Error> {
        let get = |i: usize| fields.get(i).unwrap_or("");
        ShareRecord::from_fields(get(0), get(1), get(2), get(3))
    }
}

impl<R: Read> ShareSource for CsvShareSource<R> {
    fn next_record(&mut self) -> Result<Option<ShareRecord>> {
        loop {
            let mut raw = csv::StringRecord::new();
            if !self.reader.read_record(&mut raw)? {
                return Ok(None);
            }
            let row = self.row;
            self.row += 1;

            match Self::parse_row(&raw) {
                Ok(record) => {
                    self.header_checked = true;
                    return Ok(Some(record));
                }
                Err(err) if row == 0 && !self.header_checked => {
                    tracing::debug!("skipping unparseable row 0 as a header: {err}");
                    self.header_checked = true;
                    continue;
                }
                Err(source) => return Err(Error::MalformedRecord { row, source }),
            }
        }
    }
}

/// A [`ShareSource`] backed by an in-memory vector, primarily useful for
/// tests and for embedding the Evaluator directly downstream of a
/// [`forculus_client::ForculusInserter`] in the same process.
pub struct VecShareSource {
    records: std::vec::IntoIter<ShareRecord>,
}

impl VecShareSource {
    /// Creates a source that yields `records` in the given order.
    pub fn new(records: Vec<ShareRecord>) -> Self {
        Self {
            records: records.into_iter(),
        }
    }
}

impl ShareSource for VecShareSource {
    fn next_record(&mut self) -> Result<Option<ShareRecord>> {
        Ok(self.records.next())
    }
}
