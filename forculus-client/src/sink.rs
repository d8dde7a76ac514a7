//! Share record sinks: where an Inserter's output goes (§4.4, §6).

use std::io::Write;

use forculus_types::ShareRecord;

use crate::error::Result;

/// An ordered emitter of share records.
///
/// The Inserter treats `sink` purely as a side-effecting collaborator: it
/// never reads records back, and emission order matches `insert` call order.
pub trait ShareSink {
    /// Emits one share record. Called exactly once per `insert`.
    fn emit(&mut self, record: ShareRecord) -> Result<()>;
}

/// A [`ShareSink`] that renders records as rows of the CSV wire format (§6):
/// `base64(iv),base64(ct),x,y`.
pub struct CsvShareSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvShareSink<W> {
    /// Wraps `writer` as a share sink. Does not write a header row, matching
    /// the reference behavior of always treating row 0 of a share file as
    /// data (see [`forculus_types::share_record`] parsing notes and §6).
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer),
        }
    }

    /// Flushes any buffered output to the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Consumes the sink, returning the underlying writer.
    pub fn into_inner(self) -> std::result::Result<W, csv::IntoInnerError<csv::Writer<W>>> {
        self.writer.into_inner()
    }
}

impl<W: Write> ShareSink for CsvShareSink<W> {
    fn emit(&mut self, record: ShareRecord) -> Result<()> {
        self.writer.write_record(record.to_fields())?;
        Ok(())
    }
}

/// A [`ShareSink`] that collects records into memory, primarily useful for
/// tests and for embedding the Inserter in a host that already owns an
/// in-process Evaluator.
#[derive(Debug, Default)]
pub struct VecShareSink {
    /// Records emitted so far, in emission order.
    pub records: Vec<ShareRecord>,
}

impl VecShareSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShareSink for VecShareSink {
    fn emit(&mut self, record: ShareRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }
}
