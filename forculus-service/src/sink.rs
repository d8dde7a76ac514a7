//! Result record sinks: where an Evaluator's recovered plaintexts go (§4.5,
//! §6).

use std::io::Write;

use forculus_types::ResultRecord;

use crate::error::Result;

/// An ordered emitter of recovered result records.
pub trait ResultSink {
    /// Emits one recovered `(plaintext, count)` pair.
    fn emit(&mut self, record: ResultRecord) -> Result<()>;
}

/// A [`ResultSink`] that renders records as rows of the CSV wire format
/// (§6): `base64(plaintext),count`.
pub struct CsvResultSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvResultSink<W> {
    /// Wraps `writer` as a result sink. Does not write a header row.
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
}

impl<W: Write> ResultSink for CsvResultSink<W> {
    fn emit(&mut self, record: ResultRecord) -> Result<()> {
        self.writer.write_record(record.to_fields())?;
        Ok(())
    }
}

/// A [`ResultSink`] that collects records into memory, primarily useful for
/// tests.
#[derive(Debug, Default)]
pub struct VecResultSink {
    /// Records emitted so far, in emission order.
    pub records: Vec<ResultRecord>,
}

impl VecResultSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultSink for VecResultSink {
    fn emit(&mut self, record: ResultRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }
}
