//! Append-only record sink, persisted once as CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::pid::record::TabularRecord;

/// Records in insertion order. Rows are never edited after `push`.
#[derive(Debug, Clone)]
pub struct ResultAccumulator<R> {
    records: Vec<R>,
}

impl<R> Default for ResultAccumulator<R> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<R: TabularRecord> ResultAccumulator<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: R) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Write the header and every row, returning the underlying writer.
    ///
    /// The header comes from [`TabularRecord::COLUMNS`], so an empty table still
    /// carries its column layout.
    pub fn write_to<W: Write>(self, writer: W) -> Result<W> {
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
        wtr.write_record(R::COLUMNS)?;
        for record in &self.records {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        wtr.into_inner().map_err(|e| e.into_error().into())
    }

    /// Persist to `path`, consuming the accumulator.
    pub fn persist(self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.write_to(file)?.sync_all()?;
        Ok(())
    }
}

impl<R: TabularRecord> Extend<R> for ResultAccumulator<R> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}
