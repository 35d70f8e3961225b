use super::types::Record;
use crate::error::{CatalogError, Result};
use crate::query::types::ObjectKind;

/// Records of one kind waiting to be bulk-created.
///
/// Owned by the caller's session and handed to `CatalogClient::flush`; there
/// is no process-wide buffer.
#[derive(Debug, Clone)]
pub struct PendingBatch {
    kind: ObjectKind,
    records: Vec<Record>,
}

impl PendingBatch {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Appends a record and returns the new batch size.
    pub fn append(&mut self, record: Record) -> Result<usize> {
        if record.kind() != self.kind {
            return Err(CatalogError::KindMismatch {
                expected: self.kind,
                found: record.kind(),
            });
        }
        self.records.push(record);
        Ok(self.records.len())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Empties the batch, returning what it held.
    pub fn take(&mut self) -> Vec<Record> {
        std::mem::take(&mut self.records)
    }

    /// Puts records back in front of anything appended since `take`.
    pub fn restore(&mut self, mut records: Vec<Record>) {
        records.append(&mut self.records);
        self.records = records;
    }
}
