//! Ordered result rows of one element or one aggregation chain.

use serde::{Deserialize, Serialize};

use crate::types::PartitionResult;

/// Ordered rows; the last row is the current outflow of the chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultTable {
    rows: Vec<PartitionResult>,
}

impl ResultTable {
    pub fn single(row: PartitionResult) -> Self {
        Self { rows: vec![row] }
    }

    pub fn from_rows(rows: Vec<PartitionResult>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[PartitionResult] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<PartitionResult> {
        self.rows
    }

    /// Most recently appended row.
    pub fn last(&self) -> Option<&PartitionResult> {
        self.rows.last()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PartitionResult> {
        self.rows.iter()
    }

    /// Label of the chain's outflow row.
    pub fn name(&self) -> Option<&str> {
        self.last().map(|r| r.element.as_str())
    }

    pub(crate) fn push(&mut self, row: PartitionResult) {
        self.rows.push(row);
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a PartitionResult;
    type IntoIter = std::slice::Iter<'a, PartitionResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
