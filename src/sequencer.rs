use std::iter::FusedIterator;

use crate::matrix::{ColumnPattern, COLUMN_PATTERNS};

/// One pass over the column patterns in ascending column order.
///
/// A sweep takes a fresh sequence; nothing carries over between sweeps.
#[derive(Clone, Debug)]
pub struct ColumnSequence {
    position: usize,
}

impl ColumnSequence {
    pub fn new() -> Self {
        Self { position: 0 }
    }
}

impl Default for ColumnSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for ColumnSequence {
    type Item = ColumnPattern;

    fn next(&mut self) -> Option<ColumnPattern> {
        let pattern = COLUMN_PATTERNS.get(self.position).copied()?;
        self.position += 1;
        Some(pattern)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = COLUMN_PATTERNS.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ColumnSequence {}

impl FusedIterator for ColumnSequence {}
