use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::representation::Representation;

/// Backing table schema consulted when a column is binarized.
pub trait Schema {
    /// Returns `None` when the column does not exist.
    fn column_representation(&self, column: &str) -> Option<Representation>;

    fn column_exists(&self, column: &str) -> bool {
        self.column_representation(column).is_some()
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemorySchema {
    columns: FxHashMap<CompactString, Representation>,
}

impl MemorySchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, column: &str, representation: Representation) -> Self {
        self.columns.insert(column.into(), representation);
        self
    }
}

impl Schema for MemorySchema {
    fn column_representation(&self, column: &str) -> Option<Representation> {
        self.columns.get(column).copied()
    }
}
