use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::representation::RawValue;

/// Field storage of a single record.
///
/// Implementations are responsible for serializing concurrent mutations of the same record.
pub trait Record {
    /// Missing columns read as [`RawValue::Null`].
    fn get(&self, column: &str) -> RawValue;

    fn set(&mut self, column: &str, value: RawValue);

    /// Whether the column has an uncommitted change.
    fn is_dirty(&self, column: &str) -> bool;

    /// Value before the uncommitted change. Only meaningful while the column is dirty.
    fn previous_value(&self, column: &str) -> Option<RawValue>;
}

/// In-memory record that tracks changes against its last committed state.
///
/// A column is dirty while its current value differs from the committed one, so assigning the
/// committed value back clears the change.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecord {
    values: FxHashMap<CompactString, RawValue>,
    committed: FxHashMap<CompactString, RawValue>,
}

impl MemoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a persisted value. Loaded values are not dirty.
    pub fn with_value(mut self, column: &str, value: impl Into<RawValue>) -> Self {
        let value = value.into();
        self.committed.insert(column.into(), value.clone());
        self.values.insert(column.into(), value);
        self
    }

    pub fn commit(&mut self) {
        self.committed.clone_from(&self.values);
    }

    pub fn changes(&self) -> impl Iterator<Item = (&str, RawValue, &RawValue)> {
        self.values.iter().filter_map(move |(column, value)| {
            let previous = self.committed.get(column).cloned().unwrap_or_default();
            (previous != *value).then_some((column.as_str(), previous, value))
        })
    }
}

impl Record for MemoryRecord {
    fn get(&self, column: &str) -> RawValue {
        self.values.get(column).cloned().unwrap_or_default()
    }

    fn set(&mut self, column: &str, value: RawValue) {
        self.values.insert(column.into(), value);
    }

    fn is_dirty(&self, column: &str) -> bool {
        let value = self.values.get(column).unwrap_or(&RawValue::Null);
        value != self.committed.get(column).unwrap_or(&RawValue::Null)
    }

    fn previous_value(&self, column: &str) -> Option<RawValue> {
        if !self.is_dirty(column) {
            return None;
        }
        Some(self.committed.get(column).cloned().unwrap_or_default())
    }
}
