use serde::{Serialize, Serializer};

use crate::{codec::FlagCodec, representation::RawValue};

/// Decoded flags of a column value, in bit order.
///
/// Serializes as an object mapping flag names to booleans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagValues<'a> {
    entries: Vec<(&'a str, bool)>,
}

impl<'a> FlagValues<'a> {
    pub(crate) fn new(entries: Vec<(&'a str, bool)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, flag: &str) -> Option<bool> {
        self.entries.iter().find(|(name, _)| *name == flag).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, bool)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all(&self) -> bool {
        self.entries.iter().all(|(_, v)| *v)
    }

    pub fn any(&self) -> bool {
        self.entries.iter().any(|(_, v)| *v)
    }

    pub fn set_flags(&self) -> Vec<&'a str> {
        self.entries.iter().filter(|(_, v)| *v).map(|(name, _)| *name).collect()
    }

    pub fn unset_flags(&self) -> Vec<&'a str> {
        self.entries.iter().filter(|(_, v)| !*v).map(|(name, _)| *name).collect()
    }
}

impl Serialize for FlagValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().copied())
    }
}

impl<'a> FlagCodec<'a> {
    pub fn values_of(&self, raw: &RawValue) -> FlagValues<'a> {
        self.decode(raw)
    }

    pub fn all_set(&self, raw: &RawValue) -> bool {
        let mask = self.config().mask();
        (raw.as_int() & mask) == mask
    }

    pub fn any_set(&self, raw: &RawValue) -> bool {
        (raw.as_int() & self.config().mask()) != 0
    }

    /// Flags currently set, in bit order.
    pub fn flags_in(&self, raw: &RawValue) -> Vec<&'a str> {
        self.decode(raw).set_flags()
    }

    /// Flags currently cleared, in bit order.
    pub fn flags_not_in(&self, raw: &RawValue) -> Vec<&'a str> {
        self.decode(raw).unset_flags()
    }
}
