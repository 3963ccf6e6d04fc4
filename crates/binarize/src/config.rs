use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::representation::Representation;

/// Flag set configuration document.
///
/// ```json
/// { "columns": [{ "column": "colors", "flags": ["red", "green", "blue"], "as": "integer" }] }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarizeConfig {
    pub columns: Vec<ColumnConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub column: CompactString,
    pub flags: Vec<CompactString>,
    /// Falls back to the schema's column representation when absent.
    #[serde(default, rename = "as", skip_serializing_if = "Option::is_none")]
    pub representation: Option<Representation>,
}

impl BinarizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn with_column<I, F>(
        mut self,
        column: &str,
        flags: I,
        representation: Option<Representation>,
    ) -> Self
    where
        I: IntoIterator<Item = F>,
        F: AsRef<str>,
    {
        self.columns.push(ColumnConfig {
            column: column.into(),
            flags: flags.into_iter().map(|flag| CompactString::from(flag.as_ref())).collect(),
            representation,
        });
        self
    }
}
