use compact_str::CompactString;

use crate::representation::RawValue;

const TRUE_STRINGS: [&str; 5] = ["1", "t", "T", "true", "TRUE"];

/// Arbitrary value assigned to a flag.
///
/// Only `true`, the integer `1`, the strings `"1"`, `"t"`, `"T"`, `"true"`, `"TRUE"` and the
/// symbol `true` set the flag. Everything else clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagInput {
    Null,
    Bool(bool),
    Int(i64),
    Text(CompactString),
    Symbol(CompactString),
}

impl FlagInput {
    pub fn symbol(name: &str) -> Self {
        FlagInput::Symbol(name.into())
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            FlagInput::Bool(v) => *v,
            FlagInput::Int(v) => *v == 1,
            FlagInput::Text(s) => TRUE_STRINGS.contains(&s.as_str()),
            FlagInput::Symbol(s) => s.as_str() == "true",
            FlagInput::Null => false,
        }
    }
}

impl From<bool> for FlagInput {
    fn from(value: bool) -> Self {
        FlagInput::Bool(value)
    }
}

impl From<i64> for FlagInput {
    fn from(value: i64) -> Self {
        FlagInput::Int(value)
    }
}

impl From<i32> for FlagInput {
    fn from(value: i32) -> Self {
        FlagInput::Int(i64::from(value))
    }
}

impl From<&str> for FlagInput {
    fn from(value: &str) -> Self {
        FlagInput::Text(value.into())
    }
}

impl From<String> for FlagInput {
    fn from(value: String) -> Self {
        FlagInput::Text(value.into())
    }
}

impl From<RawValue> for FlagInput {
    fn from(value: RawValue) -> Self {
        match value {
            RawValue::Null => FlagInput::Null,
            RawValue::Int(v) => FlagInput::Int(v),
            RawValue::Text(s) => FlagInput::Text(s),
        }
    }
}

impl From<&serde_json::Value> for FlagInput {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(v) => FlagInput::Bool(*v),
            serde_json::Value::Number(n) => n.as_i64().map_or(FlagInput::Null, FlagInput::Int),
            serde_json::Value::String(s) => FlagInput::Text(s.as_str().into()),
            _ => FlagInput::Null,
        }
    }
}
