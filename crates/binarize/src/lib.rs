//! Named boolean flags packed as bits into a single record column.
//!
//! A [`FlagSetRegistry`] is configured once with the flag names of every binarized column and
//! then frozen. Record operations go through [`Binarized`], which reads the column value from a
//! [`Record`], runs it through a [`FlagCodec`] and writes mutations back in the column's
//! [`Representation`].

use compact_str::CompactString;

pub mod binarized;
pub mod codec;
pub mod config;
pub mod input;
pub mod methods;
pub mod query;
pub mod record;
pub mod registry;
pub mod representation;
pub mod schema;

pub use binarized::Binarized;
pub use codec::{FlagCodec, FlagOp};
pub use config::{BinarizeConfig, ColumnConfig};
pub use input::FlagInput;
pub use methods::{ColumnMethod, FlagMethod, Method, MethodOutput, MethodTable, MethodTarget};
pub use query::FlagValues;
pub use record::{MemoryRecord, Record};
pub use registry::{FlagSetConfig, FlagSetRegistry, MAX_FLAGS, RegistryBuilder};
pub use representation::{RawValue, Representation};
pub use schema::{MemorySchema, Schema};

#[derive(Debug, thiserror::Error)]
pub enum BinarizeError {
    #[error("Unable to find `{0}` column in the schema")]
    UnknownColumn(CompactString),
    #[error("`{0}` column has already been binarized")]
    DuplicateConfiguration(CompactString),
    #[error("Invalid flag set for `{column}` column: {problem}")]
    InvalidFlagSet { column: CompactString, problem: FlagSetProblem },
    #[error("Flag `{flag}` is not available in `{column}` column")]
    UnknownFlag { column: CompactString, flag: CompactString },
    #[error("`{0}` column is not binarized")]
    UnconfiguredColumn(CompactString),
    #[error("Unknown method `{0}`")]
    UnknownMethod(CompactString),
    #[error("Method `{method}` expects {expected} argument(s)")]
    ArgumentCount { method: CompactString, expected: usize },
    #[error("Unable to parse flag set configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Reason a flag list was rejected by [`RegistryBuilder::configure`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagSetProblem {
    #[error("expected at least 2 flags, got {0}")]
    TooFew(usize),
    #[error("at most {max} flags fit into a column, got {0}", max = MAX_FLAGS)]
    TooMany(usize),
    #[error("flag `{0}` is listed more than once")]
    Duplicate(CompactString),
}
