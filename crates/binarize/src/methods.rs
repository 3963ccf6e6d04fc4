//! Generated method names.
//!
//! Every binarized column `C` with flags `F` answers to:
//!
//! - `C_values`, `all_C?`, `any_C?`, `in_C` and `not_in_C`;
//! - per flag `f`: `f_C?`, `mark_f_C`, `unmark_f_C`, `toggle_f_C`, `f_C=` and `f_C_changed?`.
//!
//! The names resolve through a [`MethodTable`] into a column, an optional flag and the operation
//! to run; see [`crate::Binarized::call`]. Flags that aren't identifiers get no names, and a name
//! that is already taken keeps its first owner. Such flags stay reachable through
//! [`crate::Binarized`].

use std::{collections::hash_map::Entry, sync::LazyLock};

use compact_str::{CompactString, format_compact};
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::{query::FlagValues, registry::FlagSetConfig, representation::RawValue};

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnMethod {
    Values,
    All,
    Any,
    In,
    NotIn,
}

impl ColumnMethod {
    pub const ALL: [ColumnMethod; 5] = [
        ColumnMethod::Values,
        ColumnMethod::All,
        ColumnMethod::Any,
        ColumnMethod::In,
        ColumnMethod::NotIn,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagMethod {
    IsSet,
    Mark,
    Unmark,
    Toggle,
    Assign,
    Changed,
}

impl FlagMethod {
    pub const ALL: [FlagMethod; 6] = [
        FlagMethod::IsSet,
        FlagMethod::Mark,
        FlagMethod::Unmark,
        FlagMethod::Toggle,
        FlagMethod::Assign,
        FlagMethod::Changed,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodTarget {
    Column(ColumnMethod),
    Flag { flag: CompactString, method: FlagMethod },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub column: CompactString,
    pub target: MethodTarget,
}

impl Method {
    pub fn name(&self) -> CompactString {
        let c = &self.column;
        match &self.target {
            MethodTarget::Column(method) => match method {
                ColumnMethod::Values => format_compact!("{c}_values"),
                ColumnMethod::All => format_compact!("all_{c}?"),
                ColumnMethod::Any => format_compact!("any_{c}?"),
                ColumnMethod::In => format_compact!("in_{c}"),
                ColumnMethod::NotIn => format_compact!("not_in_{c}"),
            },
            MethodTarget::Flag { flag: f, method } => match method {
                FlagMethod::IsSet => format_compact!("{f}_{c}?"),
                FlagMethod::Mark => format_compact!("mark_{f}_{c}"),
                FlagMethod::Unmark => format_compact!("unmark_{f}_{c}"),
                FlagMethod::Toggle => format_compact!("toggle_{f}_{c}"),
                FlagMethod::Assign => format_compact!("{f}_{c}="),
                FlagMethod::Changed => format_compact!("{f}_{c}_changed?"),
            },
        }
    }

    /// Number of arguments the method takes.
    pub fn arity(&self) -> usize {
        match self.target {
            MethodTarget::Flag { method: FlagMethod::Assign, .. } => 1,
            _ => 0,
        }
    }

    pub(crate) fn generate(config: &FlagSetConfig) -> Vec<Method> {
        let column = CompactString::from(config.column());
        let mut methods = Vec::with_capacity(
            ColumnMethod::ALL.len() + config.len() * FlagMethod::ALL.len(),
        );
        for method in ColumnMethod::ALL {
            methods.push(Method { column: column.clone(), target: MethodTarget::Column(method) });
        }
        for flag in config.flags() {
            if !IDENTIFIER.is_match(flag) {
                tracing::warn!(%column, %flag, "flag name can't be part of a method name");
                continue;
            }
            for method in FlagMethod::ALL {
                methods.push(Method {
                    column: column.clone(),
                    target: MethodTarget::Flag { flag: flag.clone(), method },
                });
            }
        }
        methods
    }
}

/// Generated method names of every binarized column.
#[derive(Debug, Default, Clone)]
pub struct MethodTable {
    methods: FxHashMap<CompactString, Method>,
}

impl MethodTable {
    pub fn get(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(CompactString::as_str)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Adds the generated names of `config`, skipping names that are already taken.
    pub(crate) fn register(&mut self, config: &FlagSetConfig) {
        for method in Method::generate(config) {
            match self.methods.entry(method.name()) {
                Entry::Vacant(entry) => {
                    entry.insert(method);
                }
                Entry::Occupied(entry) => {
                    tracing::warn!(
                        column = config.column(),
                        name = %entry.key(),
                        owner = %entry.get().column,
                        "method name is already taken"
                    );
                }
            }
        }
    }
}

/// Result of a method called by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodOutput<'a> {
    Bool(bool),
    /// New column value written by a mutation.
    Value(RawValue),
    Values(FlagValues<'a>),
    Flags(Vec<&'a str>),
}

impl<'a> MethodOutput<'a> {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MethodOutput::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<RawValue> {
        match self {
            MethodOutput::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_flags(self) -> Option<Vec<&'a str>> {
        match self {
            MethodOutput::Flags(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_values(self) -> Option<FlagValues<'a>> {
        match self {
            MethodOutput::Values(v) => Some(v),
            _ => None,
        }
    }
}
