use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::{
    BinarizeError, FlagSetProblem,
    binarized::Binarized,
    codec::FlagCodec,
    config::{BinarizeConfig, ColumnConfig},
    methods::MethodTable,
    record::Record,
    representation::Representation,
    schema::Schema,
};

/// Flags per column. Bit 63 is left unused so stored values never turn negative.
pub const MAX_FLAGS: usize = 63;

/// Flag names of one binarized column and their bit values.
///
/// The flag at index `i` owns the bit `1 << i`.
#[derive(Debug, Clone)]
pub struct FlagSetConfig {
    column: CompactString,
    flags: Vec<CompactString>,
    representation: Representation,
    bit_of: FxHashMap<CompactString, i64>,
}

impl FlagSetConfig {
    pub fn new<I, F>(
        column: &str,
        flags: I,
        representation: Representation,
    ) -> Result<Self, BinarizeError>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<str>,
    {
        let flags: Vec<CompactString> =
            flags.into_iter().map(|flag| CompactString::from(flag.as_ref())).collect();
        let invalid = |problem: FlagSetProblem| BinarizeError::InvalidFlagSet {
            column: column.into(),
            problem,
        };

        if flags.len() < 2 {
            return Err(invalid(FlagSetProblem::TooFew(flags.len())));
        }
        if flags.len() > MAX_FLAGS {
            return Err(invalid(FlagSetProblem::TooMany(flags.len())));
        }

        let mut bit_of = FxHashMap::default();
        for (index, flag) in flags.iter().enumerate() {
            if bit_of.insert(flag.clone(), 1i64 << index).is_some() {
                return Err(invalid(FlagSetProblem::Duplicate(flag.clone())));
            }
        }

        Ok(Self { column: column.into(), flags, representation, bit_of })
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Flag names in bit order.
    pub fn flags(&self) -> &[CompactString] {
        &self.flags
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.bit_of.contains_key(flag)
    }

    pub fn bit_of(&self, flag: &str) -> Option<i64> {
        self.bit_of.get(flag).copied()
    }

    pub fn index_of(&self, flag: &str) -> Option<u32> {
        self.bit_of(flag).map(i64::trailing_zeros)
    }

    /// All bits owned by this column's flags.
    pub fn mask(&self) -> i64 {
        i64::MAX >> (MAX_FLAGS - self.flags.len())
    }

    pub(crate) fn bit(&self, flag: &str) -> Result<i64, BinarizeError> {
        self.bit_of(flag).ok_or_else(|| BinarizeError::UnknownFlag {
            column: self.column.clone(),
            flag: flag.into(),
        })
    }
}

/// Setup phase of a [`FlagSetRegistry`].
///
/// Every column has to be configured before [`RegistryBuilder::build`] hands out the registry;
/// the built registry can't be changed anymore.
#[derive(Debug)]
pub struct RegistryBuilder<'s, S: Schema + ?Sized> {
    schema: &'s S,
    registry: FlagSetRegistry,
}

impl<'s, S: Schema + ?Sized> RegistryBuilder<'s, S> {
    pub fn new(schema: &'s S) -> Self {
        Self { schema, registry: FlagSetRegistry::default() }
    }

    /// Binarizes `column` with `flags` in bit order.
    ///
    /// Without an explicit `representation` the schema's column representation is used. A
    /// rejected configuration leaves the builder unchanged.
    pub fn configure<I, F>(
        &mut self,
        column: &str,
        flags: I,
        representation: Option<Representation>,
    ) -> Result<&mut Self, BinarizeError>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<str>,
    {
        match self.try_configure(column, flags, representation) {
            Ok(()) => Ok(self),
            Err(err) => {
                tracing::warn!(column, error = %err, "rejected flag set configuration");
                Err(err)
            }
        }
    }

    fn try_configure<I, F>(
        &mut self,
        column: &str,
        flags: I,
        representation: Option<Representation>,
    ) -> Result<(), BinarizeError>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<str>,
    {
        let Some(column_representation) = self.schema.column_representation(column) else {
            return Err(BinarizeError::UnknownColumn(column.into()));
        };
        if self.registry.index.contains_key(column) {
            return Err(BinarizeError::DuplicateConfiguration(column.into()));
        }

        let config =
            FlagSetConfig::new(column, flags, representation.unwrap_or(column_representation))?;
        self.registry.methods.register(&config);

        tracing::debug!(
            column,
            flags = config.len(),
            representation = ?config.representation(),
            "binarized column"
        );
        self.registry.index.insert(column.into(), self.registry.columns.len());
        self.registry.columns.push(config);
        Ok(())
    }

    /// Configures every column of `config` in order, stopping at the first rejected column.
    pub fn apply_config(&mut self, config: &BinarizeConfig) -> Result<&mut Self, BinarizeError> {
        for column in &config.columns {
            self.configure(&column.column, &column.flags, column.representation)?;
        }
        Ok(self)
    }

    pub fn import_from_json(&mut self, raw: &[u8]) -> Result<&mut Self, BinarizeError> {
        let config = BinarizeConfig::from_json(raw)?;
        self.apply_config(&config)
    }

    pub fn build(self) -> FlagSetRegistry {
        self.registry
    }
}

/// Binarized columns of one record type.
#[derive(Debug, Default, Clone)]
pub struct FlagSetRegistry {
    columns: Vec<FlagSetConfig>,
    index: FxHashMap<CompactString, usize>,
    methods: MethodTable,
}

impl FlagSetRegistry {
    pub fn builder<S: Schema + ?Sized>(schema: &S) -> RegistryBuilder<'_, S> {
        RegistryBuilder::new(schema)
    }

    pub fn get(&self, column: &str) -> Option<&FlagSetConfig> {
        self.index.get(column).map(|&i| &self.columns[i])
    }

    pub fn config(&self, column: &str) -> Result<&FlagSetConfig, BinarizeError> {
        self.get(column).ok_or_else(|| BinarizeError::UnconfiguredColumn(column.into()))
    }

    pub fn codec(&self, column: &str) -> Result<FlagCodec<'_>, BinarizeError> {
        self.config(column).map(FlagCodec::new)
    }

    /// Configured columns in configuration order.
    pub fn columns(&self) -> impl Iterator<Item = &FlagSetConfig> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    pub fn bind<'r, R: Record + ?Sized>(&self, record: &'r mut R) -> Binarized<'_, 'r, R> {
        Binarized::new(self, record)
    }

    pub fn to_config(&self) -> BinarizeConfig {
        BinarizeConfig {
            columns: self
                .columns
                .iter()
                .map(|config| ColumnConfig {
                    column: config.column.clone(),
                    flags: config.flags.clone(),
                    representation: Some(config.representation),
                })
                .collect(),
        }
    }
}
