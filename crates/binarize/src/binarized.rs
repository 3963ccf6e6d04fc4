use crate::{
    BinarizeError,
    codec::{FlagCodec, FlagOp},
    input::FlagInput,
    methods::{ColumnMethod, FlagMethod, MethodOutput, MethodTarget},
    query::FlagValues,
    record::Record,
    registry::FlagSetRegistry,
    representation::RawValue,
};

/// Flag operations of a registry applied to one record.
pub struct Binarized<'reg, 'rec, R: Record + ?Sized> {
    registry: &'reg FlagSetRegistry,
    record: &'rec mut R,
}

impl<'reg, 'rec, R: Record + ?Sized> Binarized<'reg, 'rec, R> {
    pub fn new(registry: &'reg FlagSetRegistry, record: &'rec mut R) -> Self {
        Self { registry, record }
    }

    pub fn record(&self) -> &R {
        &*self.record
    }

    fn codec(&self, column: &str) -> Result<FlagCodec<'reg>, BinarizeError> {
        self.registry.codec(column)
    }

    pub fn is_set(&self, column: &str, flag: &str) -> Result<bool, BinarizeError> {
        self.codec(column)?.is_set(&self.record.get(column), flag)
    }

    /// Applies `op` to `flag` and writes the new value back to the record.
    pub fn apply(
        &mut self,
        column: &str,
        flag: &str,
        op: FlagOp,
    ) -> Result<RawValue, BinarizeError> {
        let value = self.codec(column)?.encode_mutation(&self.record.get(column), flag, op)?;
        tracing::trace!(column, flag, ?op, %value, "flag mutation");
        self.record.set(column, value.clone());
        Ok(value)
    }

    pub fn mark(&mut self, column: &str, flag: &str) -> Result<RawValue, BinarizeError> {
        self.apply(column, flag, FlagOp::Mark)
    }

    pub fn unmark(&mut self, column: &str, flag: &str) -> Result<RawValue, BinarizeError> {
        self.apply(column, flag, FlagOp::Unmark)
    }

    pub fn toggle(&mut self, column: &str, flag: &str) -> Result<RawValue, BinarizeError> {
        self.apply(column, flag, FlagOp::Toggle)
    }

    pub fn assign(
        &mut self,
        column: &str,
        flag: &str,
        value: impl Into<FlagInput>,
    ) -> Result<RawValue, BinarizeError> {
        self.apply(column, flag, FlagOp::assign(value))
    }

    /// Whether `flag` differs from its committed state.
    ///
    /// Always `false` while the record reports the column clean.
    pub fn changed(&self, column: &str, flag: &str) -> Result<bool, BinarizeError> {
        let codec = self.codec(column)?;
        if !self.record.is_dirty(column) {
            return codec.config().bit(flag).map(|_| false);
        }
        let previous = self.record.previous_value(column).unwrap_or_default();
        codec.changed(flag, &previous, &self.record.get(column))
    }

    pub fn values(&self, column: &str) -> Result<FlagValues<'reg>, BinarizeError> {
        Ok(self.codec(column)?.values_of(&self.record.get(column)))
    }

    pub fn all(&self, column: &str) -> Result<bool, BinarizeError> {
        Ok(self.codec(column)?.all_set(&self.record.get(column)))
    }

    pub fn any(&self, column: &str) -> Result<bool, BinarizeError> {
        Ok(self.codec(column)?.any_set(&self.record.get(column)))
    }

    pub fn flags_in(&self, column: &str) -> Result<Vec<&'reg str>, BinarizeError> {
        Ok(self.codec(column)?.flags_in(&self.record.get(column)))
    }

    pub fn flags_not_in(&self, column: &str) -> Result<Vec<&'reg str>, BinarizeError> {
        Ok(self.codec(column)?.flags_not_in(&self.record.get(column)))
    }

    /// Calls a generated method by name, e.g. `mark_red_colors` or `red_colors=`.
    pub fn call(
        &mut self,
        name: &str,
        argument: Option<FlagInput>,
    ) -> Result<MethodOutput<'reg>, BinarizeError> {
        let registry = self.registry;
        let method = registry
            .methods()
            .get(name)
            .ok_or_else(|| BinarizeError::UnknownMethod(name.into()))?;
        if usize::from(argument.is_some()) != method.arity() {
            return Err(BinarizeError::ArgumentCount {
                method: name.into(),
                expected: method.arity(),
            });
        }

        let column = method.column.as_str();
        let output = match &method.target {
            MethodTarget::Column(method) => match method {
                ColumnMethod::Values => MethodOutput::Values(self.values(column)?),
                ColumnMethod::All => MethodOutput::Bool(self.all(column)?),
                ColumnMethod::Any => MethodOutput::Bool(self.any(column)?),
                ColumnMethod::In => MethodOutput::Flags(self.flags_in(column)?),
                ColumnMethod::NotIn => MethodOutput::Flags(self.flags_not_in(column)?),
            },
            MethodTarget::Flag { flag, method } => match method {
                FlagMethod::IsSet => MethodOutput::Bool(self.is_set(column, flag)?),
                FlagMethod::Changed => MethodOutput::Bool(self.changed(column, flag)?),
                FlagMethod::Mark => MethodOutput::Value(self.mark(column, flag)?),
                FlagMethod::Unmark => MethodOutput::Value(self.unmark(column, flag)?),
                FlagMethod::Toggle => MethodOutput::Value(self.toggle(column, flag)?),
                FlagMethod::Assign => {
                    let value = argument.unwrap_or(FlagInput::Null);
                    MethodOutput::Value(self.assign(column, flag, value)?)
                }
            },
        };
        Ok(output)
    }
}
