use crate::{
    BinarizeError, input::FlagInput, query::FlagValues, registry::FlagSetConfig,
    representation::RawValue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOp {
    Mark,
    Unmark,
    Toggle,
    Assign(bool),
}

impl FlagOp {
    /// Assignment of an arbitrary value, see [`FlagInput::is_truthy`].
    pub fn assign(value: impl Into<FlagInput>) -> Self {
        FlagOp::Assign(value.into().is_truthy())
    }

    pub fn apply(self, value: i64, bit: i64) -> i64 {
        match self {
            FlagOp::Mark | FlagOp::Assign(true) => value | bit,
            FlagOp::Unmark | FlagOp::Assign(false) => value & !bit,
            FlagOp::Toggle => value ^ bit,
        }
    }
}

/// Reads and mutates column values of one binarized column.
///
/// All operations are pure: mutations return the new raw value in the column's representation
/// and leave writing it back to the caller.
#[derive(Debug, Clone, Copy)]
pub struct FlagCodec<'a> {
    config: &'a FlagSetConfig,
}

impl<'a> FlagCodec<'a> {
    pub fn new(config: &'a FlagSetConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a FlagSetConfig {
        self.config
    }

    pub fn decode(&self, raw: &RawValue) -> FlagValues<'a> {
        let value = raw.as_int();
        FlagValues::new(
            self.config
                .flags()
                .iter()
                .enumerate()
                .map(|(index, flag)| (flag.as_str(), (value & (1i64 << index)) != 0))
                .collect(),
        )
    }

    pub fn is_set(&self, raw: &RawValue, flag: &str) -> Result<bool, BinarizeError> {
        let bit = self.config.bit(flag)?;
        Ok((raw.as_int() & bit) == bit)
    }

    /// New raw value after applying `op` to `flag`.
    ///
    /// Text that doesn't fit into `i64` is returned unchanged instead of being rewritten with
    /// a saturated value.
    pub fn encode_mutation(
        &self,
        raw: &RawValue,
        flag: &str,
        op: FlagOp,
    ) -> Result<RawValue, BinarizeError> {
        let bit = self.config.bit(flag)?;
        let Some(value) = raw.checked_int() else {
            let column = self.config.column();
            tracing::warn!(column, flag, %raw, "value out of range, left as is");
            return Ok(raw.clone());
        };
        Ok(RawValue::from_int(op.apply(value, bit), self.config.representation()))
    }

    /// Raw value with exactly `flags` set.
    pub fn encode<I, F>(&self, flags: I) -> Result<RawValue, BinarizeError>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<str>,
    {
        let mut value = 0;
        for flag in flags {
            value |= self.config.bit(flag.as_ref())?;
        }
        Ok(RawValue::from_int(value, self.config.representation()))
    }

    /// Whether `flag` differs between `old` and `new`.
    ///
    /// This compares bits only. Callers holding a record should ask it whether the column is
    /// dirty first, as [`crate::Binarized::changed`] does.
    pub fn changed(
        &self,
        flag: &str,
        old: &RawValue,
        new: &RawValue,
    ) -> Result<bool, BinarizeError> {
        let bit = self.config.bit(flag)?;
        Ok((new.as_int() & bit) != (old.as_int() & bit))
    }
}
