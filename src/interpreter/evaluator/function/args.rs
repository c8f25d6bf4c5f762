use crate::{
    error::RuntimeError,
    hardware::{ANY_PAD, PadTarget, SEQUENCE_LENGTH},
    interpreter::{
        evaluator::{core::EvalResult, function::core::NativeCall},
        value::Value,
    },
    util::num::{i32_to_u8_checked, i32_to_u32_checked},
};

/// Argument extraction for natives. Nothing is coerced: a parameter that
/// wants a Number only accepts a Number.
impl NativeCall<'_> {
    /// Builds an `InvalidArgument` error for this call.
    pub fn invalid(&self, details: impl Into<String>) -> RuntimeError {
        RuntimeError::InvalidArgument { function: self.function,
                                        details:  details.into(),
                                        line:     self.line, }
    }

    fn arg(&self, index: usize, parameter: &str) -> EvalResult<&Value> {
        self.args
            .get(index)
            .ok_or_else(|| self.invalid(format!("missing {parameter}")))
    }

    pub fn number(&self, index: usize, parameter: &str) -> EvalResult<i32> {
        match self.arg(index, parameter)? {
            Value::Number(n) => Ok(*n),
            other => Err(self.invalid(format!("{parameter} must be a Number, found {}", other.kind()))),
        }
    }

    /// A Number that must not be negative, such as a duration or a tone.
    pub fn unsigned(&self, index: usize, parameter: &str) -> EvalResult<u32> {
        let n = self.number(index, parameter)?;
        i32_to_u32_checked(n, self.invalid(format!("{parameter} must not be negative, found {n}")))
    }

    pub fn string(&self, index: usize, parameter: &str) -> EvalResult<&str> {
        match self.arg(index, parameter)? {
            Value::String(s) => Ok(s),
            other => Err(self.invalid(format!("{parameter} must be a String, found {}", other.kind()))),
        }
    }

    /// An optional trailing pad argument. Absent, or `255`, means any pad.
    pub fn pad_target(&self, index: usize) -> EvalResult<PadTarget> {
        if index >= self.args.len() {
            return Ok(PadTarget::Any);
        }
        let n = self.number(index, "pad")?;
        let pad = i32_to_u8_checked(n, self.invalid(format!("pad must be between 0 and {ANY_PAD}, found {n}")))?;
        Ok(PadTarget::from_index(pad))
    }

    /// A required pad argument naming one specific pad.
    pub fn pad_index(&self, index: usize) -> EvalResult<u8> {
        match self.pad_target(index)? {
            PadTarget::Pad(pad) if index < self.args.len() => Ok(pad),
            _ => Err(self.invalid(format!("pad must be between 0 and {}", ANY_PAD - 1))),
        }
    }

    /// An Array of at most [`SEQUENCE_LENGTH`] non-negative Numbers, packed
    /// into a zero-filled sequence.
    ///
    /// # Returns
    /// The packed sequence and the number of entries the script supplied.
    pub fn sequence(&self, index: usize, parameter: &str) -> EvalResult<([u32; SEQUENCE_LENGTH], usize)> {
        let elements = match self.arg(index, parameter)? {
            Value::Array(elements) => elements,
            other => {
                return Err(self.invalid(format!("{parameter} must be an Array, found {}", other.kind())));
            },
        };
        if elements.len() > SEQUENCE_LENGTH {
            return Err(self.invalid(format!("{parameter} holds at most {SEQUENCE_LENGTH} entries, found {}",
                                            elements.len())));
        }

        let mut sequence = [0; SEQUENCE_LENGTH];
        for (slot, element) in sequence.iter_mut().zip(elements) {
            *slot = match element {
                Value::Number(n) => {
                    i32_to_u32_checked(*n,
                                       self.invalid(format!("{parameter} must not hold negative Numbers, found {n}")))?
                },
                other => {
                    return Err(self.invalid(format!("{parameter} must hold Numbers, found {}", other.kind())));
                },
            };
        }
        Ok((sequence, elements.len()))
    }
}
