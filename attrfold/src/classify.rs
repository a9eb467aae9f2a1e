//! Classification of contributed values.

use attrfold_value::{VNumber, VObject, Value};

use crate::AttrError;
use crate::tree::RenderValue;

/// The shape of a contributed value, which selects the merge behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contribution<'a> {
    /// Nothing to contribute.
    Absent,
    /// One atomic renderable value.
    Scalar(Scalar<'a>),
    /// An ordered list of values.
    Sequence(&'a [Value]),
    /// A nested record of sub-attributes.
    Record(&'a VObject),
}

/// An atomic renderable value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    /// Boolean
    Bool(bool),
    /// Number
    Number(&'a VNumber),
    /// String
    String(&'a str),
}

impl Scalar<'_> {
    /// The string form used when the scalar is joined or rendered as text.
    pub fn to_text(&self) -> String {
        match *self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::String(s) => s.to_owned(),
        }
    }

    /// Returns true for boolean `false`.
    pub fn is_false(&self) -> bool {
        matches!(self, Scalar::Bool(false))
    }

    /// The leaf this scalar becomes under the override policy: booleans stay
    /// booleans, everything else becomes text.
    pub fn to_render_value(&self) -> RenderValue {
        match *self {
            Scalar::Bool(b) => RenderValue::Bool(b),
            _ => RenderValue::Text(self.to_text()),
        }
    }
}

/// Classify `value` contributed under `name`.
///
/// The name only provides context for the error; classification depends on
/// the value's shape alone.
pub fn classify<'a>(name: &str, value: &'a Value) -> Result<Contribution<'a>, AttrError> {
    Ok(match value {
        Value::Null => Contribution::Absent,
        Value::Bool(b) => Contribution::Scalar(Scalar::Bool(*b)),
        Value::Number(n) => Contribution::Scalar(Scalar::Number(n)),
        Value::String(s) => Contribution::Scalar(Scalar::String(s)),
        Value::Array(items) => Contribution::Sequence(items),
        Value::Object(record) => Contribution::Record(record),
        Value::Bytes(_) => {
            return Err(AttrError::UnsupportedContributionShape {
                name: name.to_owned(),
                shape: value.value_type().name(),
            });
        }
    })
}
