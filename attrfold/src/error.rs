//! Error types for attribute merging and planning.

use std::fmt;

/// Error type for attribute merging, planning and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrError {
    /// A contributed value has a shape the merge engine cannot place in an
    /// attribute (bytes, or a container where a single token is required).
    UnsupportedContributionShape {
        /// The attribute (or nested key) the value was contributed to.
        name: String,
        /// The offending value type.
        shape: &'static str,
    },

    /// A fixed-shape attribute set was given a name outside its shape.
    UnknownAttribute {
        /// The attribute name.
        name: String,
    },

    /// A deferred plan was rendered without a binding for one of its parameters.
    UnboundParameter {
        /// The parameter name.
        name: String,
    },

    /// An attribute string could not be parsed back.
    Reparse(String),
}

impl fmt::Display for AttrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedContributionShape { name, shape } => {
                write!(f, "unsupported contribution shape for `{name}`: {shape}")
            }
            Self::UnknownAttribute { name } => write!(f, "unknown attribute: {name}"),
            Self::UnboundParameter { name } => write!(f, "unbound parameter: {name}"),
            Self::Reparse(msg) => write!(f, "cannot reparse attributes: {msg}"),
        }
    }
}

impl std::error::Error for AttrError {}
