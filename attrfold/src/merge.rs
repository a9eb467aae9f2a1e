//! The merge engine: folds classified contributions into attribute nodes.
//!
//! Three policies exist. At the top level, `id` accumulates tokens joined by
//! `-` and `class` accumulates tokens joined by a space. Every other name, and
//! every name at all below the top level, overrides its leaf. Nested records
//! are always merged into a node's children with the override policy.

use std::borrow::Cow;

use attrfold_value::{VObject, Value};

use crate::AttrError;
use crate::classify::{Contribution, classify};
use crate::tracing_macros::trace;
use crate::tree::{AttributeNode, AttributeSet, RenderValue};

/// Where in the attribute tree a merge happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeLevel {
    /// Directly on the tag.
    Top,
    /// Inside a nested record.
    Nested,
}

/// How a node combines its current state with a new contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Join tokens with `-` (top-level `id`).
    JoinDash,
    /// Join tokens with a single space (top-level `class`).
    JoinSpace,
    /// Replace the leaf, merge nested records into the children.
    Override,
}

impl Policy {
    /// The policy for `name` at `level`.
    ///
    /// This is a `const fn` so that fixed-shape attribute sets pick their
    /// policies at compile time.
    pub const fn for_name(name: &str, level: MergeLevel) -> Policy {
        match level {
            MergeLevel::Nested => Policy::Override,
            MergeLevel::Top => {
                if str_eq(name, "id") {
                    Policy::JoinDash
                } else if str_eq(name, "class") {
                    Policy::JoinSpace
                } else {
                    Policy::Override
                }
            }
        }
    }

    /// The separator of an accumulating policy.
    pub const fn separator(self) -> Option<&'static str> {
        match self {
            Policy::JoinDash => Some("-"),
            Policy::JoinSpace => Some(" "),
            Policy::Override => None,
        }
    }
}

pub(crate) const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

impl AttributeNode {
    /// Merge `value`, contributed under `name`, into this node with `policy`.
    pub fn merge(&mut self, name: &str, value: &Value, policy: Policy) -> Result<(), AttrError> {
        let contribution = classify(name, value)?;
        trace!(attribute = name, ?policy, ?contribution, "merge");
        match (policy.separator(), contribution) {
            (_, Contribution::Absent) => Ok(()),
            (_, Contribution::Record(record)) => self.children.merge_record(record),
            (Some(separator), Contribution::Sequence(items)) => {
                self.accumulate(name, items, separator)
            }
            (Some(separator), Contribution::Scalar(_)) => {
                self.accumulate(name, core::slice::from_ref(value), separator)
            }
            (None, Contribution::Sequence(items)) => self.override_with_last(name, items),
            (None, Contribution::Scalar(scalar)) => {
                self.leaf = Some(scalar.to_render_value());
                Ok(())
            }
        }
    }

    /// Join the current leaf and the surviving candidate tokens.
    fn accumulate(
        &mut self,
        name: &str,
        items: &[Value],
        separator: &str,
    ) -> Result<(), AttrError> {
        let mut tokens: Vec<Cow<'_, str>> = Vec::with_capacity(items.len() + 1);
        if let Some(token) = self.leaf.as_ref().and_then(RenderValue::as_token) {
            tokens.push(token);
        }
        for item in items {
            match classify(name, item)? {
                Contribution::Absent => {}
                Contribution::Scalar(scalar) if scalar.is_false() => {}
                Contribution::Scalar(scalar) => tokens.push(Cow::Owned(scalar.to_text())),
                Contribution::Sequence(_) | Contribution::Record(_) => {
                    return Err(AttrError::UnsupportedContributionShape {
                        name: name.to_owned(),
                        shape: item.value_type().name(),
                    });
                }
            }
        }
        let leaf = (!tokens.is_empty()).then(|| RenderValue::Text(tokens.join(separator)));
        self.leaf = leaf;
        Ok(())
    }

    /// Last write wins: only the final element of a sequence survives.
    fn override_with_last(&mut self, name: &str, items: &[Value]) -> Result<(), AttrError> {
        let Some(last) = items.last() else {
            return Ok(());
        };
        self.leaf = match classify(name, last)? {
            Contribution::Absent => None,
            Contribution::Scalar(scalar) => Some(scalar.to_render_value()),
            Contribution::Sequence(_) | Contribution::Record(_) => {
                return Err(AttrError::UnsupportedContributionShape {
                    name: name.to_owned(),
                    shape: last.value_type().name(),
                });
            }
        };
        Ok(())
    }
}

impl AttributeSet {
    /// Contribute `value` to the top-level attribute `name`.
    pub fn contribute(&mut self, name: &str, value: &Value) -> Result<(), AttrError> {
        self.merge_at(name, value, MergeLevel::Top)
    }

    /// Contribute `value` to `name`, with the policy `name` has at `level`.
    pub fn merge_at(
        &mut self,
        name: &str,
        value: &Value,
        level: MergeLevel,
    ) -> Result<(), AttrError> {
        let policy = Policy::for_name(name, level);
        self.node_mut(name).merge(name, value, policy)
    }

    /// Merge every entry of a nested record at the nested level.
    pub(crate) fn merge_record(&mut self, record: &VObject) -> Result<(), AttrError> {
        for (key, value) in record {
            self.merge_at(key, value, MergeLevel::Nested)?;
        }
        Ok(())
    }
}
