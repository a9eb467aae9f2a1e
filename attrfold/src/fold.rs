//! The constant-folding planner.
//!
//! A front end describes one tag's attributes as an [`Expr`]: a chain of merge
//! steps over operands that are either literals or run-time parameters.
//! [`fold`] evaluates every step whose inputs are all literal, bottom-up, and
//! stops at the first step that needs a parameter. [`plan`] turns the result
//! into either a literal string or a [`Deferred`] program that replays the
//! remaining steps on a copy of the folded prefix when the template runs.

use std::borrow::Cow;

use attrfold_value::{VObject, Value};
use indexmap::IndexMap;

use crate::AttrError;
use crate::serialize::{SerializeOptions, to_string_with_options};
use crate::store::AttributeStore;
use crate::tracing_macros::{debug, trace, trace_span};
use crate::tree::AttributeSet;

/// An operand of a merge step.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A value known at build time.
    Literal(Value),
    /// A value supplied at run time through [`Bindings`].
    Param(String),
    /// A record whose fields are operands, in order.
    Record(Vec<(String, Operand)>),
    /// A fixed-size list of operands.
    Tuple(Vec<Operand>),
}

impl Operand {
    /// A run-time parameter.
    pub fn param(name: impl Into<String>) -> Self {
        Operand::Param(name.into())
    }

    /// A record operand.
    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Operand)>) -> Self {
        Operand::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// A tuple operand.
    pub fn tuple(items: impl IntoIterator<Item = Operand>) -> Self {
        Operand::Tuple(items.into_iter().collect())
    }

    /// Returns true if the operand contains no parameter.
    pub fn is_foldable(&self) -> bool {
        match self {
            Operand::Literal(_) => true,
            Operand::Param(_) => false,
            Operand::Record(fields) => fields.iter().all(|(_, op)| op.is_foldable()),
            Operand::Tuple(items) => items.iter().all(Operand::is_foldable),
        }
    }

    /// The operand's value if it is foldable.
    pub fn to_constant(&self) -> Option<Value> {
        match self {
            Operand::Literal(value) => Some(value.clone()),
            Operand::Param(_) => None,
            Operand::Record(fields) => fields
                .iter()
                .map(|(k, op)| Some((k.clone(), op.to_constant()?)))
                .collect::<Option<VObject>>()
                .map(Value::Object),
            Operand::Tuple(items) => items
                .iter()
                .map(Operand::to_constant)
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
        }
    }

    /// The operand's value with parameters taken from `bindings`.
    pub fn resolve(&self, bindings: &Bindings) -> Result<Value, AttrError> {
        match self {
            Operand::Literal(value) => Ok(value.clone()),
            Operand::Param(name) => {
                bindings
                    .get(name)
                    .cloned()
                    .ok_or_else(|| AttrError::UnboundParameter { name: name.clone() })
            }
            Operand::Record(fields) => fields
                .iter()
                .map(|(k, op)| Ok((k.clone(), op.resolve(bindings)?)))
                .collect::<Result<VObject, AttrError>>()
                .map(Value::Object),
            Operand::Tuple(items) => items
                .iter()
                .map(|op| op.resolve(bindings))
                .collect::<Result<Vec<_>, AttrError>>()
                .map(Value::Array),
        }
    }

    fn collect_params<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Operand::Literal(_) => {}
            Operand::Param(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            Operand::Record(fields) => fields.iter().for_each(|(_, op)| op.collect_params(out)),
            Operand::Tuple(items) => items.iter().for_each(|op| op.collect_params(out)),
        }
    }
}

macro_rules! impl_literal_operand {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::Literal(Value::from(value))
                }
            }
        )*
    };
}

impl_literal_operand!(Value, &str, String, bool, i32, i64, u32, u64, usize, f64);

/// A merge expression for one tag's attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Expr {
    /// The empty attribute set.
    #[default]
    Empty,
    /// An attribute set computed at build time.
    Folded(AttributeSet),
    /// One `name = value` contribution on top of `base`.
    Merge {
        /// The attributes so far.
        base: Box<Expr>,
        /// The attribute name.
        name: String,
        /// The contributed value.
        value: Operand,
    },
    /// A spread record on top of `base`.
    Spread {
        /// The attributes so far.
        base: Box<Expr>,
        /// The record whose entries are contributed in order.
        record: Operand,
    },
}

impl Expr {
    /// The empty attribute set.
    pub fn new() -> Self {
        Expr::Empty
    }

    /// Contribute `value` to `name` on top of this expression.
    pub fn merge(self, name: impl Into<String>, value: impl Into<Operand>) -> Self {
        Expr::Merge {
            base: Box::new(self),
            name: name.into(),
            value: value.into(),
        }
    }

    /// Spread `record` on top of this expression.
    pub fn spread(self, record: impl Into<Operand>) -> Self {
        Expr::Spread {
            base: Box::new(self),
            record: record.into(),
        }
    }

    /// Returns the attribute set if the expression is fully folded.
    pub fn as_folded(&self) -> Option<&AttributeSet> {
        match self {
            Expr::Folded(set) => Some(set),
            _ => None,
        }
    }
}

/// Fold every step whose base and operand are known, bottom-up.
///
/// Errors from literal operands (such as an unsupported shape) surface here,
/// at build time.
pub fn fold(expr: Expr) -> Result<Expr, AttrError> {
    match expr {
        Expr::Empty => Ok(Expr::Folded(AttributeSet::new())),
        Expr::Folded(set) => Ok(Expr::Folded(set)),
        Expr::Merge { base, name, value } => {
            let base = fold(*base)?;
            let constant = value.to_constant();
            match (base, constant) {
                (Expr::Folded(mut set), Some(constant)) => {
                    trace!(attribute = %name, "fold merge");
                    set.contribute(&name, &constant)?;
                    Ok(Expr::Folded(set))
                }
                (base, _) => Ok(Expr::Merge {
                    base: Box::new(base),
                    name,
                    value,
                }),
            }
        }
        Expr::Spread { base, record } => {
            let base = fold(*base)?;
            let constant = record.to_constant();
            match (base, constant) {
                (Expr::Folded(mut set), Some(constant)) => {
                    trace!("fold spread");
                    set.spread(&constant)?;
                    Ok(Expr::Folded(set))
                }
                (base, _) => Ok(Expr::Spread {
                    base: Box::new(base),
                    record,
                }),
            }
        }
    }
}

/// One deferred step of a [`Deferred`] program.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Contribute to one attribute.
    Merge {
        /// The attribute name.
        name: String,
        /// The contributed value.
        value: Operand,
    },
    /// Spread a record.
    Spread {
        /// The record.
        record: Operand,
    },
}

impl Step {
    fn apply<S: AttributeStore + ?Sized>(
        &self,
        store: &mut S,
        bindings: &Bindings,
    ) -> Result<(), AttrError> {
        match self {
            Step::Merge { name, value } => store.contribute(name, &value.resolve(bindings)?),
            Step::Spread { record } => store.spread(&record.resolve(bindings)?),
        }
    }
}

/// Run-time values for the parameters of a deferred plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: IndexMap<String, Value>,
}

impl Bindings {
    /// No bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any earlier binding.
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind `name` to `value` in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// The value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// The run-time half of a partially folded expression: a folded prefix and
/// the steps that depend on parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred {
    base: AttributeSet,
    steps: Vec<Step>,
    options: SerializeOptions,
}

impl Deferred {
    /// The attributes folded at build time.
    pub fn base(&self) -> &AttributeSet {
        &self.base
    }

    /// The steps replayed at run time, in source order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Parameter names in order of first use.
    pub fn param_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for step in &self.steps {
            match step {
                Step::Merge { value, .. } => value.collect_params(&mut names),
                Step::Spread { record } => record.collect_params(&mut names),
            }
        }
        names
    }

    /// Build this tag's attribute set from a copy of the folded prefix.
    pub fn evaluate(&self, bindings: &Bindings) -> Result<AttributeSet, AttrError> {
        let mut set = AttributeSet::new();
        self.evaluate_into(&mut set, bindings)?;
        Ok(set)
    }

    /// Seed `store` with the folded prefix, then replay the deferred steps.
    ///
    /// Works for any backend, so a fixed-shape set ends up with the same
    /// attributes, in the same order, as [`Deferred::evaluate`].
    pub fn evaluate_into<S: AttributeStore + ?Sized>(
        &self,
        store: &mut S,
        bindings: &Bindings,
    ) -> Result<(), AttrError> {
        for (name, node) in &self.base {
            store.set_node(name, node.clone())?;
        }
        self.replay(store, bindings)
    }

    /// Apply only the deferred steps to `store`, which must already hold the
    /// folded prefix.
    pub fn replay<S: AttributeStore + ?Sized>(
        &self,
        store: &mut S,
        bindings: &Bindings,
    ) -> Result<(), AttrError> {
        for step in &self.steps {
            step.apply(store, bindings)?;
        }
        Ok(())
    }

    /// Evaluate and serialize.
    pub fn render(&self, bindings: &Bindings) -> Result<String, AttrError> {
        let set = self.evaluate(bindings)?;
        Ok(to_string_with_options(&set, &self.options))
    }
}

/// How a tag's attributes are produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    /// Everything was known at build time: the rendered attribute string.
    Constant(String),
    /// Some contribution is only known at run time.
    Deferred(Deferred),
}

impl Plan {
    /// Returns true if the attributes were rendered at build time.
    pub fn is_constant(&self) -> bool {
        matches!(self, Plan::Constant(_))
    }

    /// The rendered string of a constant plan.
    pub fn as_constant(&self) -> Option<&str> {
        match self {
            Plan::Constant(s) => Some(s),
            Plan::Deferred(_) => None,
        }
    }

    /// Render the attributes. Constant plans ignore `bindings`.
    pub fn render(&self, bindings: &Bindings) -> Result<Cow<'_, str>, AttrError> {
        match self {
            Plan::Constant(s) => Ok(Cow::Borrowed(s)),
            Plan::Deferred(deferred) => deferred.render(bindings).map(Cow::Owned),
        }
    }
}

/// Fold `expr` and decide between build-time and run-time rendering.
pub fn plan(expr: Expr, options: &SerializeOptions) -> Result<Plan, AttrError> {
    trace_span!("plan");
    let (base, steps) = into_steps(fold(expr)?);
    if steps.is_empty() {
        let rendered = to_string_with_options(&base, options);
        debug!(attributes = %rendered, "attributes folded to a constant");
        return Ok(Plan::Constant(rendered));
    }
    debug!(
        folded = base.len(),
        deferred = steps.len(),
        "attributes deferred to run time"
    );
    Ok(Plan::Deferred(Deferred {
        base,
        steps,
        options: options.clone(),
    }))
}

/// Split a folded expression into its folded base and the steps above it.
fn into_steps(expr: Expr) -> (AttributeSet, Vec<Step>) {
    let mut steps = Vec::new();
    let mut cursor = expr;
    let base = loop {
        match cursor {
            Expr::Empty => break AttributeSet::new(),
            Expr::Folded(set) => break set,
            Expr::Merge { base, name, value } => {
                steps.push(Step::Merge { name, value });
                cursor = *base;
            }
            Expr::Spread { base, record } => {
                steps.push(Step::Spread { record });
                cursor = *base;
            }
        }
    };
    steps.reverse();
    (base, steps)
}
