//! Every execution path must agree: build-time folding, run-time replay of a
//! deferred plan, a mix of both, the dynamic set and a fixed shape.

use attrfold::{
    AttrError, AttributeSet, AttributeStore, Bindings, Expr, Operand, Plan, SerializeOptions,
    Value, attribute_shape, plan,
};
use attrfold_testhelpers::test;
use bolero::check;

const NAMES: &[&str] = &["id", "class", "href", "data", "disabled", "aria_label"];
const WORDS: &[&str] = &["a", "b", "main", "x y", "<&>", "it's", ""];
const KEYS: &[&str] = &["foo", "bar", "id", "class", "baz_qux"];
// record keys that need escaping once flattened into attribute names
const ESCAPABLE_KEYS: &[&str] = &["foo", "id", "class", "it's", "a<b", "x&y"];

attribute_shape! {
    struct EquivAttrs {
        id,
        class,
        href,
        data,
        disabled,
        aria_label,
    }
}

/// One contribution of a generated sequence.
#[derive(Debug, Clone)]
pub(crate) enum Contribution {
    Merge(&'static str, Value),
    Spread(Value),
}

/// Reads fuzzer bytes as choices; exhausted input reads as zeros.
pub(crate) struct Choices<'a> {
    bytes: &'a [u8],
    pos: usize,
    keys: &'static [&'static str],
}

impl<'a> Choices<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self::with_keys(bytes, KEYS)
    }

    fn with_keys(bytes: &'a [u8], keys: &'static [&'static str]) -> Self {
        Self {
            bytes,
            pos: 0,
            keys,
        }
    }

    fn next(&mut self) -> u8 {
        let byte = self.bytes.get(self.pos).copied().unwrap_or(0);
        self.pos += 1;
        byte
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.next() as usize % items.len()]
    }

    fn is_done(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn scalar(&mut self) -> Value {
        match self.next() % 8 {
            0 => Value::Null,
            1 => Value::from(true),
            2 => Value::from(false),
            3 => Value::from(i64::from(self.next()) - 100),
            4 if self.next() % 16 == 0 => Value::bytes(vec![0xff]),
            _ => Value::from(self.pick(WORDS)),
        }
    }

    fn value(&mut self, depth: u8) -> Value {
        match self.next() % 8 {
            4 | 5 => {
                let len = self.next() % 4;
                (0..len)
                    .map(|_| {
                        // occasionally nest, which is an error for token positions
                        if depth > 0 && self.next() % 8 == 0 {
                            self.value(depth - 1)
                        } else {
                            self.scalar()
                        }
                    })
                    .collect()
            }
            6 | 7 if depth > 0 => self.record(depth - 1),
            _ => self.scalar(),
        }
    }

    fn record(&mut self, depth: u8) -> Value {
        let len = self.next() % 3;
        let mut record = Value::object();
        for _ in 0..len {
            let keys = self.keys;
            let key = self.pick(keys);
            let value = self.value(depth);
            if let Some(object) = record.as_object_mut() {
                object.insert(key.to_owned(), value);
            }
        }
        record
    }

    pub(crate) fn contributions(&mut self) -> Vec<Contribution> {
        let mut out = Vec::new();
        while !self.is_done() && out.len() < 12 {
            if self.next() % 5 == 0 {
                // spreads only carry shape names so a fixed shape accepts them
                let mut record = Value::object();
                if self.next() % 4 != 0 {
                    for _ in 0..self.next() % 3 {
                        let name = self.pick(NAMES);
                        let value = self.value(2);
                        if let Some(object) = record.as_object_mut() {
                            object.insert(name.to_owned(), value);
                        }
                    }
                } else {
                    record = Value::Null;
                }
                out.push(Contribution::Spread(record));
            } else {
                let name = self.pick(NAMES);
                out.push(Contribution::Merge(name, self.value(2)));
            }
        }
        out
    }
}

/// Build the expression, turning contribution `i` into a parameter when
/// `deferred(i)` holds.
fn expression(
    contributions: &[Contribution],
    deferred: impl Fn(usize) -> bool,
) -> (Expr, Bindings) {
    let mut bindings = Bindings::new();
    let mut expr = Expr::new();
    for (i, contribution) in contributions.iter().enumerate() {
        let mut operand = |value: &Value| {
            if deferred(i) {
                let param = format!("p{i}");
                bindings.insert(param.clone(), value.clone());
                Operand::param(param)
            } else {
                Operand::from(value.clone())
            }
        };
        expr = match contribution {
            Contribution::Merge(name, value) => expr.merge(*name, operand(value)),
            Contribution::Spread(record) => expr.spread(operand(record)),
        };
    }
    (expr, bindings)
}

fn planned(
    contributions: &[Contribution],
    deferred: impl Fn(usize) -> bool,
) -> Result<String, AttrError> {
    let (expr, bindings) = expression(contributions, deferred);
    let plan = plan(expr, &SerializeOptions::default())?;
    Ok(plan.render(&bindings)?.into_owned())
}

pub(crate) fn stored<S: AttributeStore>(
    mut store: S,
    contributions: &[Contribution],
) -> Result<String, AttrError> {
    for contribution in contributions {
        match contribution {
            Contribution::Merge(name, value) => store.contribute(name, value)?,
            Contribution::Spread(record) => store.spread(record)?,
        }
    }
    Ok(store.render(&SerializeOptions::default()))
}

#[test]
fn folded_and_deferred_paths_agree() {
    check!().with_type::<Vec<u8>>().for_each(|bytes| {
        let contributions = Choices::new(bytes).contributions();

        let direct = stored(AttributeSet::new(), &contributions);
        let folded = planned(&contributions, |_| false);
        let deferred = planned(&contributions, |_| true);
        let mixed = planned(&contributions, |i| i % 2 == 1);

        assert_eq!(folded, direct, "{contributions:?}");
        assert_eq!(deferred, direct, "{contributions:?}");
        assert_eq!(mixed, direct, "{contributions:?}");
    });
}

#[test]
fn fixed_shape_and_dynamic_set_agree() {
    check!().with_type::<Vec<u8>>().for_each(|bytes| {
        let contributions = Choices::with_keys(bytes, ESCAPABLE_KEYS).contributions();

        let dynamic = stored(AttributeSet::new(), &contributions);
        let fixed = stored(EquivAttrs::default(), &contributions);
        assert_eq!(fixed, dynamic, "{contributions:?}");
    });
}

#[test]
fn deferred_plans_evaluate_into_any_store() {
    check!().with_type::<Vec<u8>>().for_each(|bytes| {
        let contributions = Choices::with_keys(bytes, ESCAPABLE_KEYS).contributions();
        let (expr, bindings) = expression(&contributions, |i| i % 3 == 2);
        let Ok(Plan::Deferred(deferred)) = plan(expr, &SerializeOptions::default()) else {
            return;
        };
        let options = SerializeOptions::default();

        let mut shape = EquivAttrs::default();
        let from_shape = deferred
            .evaluate_into(&mut shape, &bindings)
            .map(|()| shape.render(&options));

        let mut set = AttributeSet::new();
        let from_set = deferred
            .evaluate_into(&mut set, &bindings)
            .map(|()| set.render(&options));

        let rendered = deferred.render(&bindings);
        assert_eq!(from_shape, rendered, "{contributions:?}");
        assert_eq!(from_set, rendered, "{contributions:?}");
    });
}
