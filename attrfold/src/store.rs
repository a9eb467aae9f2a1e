//! Attribute stores: the dynamic [`AttributeSet`] and fixed-shape sets
//! generated by [`attribute_shape!`](crate::attribute_shape).
//!
//! Both run the same node-level merge code; they differ only in how a name
//! finds its node. A dynamic set looks the name up in an ordered map and
//! creates a slot on first use. A fixed shape resolves the name against its
//! declared fields, whose policies are constants.

use attrfold_value::Value;

use crate::AttrError;
use crate::merge::str_eq;
use crate::serialize::{AttributeWriter, SerializeOptions};
use crate::tree::{AttributeNode, AttributeSet};

/// Something contributions can be merged into and that can be rendered.
pub trait AttributeStore {
    /// Contribute `value` to the top-level attribute `name`.
    fn contribute(&mut self, name: &str, value: &Value) -> Result<(), AttrError>;

    /// Replace the whole node of `name`. A name without a slot gets the next
    /// one, as with a first contribution.
    fn set_node(&mut self, name: &str, node: AttributeNode) -> Result<(), AttrError>;

    /// Write the stored attributes, in slot order.
    fn write_attributes(&self, writer: &mut AttributeWriter<'_>);

    /// Apply a spread record: every entry is contributed in order.
    /// An absent spread is a no-op.
    fn spread(&mut self, record: &Value) -> Result<(), AttrError> {
        match record {
            Value::Null => Ok(()),
            Value::Object(entries) => {
                for (name, value) in entries {
                    self.contribute(name, value)?;
                }
                Ok(())
            }
            other => Err(AttrError::UnsupportedContributionShape {
                name: String::from("..."),
                shape: other.value_type().name(),
            }),
        }
    }

    /// Render the stored attributes.
    fn render(&self, options: &SerializeOptions) -> String {
        let mut writer = AttributeWriter::new(options.clone());
        self.write_attributes(&mut writer);
        writer.finish()
    }
}

impl AttributeStore for AttributeSet {
    fn contribute(&mut self, name: &str, value: &Value) -> Result<(), AttrError> {
        AttributeSet::contribute(self, name, value)
    }

    fn set_node(&mut self, name: &str, node: AttributeNode) -> Result<(), AttrError> {
        self.insert(name, node);
        Ok(())
    }

    fn write_attributes(&self, writer: &mut AttributeWriter<'_>) {
        writer.write_set(self);
    }
}

/// The order in which the `N` fields of a fixed shape claimed their slots.
///
/// A field claims a slot on its first contribution, so a fixed shape writes
/// its attributes in the same order a dynamic [`AttributeSet`] would.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotOrder<const N: usize> {
    slots: [u8; N],
    len: usize,
}

impl<const N: usize> SlotOrder<N> {
    const FITS: () = assert!(N <= 256, "a fixed shape holds at most 256 attributes");

    /// No slot claimed yet.
    pub const fn new() -> Self {
        let () = Self::FITS;
        Self {
            slots: [0; N],
            len: 0,
        }
    }

    /// Give field `field` the next slot, unless it already has one.
    pub fn claim(&mut self, field: usize) {
        if field >= N || self.claimed().any(|claimed| claimed == field) {
            return;
        }
        self.slots[self.len] = field as u8;
        self.len += 1;
    }

    /// Field indices in slot order.
    pub fn claimed(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots[..self.len].iter().map(|&field| usize::from(field))
    }
}

impl<const N: usize> Default for SlotOrder<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of `name` in `names`, evaluated at compile time.
#[doc(hidden)]
pub const fn __field_index(names: &[&str], name: &str) -> usize {
    let mut i = 0;
    while i < names.len() {
        if str_eq(names[i], name) {
            return i;
        }
        i += 1;
    }
    panic!("attribute is not part of the shape")
}

/// Declare a fixed-shape attribute set: a struct with one
/// [`AttributeNode`](crate::AttributeNode) per statically-known attribute.
///
/// Each field's merge policy is computed at compile time. Attributes are
/// written in the order they were first contributed, like an
/// [`AttributeSet`](crate::AttributeSet). A field can carry an explicit
/// attribute name, which is needed for names that are Rust keywords.
///
/// ```
/// use attrfold::{AttributeStore, SerializeOptions, attribute_shape, value};
///
/// attribute_shape! {
///     /// Attributes of a submit button.
///     pub struct ButtonAttrs {
///         id,
///         class,
///         r#type = "type",
///         disabled,
///     }
/// }
///
/// let mut attrs = ButtonAttrs::default();
/// attrs.contribute("type", &value!("submit")).unwrap();
/// attrs.contribute("class", &value!(["btn", "primary"])).unwrap();
/// attrs.contribute("disabled", &value!(true)).unwrap();
/// assert_eq!(
///     attrs.render(&SerializeOptions::default()),
///     " type='submit' class='btn primary' disabled='disabled'"
/// );
/// ```
#[macro_export]
macro_rules! attribute_shape {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($field:ident $(= $attr:literal)?),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                #[allow(missing_docs)]
                pub $field: $crate::AttributeNode,
            )*
            __slot_order: $crate::SlotOrder<{ $crate::__count_attributes!($($field)*) }>,
        }

        impl $name {
            /// Attribute names of this shape, in declared order.
            pub const NAMES: &'static [&'static str] = &[
                $($crate::__attribute_name!($field $(, $attr)?)),*
            ];
        }

        impl $crate::AttributeStore for $name {
            fn contribute(
                &mut self,
                name: &str,
                value: &$crate::Value,
            ) -> ::core::result::Result<(), $crate::AttrError> {
                $(
                    if name == $crate::__attribute_name!($field $(, $attr)?) {
                        const FIELD: usize = $crate::__field_index(
                            $name::NAMES,
                            $crate::__attribute_name!($field $(, $attr)?),
                        );
                        const POLICY: $crate::Policy = $crate::Policy::for_name(
                            $crate::__attribute_name!($field $(, $attr)?),
                            $crate::MergeLevel::Top,
                        );
                        self.__slot_order.claim(FIELD);
                        return self.$field.merge(name, value, POLICY);
                    }
                )*
                ::core::result::Result::Err($crate::AttrError::UnknownAttribute {
                    name: ::std::string::String::from(name),
                })
            }

            fn set_node(
                &mut self,
                name: &str,
                node: $crate::AttributeNode,
            ) -> ::core::result::Result<(), $crate::AttrError> {
                $(
                    if name == $crate::__attribute_name!($field $(, $attr)?) {
                        const FIELD: usize = $crate::__field_index(
                            $name::NAMES,
                            $crate::__attribute_name!($field $(, $attr)?),
                        );
                        self.__slot_order.claim(FIELD);
                        self.$field = node;
                        return ::core::result::Result::Ok(());
                    }
                )*
                ::core::result::Result::Err($crate::AttrError::UnknownAttribute {
                    name: ::std::string::String::from(name),
                })
            }

            fn write_attributes(&self, writer: &mut $crate::AttributeWriter<'_>) {
                const LEN: usize = $crate::__count_attributes!($($field)*);
                let nodes: [(&str, &$crate::AttributeNode); LEN] = [
                    $(($crate::__attribute_name!($field $(, $attr)?), &self.$field)),*
                ];
                for field in self.__slot_order.claimed() {
                    if let ::core::option::Option::Some((name, node)) = nodes.get(field) {
                        writer.write_node(name, node);
                    }
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __attribute_name {
    ($field:ident) => {
        ::core::stringify!($field)
    };
    ($field:ident, $attr:literal) => {
        $attr
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __count_attributes {
    () => {
        0usize
    };
    ($head:ident $($tail:ident)*) => {
        1usize + $crate::__count_attributes!($($tail)*)
    };
}
