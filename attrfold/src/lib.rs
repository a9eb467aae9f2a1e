//! Merge, fold and serialize markup attribute sets.
//!
//! A tag's attributes are usually assembled from several places at once:
//! literal `name=value` pairs, spread records, lists of class names. This
//! crate folds those contributions, in source order, into one attribute tree
//! and renders it as an escaped attribute string:
//!
//! - top-level `id` contributions are joined with `-`, `class` contributions
//!   with a space, dropping `false` and null tokens
//! - every other attribute is overridden by its latest contribution
//! - nested records become dash-joined attributes (`data-foo-bar`)
//! - `true` renders as `name='name'`, `false` renders nothing
//!
//! The same computation runs either once at build time, when every
//! contribution is a literal, or at run time otherwise. The [`plan`] function
//! makes that choice; both paths share the merge engine and serializer, so
//! their output is byte-identical.
//!
//! ```
//! use attrfold::{Bindings, Expr, Operand, SerializeOptions, plan, value};
//!
//! let constant = plan(
//!     Expr::new().merge("id", "main").merge("id", "panel"),
//!     &SerializeOptions::default(),
//! )?;
//! assert_eq!(constant.as_constant(), Some(" id='main-panel'"));
//!
//! let deferred = plan(
//!     Expr::new()
//!         .merge("class", value!(["a", "b"]))
//!         .merge("class", Operand::param("extra")),
//!     &SerializeOptions::default(),
//! )?;
//! let bindings = Bindings::new().bind("extra", "c");
//! assert_eq!(deferred.render(&bindings)?, " class='a b c'");
//! # Ok::<(), attrfold::AttrError>(())
//! ```

#![deny(missing_docs, rustdoc::broken_intra_doc_links)]

mod tracing_macros;

mod classify;
mod error;
mod escaping;
mod fold;
mod merge;
#[cfg(feature = "reparse")]
mod reparse;
mod serialize;
mod store;
mod tree;

pub use attrfold_value::{VArray, VNumber, VObject, Value, ValueType, value};

pub use classify::{Contribution, Scalar, classify};
pub use error::AttrError;
pub use escaping::{Escaper, HtmlEscaper, escape};
pub use fold::{Bindings, Deferred, Expr, Operand, Plan, Step, fold, plan};
pub use merge::{MergeLevel, Policy};
#[cfg(feature = "reparse")]
pub use reparse::reparse;
pub use serialize::{
    AttributeWriter, QuoteStyle, SerializeOptions, to_string, to_string_with_options,
};
pub use store::{AttributeStore, SlotOrder};
#[doc(hidden)]
pub use store::__field_index;
pub use tree::{AttributeNode, AttributeSet, RenderValue};
