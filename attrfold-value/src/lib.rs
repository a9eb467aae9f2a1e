//! `attrfold-value` provides the dynamic value type that template front ends hand
//! to the attribute merge engine.
//!
//! # Features
//!
//! - **Seven value types**: Null, Bool, Number, String, Bytes, Array, Object
//! - **Ordered objects**: `VObject` preserves insertion order, so attribute
//!   output is reproducible
//! - **`value!` macro**: JSON-like literals for building contributions in code
//!
//! # Design
//!
//! `Value` is a plain enum. Scalars (booleans, numbers, strings) have a string
//! form used when they are rendered into markup; `Bytes` deliberately has none,
//! so it can never be spliced into an attribute by accident.

#![warn(missing_docs)]

mod macros;

mod number;
pub use number::*;

mod value;
pub use value::*;
