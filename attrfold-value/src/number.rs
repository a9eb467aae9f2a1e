//! Number value type.

use core::fmt::{self, Display, Formatter};

/// A number value: signed, unsigned or floating point.
///
/// The three representations never compare equal to each other, even when
/// they hold the same mathematical value; `1` and `1.0` render differently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VNumber {
    /// Signed integer
    I64(i64),
    /// Unsigned integer too large for `i64`
    U64(u64),
    /// Floating point
    F64(f64),
}

impl Display for VNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            VNumber::I64(i) => Display::fmt(i, f),
            VNumber::U64(u) => Display::fmt(u, f),
            VNumber::F64(fl) => Display::fmt(fl, f),
        }
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for VNumber {
                fn from(n: $ty) -> Self {
                    VNumber::I64(n as i64)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for VNumber {
                fn from(n: $ty) -> Self {
                    match i64::try_from(n) {
                        Ok(i) => VNumber::I64(i),
                        Err(_) => VNumber::U64(n as u64),
                    }
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u16, u32, u64, usize);

impl From<f32> for VNumber {
    fn from(n: f32) -> Self {
        VNumber::F64(n as f64)
    }
}

impl From<f64> for VNumber {
    fn from(n: f64) -> Self {
        VNumber::F64(n)
    }
}
