use std::fmt::{Debug, Display};

use num_traits::{Bounded, Num, NumCast, ToPrimitive};

/// A trait for types that can be used for indexed coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Only signed types are
/// supported, since queries subtract coordinates from each other. For integer types, callers must
/// keep squared distances between stored and query points representable in the type.
pub trait IndexableNum:
    private::Sealed
    + Num
    + NumCast
    + ToPrimitive
    + PartialOrd
    + Copy
    + Default
    + Debug
    + Display
    + Send
    + Sync
    + Bounded
{
    /// Returns `false` for NaN and infinite values. Always `true` for integers.
    fn is_finite(&self) -> bool;
}

impl IndexableNum for i32 {
    #[inline]
    fn is_finite(&self) -> bool {
        true
    }
}

impl IndexableNum for i64 {
    #[inline]
    fn is_finite(&self) -> bool {
        true
    }
}

impl IndexableNum for f32 {
    #[inline]
    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}

impl IndexableNum for f64 {
    #[inline]
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
