//! An immutable 2D point.

use std::fmt;

use geo_traits::CoordTrait;

use crate::error::{KDIndexError, Result};
use crate::r#type::IndexableNum;

/// An immutable point in the plane.
///
/// Equality is exact coordinate equality, with no tolerance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point<N: IndexableNum> {
    x: N,
    y: N,
}

impl<N: IndexableNum> Point<N> {
    /// Create a new point.
    ///
    /// Coordinates must be finite. This is only checked in debug builds; use
    /// [`try_new`][Self::try_new] to validate untrusted input.
    pub fn new(x: N, y: N) -> Self {
        debug_assert!(
            x.is_finite() && y.is_finite(),
            "non-finite coordinate ({x}, {y})"
        );
        Self { x, y }
    }

    /// Create a new point, rejecting NaN or infinite coordinates.
    pub fn try_new(x: N, y: N) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(KDIndexError::NonFiniteCoordinate(format!("({}, {})", x, y)));
        }
        Ok(Self { x, y })
    }

    /// The `x` coordinate of this point.
    #[inline]
    pub fn x(&self) -> N {
        self.x
    }

    /// The `y` coordinate of this point.
    #[inline]
    pub fn y(&self) -> N {
        self.y
    }

    /// The squared Euclidean distance to another point.
    ///
    /// Prefer this over [`distance_to`][Self::distance_to] when only comparing distances.
    #[inline]
    pub fn distance_squared_to(&self, other: &Point<N>) -> N {
        sq_dist(self.x, self.y, other.x, other.y)
    }

    /// The Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point<N>) -> f64 {
        self.distance_squared_to(other)
            .to_f64()
            .map_or(f64::INFINITY, f64::sqrt)
    }
}

impl<N: IndexableNum> fmt::Display for Point<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<N: IndexableNum> From<(N, N)> for Point<N> {
    fn from((x, y): (N, N)) -> Self {
        Self::new(x, y)
    }
}

impl<N: IndexableNum> From<[N; 2]> for Point<N> {
    fn from([x, y]: [N; 2]) -> Self {
        Self::new(x, y)
    }
}

impl<N: IndexableNum> CoordTrait for Point<N> {
    type T = N;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.x
    }

    fn y(&self) -> Self::T {
        self.y
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid index of coord"),
        }
    }
}

#[inline]
pub(crate) fn sq_dist<N: IndexableNum>(ax: N, ay: N, bx: N, by: N) -> N {
    let dx = ax - bx;
    let dy = ay - by;
    dx * dx + dy * dy
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn squared_and_euclidean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_squared_to(&b), 25.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn integer_distance() {
        let a = Point::new(-2_i32, 1);
        let b = Point::new(1, 5);
        assert_eq!(a.distance_squared_to(&b), 25);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn exact_equality() {
        assert_eq!(Point::new(0.1, 0.2), Point::new(0.1, 0.2));
        assert_ne!(Point::new(0.1, 0.2), Point::new(0.1, 0.2 + 1e-12));
        assert_eq!(Point::from((1, 2)), Point::from([1, 2]));
    }

    #[test]
    fn rejects_non_finite() {
        assert!(matches!(
            Point::try_new(f64::NAN, 0.0),
            Err(KDIndexError::NonFiniteCoordinate(_))
        ));
        assert!(Point::try_new(0.0, f64::INFINITY).is_err());
        assert!(Point::try_new(0.5, -0.5).is_ok());
    }

    #[test]
    fn display() {
        assert_eq!(Point::new(0.7, 0.2).to_string(), "(0.7, 0.2)");
        assert_eq!(Point::new(3, -4).to_string(), "(3, -4)");
    }

    #[test]
    fn coord_trait() {
        let p = Point::new(1.5, 2.5);
        assert_eq!(CoordTrait::x(&p), 1.5);
        assert_eq!(p.nth_or_panic(1), 2.5);
    }
}
