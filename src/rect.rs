//! An immutable axis-aligned rectangle.

use std::fmt;

use geo_traits::{CoordTrait, RectTrait};
use geo_traits::{
    GeometryTrait, GeometryType, UnimplementedGeometryCollection, UnimplementedLine,
    UnimplementedLineString, UnimplementedMultiLineString, UnimplementedMultiPoint,
    UnimplementedMultiPolygon, UnimplementedPoint, UnimplementedPolygon, UnimplementedTriangle,
};

use crate::error::{KDIndexError, Result};
use crate::kdtree::Axis;
use crate::point::Point;
use crate::r#type::IndexableNum;

/// An axis-aligned rectangle, closed on all sides.
///
/// Always satisfies `min_x <= max_x` and `min_y <= max_y`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect<N: IndexableNum> {
    min_x: N,
    min_y: N,
    max_x: N,
    max_y: N,
}

impl<N: IndexableNum> Rect<N> {
    /// Create a new rectangle from its bounds.
    ///
    /// Returns [`KDIndexError::InvalidRectangle`] if a minimum exceeds its maximum, and
    /// [`KDIndexError::NonFiniteCoordinate`] if any bound is NaN or infinite.
    pub fn new(min_x: N, min_y: N, max_x: N, max_y: N) -> Result<Self> {
        if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
            return Err(KDIndexError::NonFiniteCoordinate(format!(
                "rectangle bounds ({}, {}, {}, {})",
                min_x, min_y, max_x, max_y
            )));
        }
        if min_x > max_x {
            return Err(KDIndexError::InvalidRectangle(format!(
                "min_x {} > max_x {}",
                min_x, max_x
            )));
        }
        if min_y > max_y {
            return Err(KDIndexError::InvalidRectangle(format!(
                "min_y {} > max_y {}",
                min_y, max_y
            )));
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Create a new rectangle from any [`RectTrait`] implementation.
    pub fn from_rect_trait(rect: &impl RectTrait<T = N>) -> Result<Self> {
        Self::new(
            rect.min().x(),
            rect.min().y(),
            rect.max().x(),
            rect.max().y(),
        )
    }

    /// The rectangle covering every representable coordinate.
    pub(crate) fn everything() -> Self {
        Self {
            min_x: N::min_value(),
            min_y: N::min_value(),
            max_x: N::max_value(),
            max_y: N::max_value(),
        }
    }

    /// The minimum `x` bound.
    #[inline]
    pub fn min_x(&self) -> N {
        self.min_x
    }

    /// The minimum `y` bound.
    #[inline]
    pub fn min_y(&self) -> N {
        self.min_y
    }

    /// The maximum `x` bound.
    #[inline]
    pub fn max_x(&self) -> N {
        self.max_x
    }

    /// The maximum `y` bound.
    #[inline]
    pub fn max_y(&self) -> N {
        self.max_y
    }

    /// Returns `true` if the point lies inside or on the boundary of this rectangle.
    #[inline]
    pub fn contains(&self, point: &Point<N>) -> bool {
        let (x, y) = (point.x(), point.y());
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Returns `true` if the two rectangles share at least one point.
    pub fn intersects(&self, other: &Rect<N>) -> bool {
        if self.max_x < other.min_x || other.max_x < self.min_x {
            return false;
        }
        if self.max_y < other.min_y || other.max_y < self.min_y {
            return false;
        }
        true
    }

    /// The squared distance from the point to the closest point of this rectangle.
    ///
    /// Zero if the point is inside.
    pub fn distance_squared_to(&self, point: &Point<N>) -> N {
        let dx = axis_dist(point.x(), self.min_x, self.max_x);
        let dy = axis_dist(point.y(), self.min_y, self.max_y);
        dx * dx + dy * dy
    }

    /// The distance from the point to the closest point of this rectangle.
    pub fn distance_to(&self, point: &Point<N>) -> f64 {
        self.distance_squared_to(point)
            .to_f64()
            .map_or(f64::INFINITY, f64::sqrt)
    }

    /// Split this rectangle at `value` along `axis`.
    ///
    /// Returns the lower part (up to and including `value`) and the upper part (from `value`).
    /// The split value is clamped into this rectangle, so both halves remain valid.
    pub(crate) fn split(&self, axis: Axis, value: N) -> (Self, Self) {
        let mut lower = *self;
        let mut upper = *self;
        match axis {
            Axis::X => {
                let value = clamp(value, self.min_x, self.max_x);
                lower.max_x = value;
                upper.min_x = value;
            }
            Axis::Y => {
                let value = clamp(value, self.min_y, self.max_y);
                lower.max_y = value;
                upper.min_y = value;
            }
        }
        (lower, upper)
    }
}

impl<N: IndexableNum> fmt::Display for Rect<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

impl<N: IndexableNum> GeometryTrait for Rect<N> {
    type T = N;
    type PointType<'b>
        = UnimplementedPoint<N>
    where
        Self: 'b;
    type LineStringType<'b>
        = UnimplementedLineString<N>
    where
        Self: 'b;
    type PolygonType<'b>
        = UnimplementedPolygon<N>
    where
        Self: 'b;
    type MultiPointType<'b>
        = UnimplementedMultiPoint<N>
    where
        Self: 'b;
    type MultiLineStringType<'b>
        = UnimplementedMultiLineString<N>
    where
        Self: 'b;
    type MultiPolygonType<'b>
        = UnimplementedMultiPolygon<N>
    where
        Self: 'b;
    type GeometryCollectionType<'b>
        = UnimplementedGeometryCollection<N>
    where
        Self: 'b;
    type RectType<'b>
        = Self
    where
        Self: 'b;
    type TriangleType<'b>
        = UnimplementedTriangle<N>
    where
        Self: 'b;
    type LineType<'b>
        = UnimplementedLine<N>
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn as_type(
        &self,
    ) -> GeometryType<
        '_,
        UnimplementedPoint<N>,
        UnimplementedLineString<N>,
        UnimplementedPolygon<N>,
        UnimplementedMultiPoint<N>,
        UnimplementedMultiLineString<N>,
        UnimplementedMultiPolygon<N>,
        UnimplementedGeometryCollection<N>,
        Self,
        UnimplementedTriangle<N>,
        UnimplementedLine<N>,
    > {
        GeometryType::Rect(self)
    }
}

impl<N: IndexableNum> RectTrait for Rect<N> {
    type CoordType<'a>
        = Point<N>
    where
        Self: 'a;

    fn min(&self) -> Self::CoordType<'_> {
        Point::new(self.min_x, self.min_y)
    }

    fn max(&self) -> Self::CoordType<'_> {
        Point::new(self.max_x, self.max_y)
    }
}

/// 1D distance from a value to a range.
#[inline]
fn axis_dist<N: IndexableNum>(k: N, min: N, max: N) -> N {
    if k < min {
        min - k
    } else if k <= max {
        N::zero()
    } else {
        k - max
    }
}

#[inline]
fn clamp<N: IndexableNum>(value: N, min: N, max: N) -> N {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn unit() -> Rect<f64> {
        Rect::new(0.25, 0.25, 0.75, 0.75).unwrap()
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert!(matches!(
            Rect::new(1.0, 0.0, 0.0, 1.0),
            Err(KDIndexError::InvalidRectangle(_))
        ));
        assert!(matches!(
            Rect::new(0.0, 1.0, 1.0, 0.0),
            Err(KDIndexError::InvalidRectangle(_))
        ));
        assert!(matches!(
            Rect::new(0.0, f64::NAN, 1.0, 1.0),
            Err(KDIndexError::NonFiniteCoordinate(_))
        ));
        // Degenerate rectangles are fine.
        assert!(Rect::new(0.5, 0.5, 0.5, 0.5).is_ok());
    }

    #[test]
    fn contains_is_inclusive() {
        let rect = unit();
        assert!(rect.contains(&Point::new(0.4, 0.4)));
        assert!(rect.contains(&Point::new(0.25, 0.75)));
        assert!(rect.contains(&Point::new(0.75, 0.25)));
        assert!(!rect.contains(&Point::new(4.0, 4.0)));
        assert!(!rect.contains(&Point::new(0.5, 0.7500001)));
    }

    #[test]
    fn intersects() {
        let rect = unit();
        assert!(rect.intersects(&Rect::new(0.5, 0.5, 2.0, 2.0).unwrap()));
        assert!(rect.intersects(&Rect::new(0.75, 0.0, 1.0, 0.25).unwrap()));
        assert!(rect.intersects(&Rect::new(0.0, 0.0, 1.0, 1.0).unwrap()));
        assert!(!rect.intersects(&Rect::new(0.8, 0.0, 1.0, 1.0).unwrap()));
        assert!(!rect.intersects(&Rect::new(0.0, 0.0, 1.0, 0.2).unwrap()));
    }

    #[test]
    fn distance_to_point() {
        let rect = unit();
        assert_eq!(rect.distance_squared_to(&Point::new(0.4, 0.4)), 0.0);
        assert_eq!(rect.distance_squared_to(&Point::new(0.25, 0.5)), 0.0);

        // Directly to one side
        let d2 = rect.distance_squared_to(&Point::new(1.0, 0.5));
        assert!((d2 - 0.0625).abs() < 1e-12);

        // Off a corner
        let rect = Rect::new(0, 0, 2, 2).unwrap();
        assert_eq!(rect.distance_squared_to(&Point::new(5, 6)), 25);
        assert_eq!(rect.distance_to(&Point::new(-3, -4)), 5.0);
        assert_eq!(rect.distance_squared_to(&Point::new(1, -3)), 9);
    }

    #[test]
    fn split_along_axis() {
        let rect = Rect::new(0, 0, 10, 10).unwrap();
        let (lower, upper) = rect.split(Axis::X, 4);
        assert_eq!(lower, Rect::new(0, 0, 4, 10).unwrap());
        assert_eq!(upper, Rect::new(4, 0, 10, 10).unwrap());

        let (lower, upper) = rect.split(Axis::Y, 12);
        assert_eq!(lower, rect);
        assert_eq!(upper, Rect::new(0, 10, 10, 10).unwrap());
    }

    #[test]
    fn display() {
        assert_eq!(
            Rect::new(1, 2, 3, 4).unwrap().to_string(),
            "[1, 3] x [2, 4]"
        );
    }

    #[test]
    fn rect_trait_roundtrip() {
        let rect = unit();
        assert_eq!(Rect::from_rect_trait(&rect).unwrap(), rect);
    }
}
