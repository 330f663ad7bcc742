//! Utilities to traverse the KDTree structure.

use geo_traits::RectTrait;
use geo_traits::{
    GeometryTrait, GeometryType, UnimplementedGeometryCollection, UnimplementedLine,
    UnimplementedLineString, UnimplementedMultiLineString, UnimplementedMultiPoint,
    UnimplementedMultiPolygon, UnimplementedPoint, UnimplementedPolygon, UnimplementedTriangle,
};

use crate::kdtree::index::{Axis, KDNode};
use crate::point::Point;
use crate::r#type::IndexableNum;
use crate::rect::Rect;

/// A read-only view onto a node of a [`KDTree`][crate::kdtree::KDTree].
///
/// Each node carries the bounding rectangle of its subtree, derived by splitting the parent's
/// rectangle at the parent's point along the parent's axis. The root's rectangle covers every
/// representable coordinate.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a, N: IndexableNum> {
    node: &'a KDNode<N>,
    bounds: Rect<N>,
}

impl<'a, N: IndexableNum> Node<'a, N> {
    pub(crate) fn from_root(root: &'a KDNode<N>) -> Self {
        Self {
            node: root,
            bounds: Rect::everything(),
        }
    }

    /// The point stored at this node.
    pub fn point(&self) -> Point<N> {
        self.node.point
    }

    /// Depth of this node, where the root is level 1.
    pub fn level(&self) -> usize {
        self.node.level
    }

    /// The axis this node splits its children over.
    pub fn axis(&self) -> Axis {
        self.node.axis()
    }

    /// The region every point in this subtree lies within.
    pub fn bounds(&self) -> &Rect<N> {
        &self.bounds
    }

    /// The child subtree holding points with a discriminant coordinate `<=` this node's.
    pub fn left_child(&self) -> Option<Node<'a, N>> {
        let (lower, _) = self.child_bounds();
        self.node.left.as_deref().map(|node| Node {
            node,
            bounds: lower,
        })
    }

    /// The child subtree holding points with a discriminant coordinate `>` this node's.
    pub fn right_child(&self) -> Option<Node<'a, N>> {
        let (_, upper) = self.child_bounds();
        self.node.right.as_deref().map(|node| Node {
            node,
            bounds: upper,
        })
    }

    /// Returns `true` if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.node.left.is_none() && self.node.right.is_none()
    }

    /// Returns `true` if this node has at least one child.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }

    #[inline]
    fn child_bounds(&self) -> (Rect<N>, Rect<N>) {
        let axis = self.axis();
        self.bounds.split(axis, axis.coord(&self.node.point))
    }
}

impl<N: IndexableNum> GeometryTrait for Node<'_, N> {
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

impl<N: IndexableNum> RectTrait for Node<'_, N> {
    type CoordType<'a>
        = Point<N>
    where
        Self: 'a;

    fn min(&self) -> Self::CoordType<'_> {
        Point::new(self.bounds.min_x(), self.bounds.min_y())
    }

    fn max(&self) -> Self::CoordType<'_> {
        Point::new(self.bounds.max_x(), self.bounds.max_y())
    }
}
