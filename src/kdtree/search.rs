use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use geo_traits::{CoordTrait, RectTrait};
use tinyvec::TinyVec;

use crate::error::Result;
use crate::kdtree::index::{KDNode, KDTree};
use crate::kdtree::iter::RangeIter;
use crate::kdtree::traversal::Node;
use crate::point::Point;
use crate::r#type::IndexableNum;
use crate::rect::Rect;

impl<N: IndexableNum> KDTree<N> {
    /// Search the tree for points within a given bounding box.
    ///
    /// - min_x: bbox
    /// - min_y: bbox
    /// - max_x: bbox
    /// - max_y: bbox
    ///
    /// Returns a lazy iterator over the points found, or an error if the bounds don't form a
    /// valid rectangle.
    pub fn range(&self, min_x: N, min_y: N, max_x: N, max_y: N) -> Result<RangeIter<'_, N>> {
        let rect = Rect::new(min_x, min_y, max_x, max_y)?;
        Ok(self.range_rect(&rect))
    }

    /// Search the tree for points within a given rectangle.
    pub fn range_rect(&self, rect: &Rect<N>) -> RangeIter<'_, N> {
        RangeIter::new(self.root.as_deref(), *rect)
    }

    /// Search the tree for points within any [`RectTrait`] implementation.
    pub fn range_rect_trait(&self, rect: &impl RectTrait<T = N>) -> Result<RangeIter<'_, N>> {
        let rect = Rect::from_rect_trait(rect)?;
        Ok(self.range_rect(&rect))
    }

    /// Iterate over every point in the tree, in pre-order.
    pub fn iter(&self) -> RangeIter<'_, N> {
        self.range_rect(&Rect::everything())
    }

    /// Search the tree for points within a given radius.
    ///
    /// - qx: x value of query point
    /// - qy: y value of query point
    /// - r: radius
    ///
    /// Returns the points at a distance of at most `r`, in pre-order. A negative radius finds
    /// nothing.
    pub fn within(&self, qx: N, qy: N, r: N) -> Vec<Point<N>> {
        let mut result = vec![];
        if r < N::zero() {
            return result;
        }

        let query = Point::new(qx, qy);
        let r2 = r * r;

        // Use TinyVec to avoid heap allocations. Only `Some` is ever pushed.
        let mut stack: TinyVec<[Option<&KDNode<N>>; 32]> = TinyVec::new();
        stack.extend(self.root.as_deref().map(Some));

        while let Some(Some(node)) = stack.pop() {
            if node.point.distance_squared_to(&query) <= r2 {
                result.push(node.point);
            }

            // queue search in halves that intersect the query
            let axis = node.axis();
            let q = axis.coord(&query);
            let c = axis.coord(&node.point);
            if q + r >= c {
                stack.extend(node.right.as_deref().map(Some));
            }
            if q - r <= c {
                stack.extend(node.left.as_deref().map(Some));
            }
        }
        result
    }

    /// Search the tree for points within a given radius.
    ///
    /// - coord: coordinate of query point
    /// - r: radius
    pub fn within_coord(&self, coord: &impl CoordTrait<T = N>, r: N) -> Vec<Point<N>> {
        self.within(coord.x(), coord.y(), r)
    }

    /// The stored point closest to `(x, y)`, or `None` if the tree is empty.
    pub fn nearest(&self, x: N, y: N) -> Option<Point<N>> {
        self.nearest_point(&Point::new(x, y))
    }

    /// The stored point closest to `query`, or `None` if the tree is empty.
    ///
    /// When several points are equally close, the first one found wins. The traversal order is
    /// fixed for a given tree shape, so the result is deterministic.
    pub fn nearest_point(&self, query: &Point<N>) -> Option<Point<N>> {
        let root = self.root.as_deref()?;

        let mut best = root.point;
        let mut best_dist = best.distance_squared_to(query);

        let mut stack: TinyVec<[Pending<N>; 32]> = TinyVec::new();
        stack.push(Pending {
            node: Some(root),
            bounds: Rect::everything(),
        });

        // Only subtrees with a node are pushed
        while let Some(Pending {
            node: Some(node),
            bounds,
        }) = stack.pop()
        {
            // The best point may have improved since this subtree was queued
            if bounds.distance_squared_to(query) > best_dist {
                continue;
            }

            let dist = node.point.distance_squared_to(query);
            if dist < best_dist {
                best = node.point;
                best_dist = dist;
            }

            let axis = node.axis();
            let (lower, upper) = bounds.split(axis, axis.coord(&node.point));
            let left = Pending {
                node: node.left.as_deref(),
                bounds: lower,
            };
            let right = Pending {
                node: node.right.as_deref(),
                bounds: upper,
            };

            // Visit the side containing the query first; pushed in reverse of popping order
            let (near, far) = if node.goes_left(query) {
                (left, right)
            } else {
                (right, left)
            };
            if far.node.is_some() && far.bounds.distance_squared_to(query) <= best_dist {
                stack.push(far);
            }
            if near.node.is_some() {
                stack.push(near);
            }
        }

        Some(best)
    }

    /// The stored point closest to the given coordinate, or `None` if the tree is empty.
    pub fn nearest_coord(&self, coord: &impl CoordTrait<T = N>) -> Option<Point<N>> {
        self.nearest(coord.x(), coord.y())
    }

    /// Search points in order of distance from the given point.
    ///
    /// - x: x value of query point
    /// - y: y value of query point
    /// - max_results: stop after this many points
    /// - max_distance: skip points farther away than this. A negative distance finds nothing.
    ///
    /// Points at equal distance are returned in the order they were discovered.
    pub fn neighbors(
        &self,
        x: N,
        y: N,
        max_results: Option<usize>,
        max_distance: Option<N>,
    ) -> Vec<Point<N>> {
        let query = Point::new(x, y);
        let max_dist_squared = max_distance.map(|d| d * d);
        let within_max = |dist: N| max_dist_squared.map_or(true, |max| dist <= max);

        let mut results = vec![];
        if max_results == Some(0) || max_distance.is_some_and(|d| d < N::zero()) {
            return results;
        }

        let Some(root) = self.root.as_deref() else {
            return results;
        };

        let mut seq = 0;
        let mut queue = BinaryHeap::new();
        queue.push(Reverse(NeighborNode {
            dist: N::zero(),
            seq,
            item: Neighbor::Subtree(root, Rect::everything()),
        }));

        while let Some(Reverse(NeighborNode { dist, item, .. })) = queue.pop() {
            if !within_max(dist) {
                break;
            }

            match item {
                Neighbor::Point(point) => {
                    results.push(point);
                    if max_results.is_some_and(|max_results| results.len() == max_results) {
                        break;
                    }
                }
                Neighbor::Subtree(node, bounds) => {
                    seq += 1;
                    queue.push(Reverse(NeighborNode {
                        dist: node.point.distance_squared_to(&query),
                        seq,
                        item: Neighbor::Point(node.point),
                    }));

                    let axis = node.axis();
                    let (lower, upper) = bounds.split(axis, axis.coord(&node.point));
                    for (child, child_bounds) in [(&node.left, lower), (&node.right, upper)] {
                        if let Some(child) = child.as_deref() {
                            let dist = child_bounds.distance_squared_to(&query);
                            if within_max(dist) {
                                seq += 1;
                                queue.push(Reverse(NeighborNode {
                                    dist,
                                    seq,
                                    item: Neighbor::Subtree(child, child_bounds),
                                }));
                            }
                        }
                    }
                }
            }
        }

        results
    }

    /// Search points in order of distance from the given coordinate.
    pub fn neighbors_coord(
        &self,
        coord: &impl CoordTrait<T = N>,
        max_results: Option<usize>,
        max_distance: Option<N>,
    ) -> Vec<Point<N>> {
        self.neighbors(coord.x(), coord.y(), max_results, max_distance)
    }

    /// Access the root node of the tree for manual traversal.
    pub fn root(&self) -> Option<Node<'_, N>> {
        self.root.as_deref().map(Node::from_root)
    }
}

impl<'a, N: IndexableNum> IntoIterator for &'a KDTree<N> {
    type Item = Point<N>;
    type IntoIter = RangeIter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A subtree waiting to be searched, with the region its points lie within.
#[derive(Debug, Default)]
struct Pending<'a, N: IndexableNum> {
    node: Option<&'a KDNode<N>>,
    bounds: Rect<N>,
}

#[derive(Debug)]
enum Neighbor<'a, N: IndexableNum> {
    Point(Point<N>),
    Subtree(&'a KDNode<N>, Rect<N>),
}

/// A wrapper around a queue entry and its squared distance for use in the priority queue.
#[derive(Debug)]
struct NeighborNode<'a, N: IndexableNum> {
    dist: N,
    /// Insertion order, breaking ties between equal distances.
    seq: usize,
    item: Neighbor<'a, N>,
}

impl<N: IndexableNum> PartialEq for NeighborNode<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N: IndexableNum> Eq for NeighborNode<'_, N> {}

impl<N: IndexableNum> Ord for NeighborNode<'_, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Coordinates are finite, so distances are never NaN
        self.dist
            .partial_cmp(&other.dist)
            .unwrap_or(Ordering::Equal)
            .then(self.seq.cmp(&other.seq))
    }
}

impl<N: IndexableNum> PartialOrd for NeighborNode<'_, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
