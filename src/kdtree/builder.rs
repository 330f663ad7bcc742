use std::cmp::Ordering;

use crate::kdtree::index::{Axis, KDNode, KDTree};
use crate::point::Point;
use crate::r#type::IndexableNum;

/// A builder to bulk load a balanced [`KDTree`].
///
/// Inserting points one by one gives a tree whose height depends on insertion order, e.g.
/// sorted input degrades it to a linked list. The builder instead collects every point and then
/// places the median of each level's axis at each node, for a tree of logarithmic height. The
/// result is an ordinary [`KDTree`] that can keep growing through
/// [`insert`][KDTree::insert].
#[derive(Debug, Clone, Default)]
pub struct KDTreeBuilder<N: IndexableNum> {
    points: Vec<Point<N>>,
}

impl<N: IndexableNum> KDTreeBuilder<N> {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self { points: vec![] }
    }

    /// Create a new builder with room for `num_items` points.
    pub fn with_capacity(num_items: usize) -> Self {
        Self {
            points: Vec::with_capacity(num_items),
        }
    }

    /// Add a point to the index.
    ///
    /// Duplicates are allowed here and collapse into a single point in the finished tree.
    pub fn add(&mut self, x: N, y: N) {
        self.add_point(Point::new(x, y));
    }

    /// Add a point to the index.
    pub fn add_point(&mut self, point: Point<N>) {
        self.points.push(point);
    }

    /// The number of points added so far, including duplicates.
    pub fn num_added(&self) -> usize {
        self.points.len()
    }

    /// Consume this builder, performing the k-d sort and generating a KDTree ready for queries.
    pub fn finish(mut self) -> KDTree<N> {
        self.points
            .sort_unstable_by(|a, b| cmp_coord(a.x(), b.x()).then(cmp_coord(a.y(), b.y())));
        self.points.dedup();

        let size = self.points.len();
        let root = build(&mut self.points, 1);
        KDTree { root, size }
    }
}

impl<N: IndexableNum> Extend<Point<N>> for KDTreeBuilder<N> {
    fn extend<I: IntoIterator<Item = Point<N>>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

/// Build the subtree holding `points`, rooted at `level`.
///
/// Recursion depth is bounded by the height of the balanced result.
fn build<N: IndexableNum>(points: &mut [Point<N>], level: usize) -> Option<Box<KDNode<N>>> {
    if points.is_empty() {
        return None;
    }

    let axis = Axis::for_level(level);
    points.sort_unstable_by(|a, b| cmp_coord(axis.coord(a), axis.coord(b)));

    // The right subtree must be strictly greater on the discriminant axis, so move the split
    // past any run of values equal to the median.
    let mut m = points.len() / 2;
    while m + 1 < points.len() && axis.coord(&points[m + 1]) == axis.coord(&points[m]) {
        m += 1;
    }

    let (left, rest) = points.split_at_mut(m);
    let (middle, right) = rest.split_at_mut(1);

    let mut node = KDNode::new(middle[0], level);
    node.left = build(left, level + 1);
    node.right = build(right, level + 1);
    Some(Box::new(node))
}

#[inline]
fn cmp_coord<N: IndexableNum>(a: N, b: N) -> Ordering {
    // Coordinates are finite, so this never falls back
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
